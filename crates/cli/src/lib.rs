pub mod cli;
pub mod commands;
pub mod display;

pub use cli::{Commands, Runner};
