//! Meson command generation

pub mod args;
pub mod builder;
pub mod meson_command;
pub mod options;

// Re-export commonly used types
pub use args::ArgList;
pub use builder::{
    CompileOptions, ConfigureOptions, CoreOptions, InstallDirs, MergeOptions, SetupOptions,
    SubcommandOptions, TestOptions,
};
pub use meson_command::MesonCommand;
