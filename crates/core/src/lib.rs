//! meson-runner - run the Meson build system from an editor
//!
//! This crate provides functionality to:
//! - Locate the meson executable
//! - Build `meson setup|configure|compile|test` command lines from typed options
//! - Run them while relaying stdout and stderr line by line into an output sink
//! - Discover build directories from meson's introspection files
//!
//! The editor itself is reached only through [`interfaces::Host`] and
//! [`sink::OutputSink`], so everything here runs without one.
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod locator;
pub mod project;
pub mod relay;
pub mod runner;
pub mod sink;
pub mod tool;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{
    CompileOptions, ConfigureOptions, MesonCommand, SetupOptions, SubcommandOptions, TestOptions,
};
pub use config::{Settings, SettingsStore};
pub use interfaces::Host;
pub use project::{MesonInfo, Project};
pub use relay::ProcessRunner;
pub use runner::{MesonRunner, Outcome};
pub use sink::{MemorySink, OutputPanels, OutputSink};
pub use tool::MesonTool;
