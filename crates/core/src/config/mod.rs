//! Configuration management for meson-runner

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, Settings, SettingsStore};
