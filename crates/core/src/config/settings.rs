use crate::{
    command::{CompileOptions, ConfigureOptions, SetupOptions, TestOptions},
    error::{Error, Result},
    sink::{DEFAULT_CHANNEL, default_syntax_files},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

pub const CONFIG_FILE_NAMES: [&str; 2] = [".meson-runner.json", "meson-runner.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Use this meson instead of searching `PATH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meson_binary: Option<PathBuf>,
    /// Output channel every invocation writes to
    pub panel_name: String,
    pub clear_panel_on_run: bool,
    pub syntax_files: HashMap<String, String>,
    /// Extra environment for every invocation
    pub env: BTreeMap<String, String>,

    // Per-action defaults, overlaid by whatever the caller sets explicitly
    pub setup: SetupOptions,
    pub configure: ConfigureOptions,
    pub compile: CompileOptions,
    pub test: TestOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meson_binary: None,
            panel_name: DEFAULT_CHANNEL.to_string(),
            clear_panel_on_run: false,
            syntax_files: default_syntax_files(),
            env: BTreeMap::new(),
            setup: SetupOptions::default(),
            configure: ConfigureOptions::default(),
            compile: CompileOptions::default(),
            test: TestOptions::default(),
        }
    }
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        if settings.panel_name.is_empty() {
            return Err(Error::ConfigError(format!(
                "{}: panel_name must not be empty",
                path.display()
            )));
        }
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Nearest settings file at or above `start_path`.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }
}

/// Loads the settings for a project once and hands out the cached value after.
#[derive(Debug)]
pub struct SettingsStore {
    start_path: PathBuf,
    cache: OnceLock<Settings>,
}

impl SettingsStore {
    pub fn new(start_path: impl Into<PathBuf>) -> Self {
        Self {
            start_path: start_path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Store that never touches the filesystem.
    pub fn with_settings(settings: Settings) -> Self {
        let cache = OnceLock::new();
        let _ = cache.set(settings);
        Self {
            start_path: PathBuf::new(),
            cache,
        }
    }

    pub fn get(&self) -> Result<&Settings> {
        if let Some(settings) = self.cache.get() {
            return Ok(settings);
        }

        let settings = match Settings::find_config_file(&self.start_path) {
            Some(path) => {
                debug!("Loading settings from {:?}", path);
                Settings::load_from_file(&path)?
            }
            None => {
                debug!("No settings file above {:?}, using defaults", self.start_path);
                Settings::default()
            }
        };
        Ok(self.cache.get_or_init(|| settings))
    }
}
