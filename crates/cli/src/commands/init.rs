use anyhow::{Context, Result, bail};
use meson_runner_core::config::{CONFIG_FILE_NAMES, Settings};
use std::path::Path;
use tracing::info;

/// Write a settings file with every default spelled out.
pub fn init_command(project_dir: &Path, force: bool) -> Result<i32> {
    let folder = std::fs::canonicalize(project_dir)
        .with_context(|| format!("Project folder {} not found", project_dir.display()))?;
    let config_path = folder.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Settings already exist at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    Settings::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    info!("Wrote default settings to {:?}", config_path);
    println!("Created {}", config_path.display());
    Ok(0)
}
