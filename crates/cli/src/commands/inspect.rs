use anyhow::{Context, Result};
use meson_runner_core::Project;
use std::path::Path;

use super::Session;

/// Print one discovered build directory per line.
pub fn build_dirs_command(project_dir: &Path) -> Result<i32> {
    let folder = std::fs::canonicalize(project_dir)
        .with_context(|| format!("Project folder {} not found", project_dir.display()))?;
    let project = Project::from_folder(folder);

    let dirs = project.build_dirs()?;
    if dirs.is_empty() {
        eprintln!("No build directories found in {}", project.folder().display());
        return Ok(1);
    }
    for dir in dirs {
        println!("{}", dir.display());
    }
    Ok(0)
}

pub fn locate_command(session: &Session) -> Result<i32> {
    println!("{}", session.runner().tool().path().display());
    Ok(0)
}
