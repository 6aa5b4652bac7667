//! The resolved meson executable

use crate::{
    error::{Error, Result},
    locator::{Locator, is_executable},
};
use std::path::{Path, PathBuf};
use tracing::info;

pub const MESON: &str = "meson";

/// Absolute path to the meson executable, resolved once and never changed.
///
/// Holding a `MesonTool` is proof that resolution succeeded; command builders
/// take one so no command can be built around a missing binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesonTool {
    binary: PathBuf,
}

impl MesonTool {
    /// Search `PATH` and the platform install locations.
    pub fn discover() -> Result<Self> {
        Self::discover_with(&Locator::from_env(MESON))
    }

    pub fn discover_with(locator: &Locator) -> Result<Self> {
        let binary = locator.locate(MESON)?;
        info!("Using meson at {:?}", binary);
        Ok(Self { binary })
    }

    /// Use an explicit path, e.g. one pinned in the settings. A relative
    /// path is taken from the current directory.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let binary = path.into();
        if !is_executable(&binary) {
            return Err(Error::ToolNotFound {
                name: binary.display().to_string(),
            });
        }
        Ok(Self {
            binary: std::path::absolute(binary)?,
        })
    }

    /// Resolve from the pinned path when there is one, otherwise search.
    pub fn resolve(pinned: Option<&Path>) -> Result<Self> {
        match pinned {
            Some(path) => Self::at(path),
            None => Self::discover(),
        }
    }

    #[cfg(test)]
    pub(crate) fn at_unchecked(binary: PathBuf) -> Self {
        Self { binary }
    }

    pub fn path(&self) -> &Path {
        &self.binary
    }

    /// First token of every command line.
    pub fn program(&self) -> String {
        self.binary.to_string_lossy().into_owned()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn test_at_requires_executable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meson");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(
            MesonTool::at(&path),
            Err(Error::ToolNotFound { .. })
        ));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        let tool = MesonTool::at(&path).unwrap();
        assert_eq!(tool.path(), path.as_path());
        assert_eq!(tool.program(), path.to_string_lossy());
    }

    #[test]
    fn test_at_makes_relative_path_absolute() {
        let dir = TempDir::new_in(".").unwrap();
        let relative = dir.path().join("meson");
        fs::write(&relative, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&relative, fs::Permissions::from_mode(0o755)).unwrap();

        let tool = MesonTool::at(&relative).unwrap();
        assert!(tool.path().is_absolute());
        assert_eq!(
            fs::canonicalize(tool.path()).unwrap(),
            fs::canonicalize(&relative).unwrap()
        );
    }

    #[test]
    fn test_discover_with_locator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meson");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let locator = Locator::new(Some(dir.path().as_os_str().to_owned()), vec![]);
        let tool = MesonTool::discover_with(&locator).unwrap();
        assert_eq!(tool.path(), path.as_path());
    }
}
