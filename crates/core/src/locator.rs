//! Locating the meson executable on the filesystem

use crate::error::{Error, Result};
use std::env;
use std::ffi::OsString;
use std::path::{self, Path, PathBuf};
use tracing::debug;

/// Searches `PATH`, then a fixed list of install locations, for an executable.
///
/// The search inputs are held by value so a locator built with [`Locator::new`]
/// never looks at the process environment.
#[derive(Debug, Clone)]
pub struct Locator {
    search_path: Option<OsString>,
    fallback_dirs: Vec<PathBuf>,
}

impl Locator {
    /// Locator reading `PATH` from the environment, with the platform fallbacks for `name`.
    pub fn from_env(name: &str) -> Self {
        Self {
            search_path: env::var_os("PATH"),
            fallback_dirs: fallback_dirs(name),
        }
    }

    pub fn new(search_path: Option<OsString>, fallback_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            fallback_dirs,
        }
    }

    /// Resolve `name` to the first executable match, `PATH` order first.
    ///
    /// Relative `PATH` entries are resolved against the current directory.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let file_name = executable_name(name);

        let path_dirs: Vec<PathBuf> = self
            .search_path
            .as_deref()
            .map(|paths| {
                env::split_paths(paths)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(found) = first_executable(&path_dirs, &file_name) {
            debug!("Found {} in PATH: {:?}", name, found);
            return Ok(path::absolute(found)?);
        }

        if let Some(found) = first_executable(&self.fallback_dirs, &file_name) {
            debug!("Found {} in fallback location: {:?}", name, found);
            return Ok(path::absolute(found)?);
        }

        Err(Error::ToolNotFound {
            name: name.to_string(),
        })
    }
}

/// File name of an executable on this platform (`meson` or `meson.exe`).
pub fn executable_name(name: &str) -> String {
    format!("{name}{}", env::consts::EXE_SUFFIX)
}

/// Install locations probed after `PATH`.
#[cfg(windows)]
pub fn fallback_dirs(name: &str) -> Vec<PathBuf> {
    ["ProgramFiles", "ProgramFiles(x86)"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .map(|root| PathBuf::from(root).join(name).join("bin"))
        .collect()
}

/// Install locations probed after `PATH`.
#[cfg(not(windows))]
pub fn fallback_dirs(name: &str) -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/local").join(name).join("bin"),
    ]
}

fn first_executable(dirs: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(file_name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn joined(dirs: &[&Path]) -> Option<OsString> {
        Some(env::join_paths(dirs).unwrap())
    }

    #[test]
    fn test_locate_in_path() {
        let dir = TempDir::new().unwrap();
        let expected = write_file(dir.path(), "meson", 0o755);

        let locator = Locator::new(joined(&[dir.path()]), vec![]);
        assert_eq!(locator.locate("meson").unwrap(), expected);
    }

    #[test]
    fn test_relative_path_entry_resolves_to_absolute() {
        let dir = TempDir::new_in(".").unwrap();
        assert!(dir.path().is_relative());
        write_file(dir.path(), "meson", 0o755);

        let locator = Locator::new(Some(dir.path().as_os_str().to_owned()), vec![]);
        let found = locator.locate("meson").unwrap();

        assert!(found.is_absolute());
        let expected = env::current_dir()
            .unwrap()
            .join(dir.path().file_name().unwrap())
            .join("meson");
        assert_eq!(found, expected);
    }

    #[test]
    fn test_path_order_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = write_file(first.path(), "meson", 0o755);
        write_file(second.path(), "meson", 0o755);

        let locator = Locator::new(joined(&[first.path(), second.path()]), vec![]);
        assert_eq!(locator.locate("meson").unwrap(), expected);
    }

    #[test]
    fn test_skips_non_executable_files() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_file(first.path(), "meson", 0o644);
        let expected = write_file(second.path(), "meson", 0o755);

        let locator = Locator::new(joined(&[first.path(), second.path()]), vec![]);
        assert_eq!(locator.locate("meson").unwrap(), expected);
    }

    #[test]
    fn test_skips_directories_named_like_the_tool() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("meson")).unwrap();

        let locator = Locator::new(joined(&[dir.path()]), vec![]);
        assert!(locator.locate("meson").is_err());
    }

    #[test]
    fn test_falls_back_after_path() {
        let path_dir = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        let expected = write_file(fallback.path(), "meson", 0o755);

        let locator = Locator::new(
            joined(&[path_dir.path()]),
            vec![fallback.path().to_path_buf()],
        );
        assert_eq!(locator.locate("meson").unwrap(), expected);
    }

    #[test]
    fn test_empty_path_and_no_fallback_is_not_found() {
        let locator = Locator::new(Some(OsString::new()), vec![]);
        match locator.locate("meson") {
            Err(Error::ToolNotFound { name }) => assert_eq!(name, "meson"),
            other => panic!("expected ToolNotFound, got {other:?}"),
        }

        let locator = Locator::new(None, vec![]);
        assert!(matches!(
            locator.locate("meson"),
            Err(Error::ToolNotFound { .. })
        ));
    }

    #[test]
    fn test_unix_fallback_dirs() {
        assert_eq!(
            fallback_dirs("meson"),
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/local/meson/bin")
            ]
        );
    }
}
