//! Project layout and meson's introspection files

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const BUILD_CONFIG_NAME: &str = "meson.build";
pub const INFO_DIR_NAME: &str = "meson-info";

/// A project folder and the name it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    folder: PathBuf,
    name: String,
}

impl Project {
    pub fn new(folder: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            name: name.into(),
        }
    }

    /// Project described by an editor project file: the folder is the file's
    /// parent, the name is the file name.
    pub fn from_project_file(path: &Path) -> Self {
        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { folder, name }
    }

    /// Project without a project file, named after its folder.
    pub fn from_folder(folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { folder, name }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<folder>/meson.build`, when it exists.
    pub fn build_config_path(&self) -> Option<PathBuf> {
        let path = self.folder.join(BUILD_CONFIG_NAME);
        path.is_file().then_some(path)
    }

    /// Every `<folder>/*/meson-info/<kind file>`, sorted by path.
    pub fn info_files(&self, kind: MesonInfo) -> Result<Vec<PathBuf>> {
        let file_name = kind.file_name();
        let mut files = Vec::new();

        // <folder> (0) / <build> (1) / meson-info (2) / <file> (3)
        let walker = WalkDir::new(&self.folder)
            .max_depth(3)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() != 2 || entry.file_name() == INFO_DIR_NAME);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if entry.depth() == 3
                && entry.file_type().is_file()
                && entry.file_name() == file_name.as_str()
            {
                files.push(entry.into_path());
            }
        }

        debug!("Found {} {} file(s) under {:?}", files.len(), file_name, self.folder);
        Ok(files)
    }

    /// Build directories recorded in every `meson-info.json` under the project.
    pub fn build_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for path in self.info_files(MesonInfo::MesonInfo)? {
            let info = MesonInfoFile::load(&path)?;
            dirs.push(info.directories.build);
        }
        debug!("build_dirs = {:?}", dirs);
        Ok(dirs)
    }
}

/// Introspection files meson writes into `<build>/meson-info/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MesonInfo {
    IntroBenchmarks,
    IntroBuildoptions,
    IntroBuildsystemFiles,
    IntroDependencies,
    IntroInstalled,
    IntroInstallPlan,
    IntroProjectinfo,
    IntroTargets,
    IntroTests,
    MesonInfo,
}

impl MesonInfo {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.stem())
    }

    fn stem(&self) -> &'static str {
        match self {
            MesonInfo::IntroBenchmarks => "intro-benchmarks",
            MesonInfo::IntroBuildoptions => "intro-buildoptions",
            MesonInfo::IntroBuildsystemFiles => "intro-buildsystem-files",
            MesonInfo::IntroDependencies => "intro-dependencies",
            MesonInfo::IntroInstalled => "intro-installed",
            MesonInfo::IntroInstallPlan => "intro-install-plan",
            MesonInfo::IntroProjectinfo => "intro-projectinfo",
            MesonInfo::IntroTargets => "intro-targets",
            MesonInfo::IntroTests => "intro-tests",
            MesonInfo::MesonInfo => "meson-info",
        }
    }
}

/// The parts of `meson-info.json` we read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MesonInfoFile {
    pub directories: InfoDirectories,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meson_version: Option<MesonVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoDirectories {
    pub build: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MesonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl MesonInfoFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
