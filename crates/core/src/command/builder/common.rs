//! Option groups shared by `meson setup` and `meson configure`

use super::{MergeOptions, merge_value};
use crate::{
    command::{
        ArgList,
        options::{
            AutoFeatures, Backend, BuildType, DefaultLibrary, Layout, Optimization, Unity,
            WarnLevel, WrapMode,
        },
    },
    error::Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core build options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CoreOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_features: Option<AutoFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildtype: Option<BuildType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_library: Option<DefaultLibrary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unity: Option<Unity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnlevel: Option<WarnLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_mode: Option<WrapMode>,
}

impl CoreOptions {
    pub fn push_args(&self, args: &mut ArgList) -> Result<()> {
        args.value("auto-features", self.auto_features)?
            .value("backend", self.backend)?
            .value("buildtype", self.buildtype)?
            .value("default-library", self.default_library)?
            .value("layout", self.layout)?
            .value("optimization", self.optimization)?
            .value("unity", self.unity)?
            .value("warnlevel", self.warnlevel)?
            .value("wrap-mode", self.wrap_mode)?;
        Ok(())
    }
}

impl MergeOptions for CoreOptions {
    fn merge_from(&mut self, other: &Self) {
        merge_value(&mut self.auto_features, &other.auto_features);
        merge_value(&mut self.backend, &other.backend);
        merge_value(&mut self.buildtype, &other.buildtype);
        merge_value(&mut self.default_library, &other.default_library);
        merge_value(&mut self.layout, &other.layout);
        merge_value(&mut self.optimization, &other.optimization);
        merge_value(&mut self.unity, &other.unity);
        merge_value(&mut self.warnlevel, &other.warnlevel);
        merge_value(&mut self.wrap_mode, &other.wrap_mode);
    }
}

/// Installation directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct InstallDirs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datadir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includedir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infodir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libdir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libexecdir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localstatedir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localedir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sbindir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharedstatedir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysconfdir: Option<PathBuf>,
}

impl InstallDirs {
    pub fn push_args(&self, args: &mut ArgList) -> Result<()> {
        let dirs: [(&str, &Option<PathBuf>); 13] = [
            ("bindir", &self.bindir),
            ("datadir", &self.datadir),
            ("includedir", &self.includedir),
            ("infodir", &self.infodir),
            ("libdir", &self.libdir),
            ("libexecdir", &self.libexecdir),
            ("localstatedir", &self.localstatedir),
            ("localedir", &self.localedir),
            ("mandir", &self.mandir),
            ("prefix", &self.prefix),
            ("sbindir", &self.sbindir),
            ("sharedstatedir", &self.sharedstatedir),
            ("sysconfdir", &self.sysconfdir),
        ];
        for (name, dir) in dirs {
            args.value(name, dir.as_deref().map(Path::display))?;
        }
        Ok(())
    }
}

impl MergeOptions for InstallDirs {
    fn merge_from(&mut self, other: &Self) {
        merge_value(&mut self.bindir, &other.bindir);
        merge_value(&mut self.datadir, &other.datadir);
        merge_value(&mut self.includedir, &other.includedir);
        merge_value(&mut self.infodir, &other.infodir);
        merge_value(&mut self.libdir, &other.libdir);
        merge_value(&mut self.libexecdir, &other.libexecdir);
        merge_value(&mut self.localstatedir, &other.localstatedir);
        merge_value(&mut self.localedir, &other.localedir);
        merge_value(&mut self.mandir, &other.mandir);
        merge_value(&mut self.prefix, &other.prefix);
        merge_value(&mut self.sbindir, &other.sbindir);
        merge_value(&mut self.sharedstatedir, &other.sharedstatedir);
        merge_value(&mut self.sysconfdir, &other.sysconfdir);
    }
}
