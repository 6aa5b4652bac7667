//! `meson setup`

use super::{CoreOptions, InstallDirs, MergeOptions, SubcommandOptions, merge_flag};
use crate::{command::ArgList, error::Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for `meson setup`. Run `meson setup --help` for their meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SetupOptions {
    pub debug: bool,
    pub errorlogs: bool,
    pub fatal_meson_warnings: bool,
    pub reconfigure: bool,
    pub stdsplit: bool,
    pub strip: bool,
    pub werror: bool,
    pub wipe: bool,
    #[serde(flatten)]
    pub core: CoreOptions,
    #[serde(flatten)]
    pub dirs: InstallDirs,
}

impl SubcommandOptions for SetupOptions {
    const SUBCOMMAND: &'static str = "setup";

    fn push_args(&self, args: &mut ArgList, build_dir: &Path) -> Result<()> {
        args.flag("debug", self.debug)?
            .flag("errorlogs", self.errorlogs)?
            .flag("fatal-meson-warnings", self.fatal_meson_warnings)?
            .flag("reconfigure", self.reconfigure)?
            .flag("stdsplit", self.stdsplit)?
            .flag("strip", self.strip)?
            .flag("werror", self.werror)?
            .flag("wipe", self.wipe)?;
        self.core.push_args(args)?;
        self.dirs.push_args(args)?;
        args.arg(build_dir.to_string_lossy());
        Ok(())
    }
}

impl MergeOptions for SetupOptions {
    fn merge_from(&mut self, other: &Self) {
        merge_flag(&mut self.debug, other.debug);
        merge_flag(&mut self.errorlogs, other.errorlogs);
        merge_flag(&mut self.fatal_meson_warnings, other.fatal_meson_warnings);
        merge_flag(&mut self.reconfigure, other.reconfigure);
        merge_flag(&mut self.stdsplit, other.stdsplit);
        merge_flag(&mut self.strip, other.strip);
        merge_flag(&mut self.werror, other.werror);
        merge_flag(&mut self.wipe, other.wipe);
        self.core.merge_from(&other.core);
        self.dirs.merge_from(&other.dirs);
    }
}
