//! `meson configure`

use super::{CoreOptions, InstallDirs, MergeOptions, SubcommandOptions, merge_flag};
use crate::{command::ArgList, error::Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for `meson configure` on an existing build directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConfigureOptions {
    pub clearcache: bool,
    pub debug: bool,
    pub errorlogs: bool,
    pub stdsplit: bool,
    pub strip: bool,
    pub werror: bool,
    #[serde(flatten)]
    pub core: CoreOptions,
    #[serde(flatten)]
    pub dirs: InstallDirs,
}

impl SubcommandOptions for ConfigureOptions {
    const SUBCOMMAND: &'static str = "configure";

    fn push_args(&self, args: &mut ArgList, build_dir: &Path) -> Result<()> {
        args.flag("clearcache", self.clearcache)?
            .flag("debug", self.debug)?
            .flag("errorlogs", self.errorlogs)?
            .flag("stdsplit", self.stdsplit)?
            .flag("strip", self.strip)?
            .flag("werror", self.werror)?;
        self.core.push_args(args)?;
        self.dirs.push_args(args)?;
        args.arg(build_dir.to_string_lossy());
        Ok(())
    }
}

impl MergeOptions for ConfigureOptions {
    fn merge_from(&mut self, other: &Self) {
        merge_flag(&mut self.clearcache, other.clearcache);
        merge_flag(&mut self.debug, other.debug);
        merge_flag(&mut self.errorlogs, other.errorlogs);
        merge_flag(&mut self.stdsplit, other.stdsplit);
        merge_flag(&mut self.strip, other.strip);
        merge_flag(&mut self.werror, other.werror);
        self.core.merge_from(&other.core);
        self.dirs.merge_from(&other.dirs);
    }
}
