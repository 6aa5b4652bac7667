//! `meson compile`

use super::{MergeOptions, SubcommandOptions, merge_flag, merge_value};
use crate::{command::ArgList, error::Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CompileOptions {
    /// Clean the build directory
    pub clean: bool,
    pub verbose: bool,
    /// Worker jobs; values below 1 let the backend guess
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<u32>,
}

impl SubcommandOptions for CompileOptions {
    const SUBCOMMAND: &'static str = "compile";

    fn push_args(&self, args: &mut ArgList, build_dir: &Path) -> Result<()> {
        args.arg("-C").arg(build_dir.to_string_lossy());
        args.flag("clean", self.clean)?
            .flag("verbose", self.verbose)?
            .value("jobs", self.jobs)?;
        Ok(())
    }
}

impl MergeOptions for CompileOptions {
    fn merge_from(&mut self, other: &Self) {
        merge_flag(&mut self.clean, other.clean);
        merge_flag(&mut self.verbose, other.verbose);
        merge_value(&mut self.jobs, &other.jobs);
    }
}
