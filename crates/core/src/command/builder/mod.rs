//! Builders mapping typed options onto meson subcommand lines

mod common;
mod compile;
mod configure;
mod meson_test;
mod setup;

pub use common::{CoreOptions, InstallDirs};
pub use compile::CompileOptions;
pub use configure::ConfigureOptions;
pub use meson_test::TestOptions;
pub use setup::SetupOptions;

use crate::{
    command::{ArgList, MesonCommand},
    error::Result,
    tool::MesonTool,
};
use std::path::Path;

/// Options for one meson subcommand.
///
/// Implementors only push their own tokens; `build` supplies the program and
/// subcommand and logs the finished line.
pub trait SubcommandOptions {
    const SUBCOMMAND: &'static str;

    fn push_args(&self, args: &mut ArgList, build_dir: &Path) -> Result<()>;

    fn build(&self, tool: &MesonTool, build_dir: &Path) -> Result<MesonCommand> {
        let mut args = ArgList::new(tool, Self::SUBCOMMAND);
        self.push_args(&mut args, build_dir)?;
        let command = MesonCommand::new(args.into_args());
        tracing::debug!("Meson::{} => {:?}", Self::SUBCOMMAND, command.args);
        Ok(command)
    }
}

/// Overlay set values from `other`: `true` bools win, `Some` options replace.
pub trait MergeOptions {
    fn merge_from(&mut self, other: &Self);
}

pub(crate) fn merge_flag(target: &mut bool, other: bool) {
    *target |= other;
}

pub(crate) fn merge_value<T: Clone>(target: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        target.clone_from(other);
    }
}
