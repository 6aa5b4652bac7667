//! Argument list construction

use crate::{
    error::{Error, Result},
    tool::MesonTool,
};
use std::fmt::Display;

/// Ordered token list for one meson invocation, starting with the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgList {
    args: Vec<String>,
}

impl ArgList {
    pub fn new(tool: &MesonTool, subcommand: &str) -> Self {
        Self {
            args: vec![tool.program(), subcommand.to_string()],
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// `--name` when `enabled`, nothing otherwise.
    pub fn flag(&mut self, name: &str, enabled: bool) -> Result<&mut Self> {
        check_flag_name(name)?;
        if enabled {
            self.args.push(format!("--{name}"));
        }
        Ok(self)
    }

    /// `--name value` when set, nothing otherwise.
    pub fn value<T: Display>(&mut self, name: &str, value: Option<T>) -> Result<&mut Self> {
        check_flag_name(name)?;
        if let Some(value) = value {
            self.args.push(format!("--{name}"));
            self.args.push(value.to_string());
        }
        Ok(self)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

/// Flag names are passed through verbatim, so they must already be in
/// meson's spelling.
pub fn is_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn check_flag_name(name: &str) -> Result<()> {
    if is_flag_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidFlagName(name.to_string()))
    }
}
