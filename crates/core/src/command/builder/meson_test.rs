//! `meson test`

use super::{MergeOptions, SubcommandOptions, merge_flag, merge_value};
use crate::{command::ArgList, error::Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for `meson test`.
///
/// `tests` selects tests by name (`name`, `subproject:name` or
/// `subproject:`); `test_args` are forwarded to every selected test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TestOptions {
    pub benchmark: bool,
    pub gdb: bool,
    pub no_rebuild: bool,
    pub no_stdsplit: bool,
    pub print_errorlogs: bool,
    pub quiet: bool,
    pub verbose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdb_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logbase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_processes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_multiplier: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<String>,
}

impl SubcommandOptions for TestOptions {
    const SUBCOMMAND: &'static str = "test";

    fn push_args(&self, args: &mut ArgList, build_dir: &Path) -> Result<()> {
        args.arg("-C").arg(build_dir.to_string_lossy());
        args.flag("benchmark", self.benchmark)?
            .flag("gdb", self.gdb)?
            .flag("no-rebuild", self.no_rebuild)?
            .flag("no-stdsplit", self.no_stdsplit)?
            .flag("print-errorlogs", self.print_errorlogs)?
            .flag("quiet", self.quiet)?
            .flag("verbose", self.verbose)?;
        args.value("gdb-path", self.gdb_path.as_deref().map(Path::display))?
            .value("logbase", self.logbase.as_deref())?
            .value("no-suite", self.no_suite.as_deref())?
            .value("num-processes", self.num_processes)?
            .value("repeat", self.repeat)?
            .value("setup", self.setup.as_deref())?
            .value("suite", self.suite.as_deref())?
            .value("timeout-multiplier", self.timeout_multiplier)?
            .value("wrapper", self.wrapper.as_deref())?;

        let test_args = (!self.test_args.is_empty()).then(|| self.test_args.join(" "));
        args.value("test-args", test_args)?;

        for test in &self.tests {
            args.arg(test.as_str());
        }
        Ok(())
    }
}

impl MergeOptions for TestOptions {
    fn merge_from(&mut self, other: &Self) {
        merge_flag(&mut self.benchmark, other.benchmark);
        merge_flag(&mut self.gdb, other.gdb);
        merge_flag(&mut self.no_rebuild, other.no_rebuild);
        merge_flag(&mut self.no_stdsplit, other.no_stdsplit);
        merge_flag(&mut self.print_errorlogs, other.print_errorlogs);
        merge_flag(&mut self.quiet, other.quiet);
        merge_flag(&mut self.verbose, other.verbose);
        merge_value(&mut self.gdb_path, &other.gdb_path);
        merge_value(&mut self.logbase, &other.logbase);
        merge_value(&mut self.no_suite, &other.no_suite);
        merge_value(&mut self.num_processes, &other.num_processes);
        merge_value(&mut self.repeat, &other.repeat);
        merge_value(&mut self.setup, &other.setup);
        merge_value(&mut self.suite, &other.suite);
        merge_value(&mut self.timeout_multiplier, &other.timeout_multiplier);
        merge_value(&mut self.wrapper, &other.wrapper);
        if !other.test_args.is_empty() {
            self.test_args.clone_from(&other.test_args);
        }
        if !other.tests.is_empty() {
            self.tests.clone_from(&other.tests);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::MesonTool;

    #[test]
    fn test_test_args_are_one_token() {
        let tool = MesonTool::at_unchecked(PathBuf::from("/usr/bin/meson"));
        let options = TestOptions {
            print_errorlogs: true,
            num_processes: Some(2),
            suite: Some("unit".to_string()),
            test_args: vec!["--gtest_color=no".to_string(), "-v".to_string()],
            tests: vec!["core:parser".to_string(), "lexer".to_string()],
            ..Default::default()
        };

        let command = options.build(&tool, Path::new("build")).unwrap();
        assert_eq!(
            command.args,
            vec![
                "/usr/bin/meson",
                "test",
                "-C",
                "build",
                "--print-errorlogs",
                "--num-processes",
                "2",
                "--suite",
                "unit",
                "--test-args",
                "--gtest_color=no -v",
                "core:parser",
                "lexer",
            ]
        );
    }

    #[test]
    fn test_merge_replaces_test_selection() {
        let mut defaults = TestOptions {
            tests: vec!["all".to_string()],
            repeat: Some(3),
            ..Default::default()
        };
        defaults.merge_from(&TestOptions {
            tests: vec!["one".to_string()],
            ..Default::default()
        });
        assert_eq!(defaults.tests, vec!["one"]);
        assert_eq!(defaults.repeat, Some(3));
    }
}
