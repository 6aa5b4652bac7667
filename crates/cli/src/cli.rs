use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use meson_runner_core::command::{
    CompileOptions, ConfigureOptions, CoreOptions, InstallDirs, SetupOptions, TestOptions,
    options::{
        AutoFeatures, Backend, BuildType, DefaultLibrary, Layout, Optimization, Unity, WarnLevel,
        WrapMode,
    },
};
use std::path::PathBuf;

use crate::commands::{
    build_dirs_command, compile_command, configure_command, init_command, locate_command,
    setup_command, test_command, Session,
};

#[derive(Parser, Debug)]
#[command(name = "meson-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Runner {
    /// Project folder containing meson.build (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure a new build directory
    Setup {
        /// Build directory, relative to the project folder
        build_dir: PathBuf,

        #[command(flatten)]
        flags: SetupArgs,
    },
    /// Change options of an existing build directory
    Configure {
        /// Build directory (picked from the project's build directories when omitted)
        #[arg(short = 'C', long)]
        build_dir: Option<PathBuf>,

        #[command(flatten)]
        flags: ConfigureArgs,
    },
    /// Build the project
    #[command(visible_alias = "c")]
    Compile {
        /// Build directory (picked from the project's build directories when omitted)
        #[arg(short = 'C', long)]
        build_dir: Option<PathBuf>,

        /// Clean the build directory
        #[arg(long)]
        clean: bool,

        /// Show more verbose output
        #[arg(long)]
        verbose: bool,

        /// Number of worker jobs
        #[arg(short, long)]
        jobs: Option<u32>,
    },
    /// Run the project's tests
    #[command(visible_alias = "t")]
    Test {
        /// Build directory (picked from the project's build directories when omitted)
        #[arg(short = 'C', long)]
        build_dir: Option<PathBuf>,

        #[command(flatten)]
        flags: TestArgs,

        /// Tests to run: `name`, `subproject:name` or `subproject:`
        tests: Vec<String>,
    },
    /// List the build directories found under the project
    BuildDirs,
    /// Print the meson executable that would be used
    Locate,
    /// Write a .meson-runner.json with the default settings
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

impl Runner {
    /// Execute the command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        // These need no meson; everything else does.
        match self.command {
            Commands::BuildDirs => return build_dirs_command(&project_dir),
            Commands::Init { force } => return init_command(&project_dir, force),
            _ => {}
        }

        let mut session = Session::open(&project_dir, self.yes)?;
        match self.command {
            Commands::Setup { build_dir, flags } => {
                setup_command(&mut session, &build_dir, &flags.to_options())
            }
            Commands::Configure { build_dir, flags } => {
                configure_command(&mut session, build_dir.as_deref(), &flags.to_options())
            }
            Commands::Compile {
                build_dir,
                clean,
                verbose,
                jobs,
            } => {
                let options = CompileOptions {
                    clean,
                    verbose,
                    jobs,
                };
                compile_command(&mut session, build_dir.as_deref(), &options)
            }
            Commands::Test {
                build_dir,
                flags,
                tests,
            } => test_command(&mut session, build_dir.as_deref(), &flags.to_options(tests)),
            Commands::Locate => locate_command(&session),
            Commands::BuildDirs => build_dirs_command(&project_dir),
            Commands::Init { force } => init_command(&project_dir, force),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CoreArgs {
    /// Override value of all 'auto' features
    #[arg(long)]
    pub auto_features: Option<AutoFeatures>,
    /// Backend to use
    #[arg(long)]
    pub backend: Option<Backend>,
    /// Build type to use
    #[arg(long)]
    pub buildtype: Option<BuildType>,
    /// Default library type
    #[arg(long)]
    pub default_library: Option<DefaultLibrary>,
    /// Build directory layout
    #[arg(long)]
    pub layout: Option<Layout>,
    /// Optimization level
    #[arg(long)]
    pub optimization: Option<Optimization>,
    /// Unity build
    #[arg(long)]
    pub unity: Option<Unity>,
    /// Compiler warning level to use
    #[arg(long)]
    pub warnlevel: Option<WarnLevel>,
    /// Wrap mode
    #[arg(long)]
    pub wrap_mode: Option<WrapMode>,
}

impl CoreArgs {
    fn to_options(&self) -> CoreOptions {
        CoreOptions {
            auto_features: self.auto_features,
            backend: self.backend,
            buildtype: self.buildtype,
            default_library: self.default_library,
            layout: self.layout,
            optimization: self.optimization,
            unity: self.unity,
            warnlevel: self.warnlevel,
            wrap_mode: self.wrap_mode,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct DirArgs {
    /// Installation prefix
    #[arg(long)]
    pub prefix: Option<PathBuf>,
    /// Executable directory
    #[arg(long)]
    pub bindir: Option<PathBuf>,
    /// Data file directory
    #[arg(long)]
    pub datadir: Option<PathBuf>,
    /// Header file directory
    #[arg(long)]
    pub includedir: Option<PathBuf>,
    /// Info page directory
    #[arg(long)]
    pub infodir: Option<PathBuf>,
    /// Library directory
    #[arg(long)]
    pub libdir: Option<PathBuf>,
    /// Library executable directory
    #[arg(long)]
    pub libexecdir: Option<PathBuf>,
    /// Locale data directory
    #[arg(long)]
    pub localedir: Option<PathBuf>,
    /// Localstate data directory
    #[arg(long)]
    pub localstatedir: Option<PathBuf>,
    /// Manual page directory
    #[arg(long)]
    pub mandir: Option<PathBuf>,
    /// System executable directory
    #[arg(long)]
    pub sbindir: Option<PathBuf>,
    /// Architecture-independent data directory
    #[arg(long)]
    pub sharedstatedir: Option<PathBuf>,
    /// Sysconf data directory
    #[arg(long)]
    pub sysconfdir: Option<PathBuf>,
}

impl DirArgs {
    fn to_options(&self) -> InstallDirs {
        InstallDirs {
            bindir: self.bindir.clone(),
            datadir: self.datadir.clone(),
            includedir: self.includedir.clone(),
            infodir: self.infodir.clone(),
            libdir: self.libdir.clone(),
            libexecdir: self.libexecdir.clone(),
            localstatedir: self.localstatedir.clone(),
            localedir: self.localedir.clone(),
            mandir: self.mandir.clone(),
            prefix: self.prefix.clone(),
            sbindir: self.sbindir.clone(),
            sharedstatedir: self.sharedstatedir.clone(),
            sysconfdir: self.sysconfdir.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Debug
    #[arg(long)]
    pub debug: bool,
    /// Print the logs from failing tests
    #[arg(long)]
    pub errorlogs: bool,
    /// Make all Meson warnings fatal
    #[arg(long)]
    pub fatal_meson_warnings: bool,
    /// Set options and reconfigure the project
    #[arg(long)]
    pub reconfigure: bool,
    /// Split stdout and stderr in test logs
    #[arg(long)]
    pub stdsplit: bool,
    /// Strip targets on install
    #[arg(long)]
    pub strip: bool,
    /// Treat warnings as errors
    #[arg(long)]
    pub werror: bool,
    /// Wipe build directory and reconfigure using previous options
    #[arg(long)]
    pub wipe: bool,
    #[command(flatten)]
    pub core: CoreArgs,
    #[command(flatten)]
    pub dirs: DirArgs,
}

impl SetupArgs {
    pub fn to_options(&self) -> SetupOptions {
        SetupOptions {
            debug: self.debug,
            errorlogs: self.errorlogs,
            fatal_meson_warnings: self.fatal_meson_warnings,
            reconfigure: self.reconfigure,
            stdsplit: self.stdsplit,
            strip: self.strip,
            werror: self.werror,
            wipe: self.wipe,
            core: self.core.to_options(),
            dirs: self.dirs.to_options(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ConfigureArgs {
    /// Clear cached state (e.g. found dependencies)
    #[arg(long)]
    pub clearcache: bool,
    /// Debug
    #[arg(long)]
    pub debug: bool,
    /// Print the logs from failing tests
    #[arg(long)]
    pub errorlogs: bool,
    /// Split stdout and stderr in test logs
    #[arg(long)]
    pub stdsplit: bool,
    /// Strip targets on install
    #[arg(long)]
    pub strip: bool,
    /// Treat warnings as errors
    #[arg(long)]
    pub werror: bool,
    #[command(flatten)]
    pub core: CoreArgs,
    #[command(flatten)]
    pub dirs: DirArgs,
}

impl ConfigureArgs {
    pub fn to_options(&self) -> ConfigureOptions {
        ConfigureOptions {
            clearcache: self.clearcache,
            debug: self.debug,
            errorlogs: self.errorlogs,
            stdsplit: self.stdsplit,
            strip: self.strip,
            werror: self.werror,
            core: self.core.to_options(),
            dirs: self.dirs.to_options(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct TestArgs {
    /// Run benchmarks instead of tests
    #[arg(long)]
    pub benchmark: bool,
    /// Run test under gdb
    #[arg(long)]
    pub gdb: bool,
    /// Do not rebuild before running tests
    #[arg(long)]
    pub no_rebuild: bool,
    /// Do not split stderr and stdout in test logs
    #[arg(long)]
    pub no_stdsplit: bool,
    /// Print failing tests' logs
    #[arg(long)]
    pub print_errorlogs: bool,
    /// Produce less output to the terminal
    #[arg(long)]
    pub quiet: bool,
    /// Do not redirect stdout and stderr
    #[arg(long)]
    pub verbose: bool,
    /// Path to the gdb binary
    #[arg(long)]
    pub gdb_path: Option<PathBuf>,
    /// Base name for log file
    #[arg(long)]
    pub logbase: Option<String>,
    /// Do not run tests belonging to the given suite
    #[arg(long)]
    pub no_suite: Option<String>,
    /// How many parallel processes to use
    #[arg(long)]
    pub num_processes: Option<u32>,
    /// Number of times to run the tests
    #[arg(long)]
    pub repeat: Option<u32>,
    /// Which test setup to use
    #[arg(long)]
    pub setup: Option<String>,
    /// Only run tests belonging to the given suite
    #[arg(long)]
    pub suite: Option<String>,
    /// Multiplier for test timeouts (<= 0 disables them)
    #[arg(long, allow_negative_numbers = true)]
    pub timeout_multiplier: Option<i32>,
    /// Wrapper to run tests with (e.g. Valgrind)
    #[arg(long)]
    pub wrapper: Option<String>,
    /// Argument passed to the tests (repeatable)
    #[arg(long = "test-arg", allow_hyphen_values = true)]
    pub test_args: Vec<String>,
}

impl TestArgs {
    pub fn to_options(&self, tests: Vec<String>) -> TestOptions {
        TestOptions {
            benchmark: self.benchmark,
            gdb: self.gdb,
            no_rebuild: self.no_rebuild,
            no_stdsplit: self.no_stdsplit,
            print_errorlogs: self.print_errorlogs,
            quiet: self.quiet,
            verbose: self.verbose,
            gdb_path: self.gdb_path.clone(),
            logbase: self.logbase.clone(),
            no_suite: self.no_suite.clone(),
            num_processes: self.num_processes,
            repeat: self.repeat,
            setup: self.setup.clone(),
            suite: self.suite.clone(),
            timeout_multiplier: self.timeout_multiplier,
            wrapper: self.wrapper.clone(),
            test_args: self.test_args.clone(),
            tests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup_flags() {
        let runner = Runner::parse_from([
            "meson-runner",
            "setup",
            "build",
            "--debug",
            "--buildtype",
            "release",
            "--prefix",
            "/opt/demo",
        ]);

        let Commands::Setup { build_dir, flags } = runner.command else {
            panic!("expected setup");
        };
        assert_eq!(build_dir, PathBuf::from("build"));
        let options = flags.to_options();
        assert!(options.debug);
        assert!(!options.wipe);
        assert_eq!(options.core.buildtype, Some(BuildType::Release));
        assert_eq!(options.dirs.prefix, Some(PathBuf::from("/opt/demo")));
    }

    #[test]
    fn test_parse_rejects_unknown_enum_value() {
        let result = Runner::try_parse_from(["meson-runner", "setup", "build", "--unity", "maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_test_selection() {
        let runner = Runner::try_parse_from([
            "meson-runner",
            "--project",
            "/proj",
            "test",
            "-C",
            "build",
            "--suite",
            "unit",
            "--test-arg",
            "--gtest_brief=1",
            "core:parser",
        ])
        .unwrap();

        assert_eq!(runner.project, Some(PathBuf::from("/proj")));
        let Commands::Test {
            build_dir,
            flags,
            tests,
        } = runner.command
        else {
            panic!("expected test");
        };
        assert_eq!(build_dir, Some(PathBuf::from("build")));
        let options = flags.to_options(tests);
        assert_eq!(options.suite.as_deref(), Some("unit"));
        assert_eq!(options.test_args, vec!["--gtest_brief=1"]);
        assert_eq!(options.tests, vec!["core:parser"]);
    }

    #[test]
    fn test_global_yes_after_subcommand() {
        let runner = Runner::try_parse_from(["meson-runner", "compile", "--yes", "-j", "4"]).unwrap();
        assert!(runner.yes);
        assert!(matches!(
            runner.command,
            Commands::Compile { jobs: Some(4), .. }
        ));
    }
}
