//! Main runner that turns user actions into meson invocations

use crate::{
    command::{
        CompileOptions, ConfigureOptions, MergeOptions, MesonCommand, SetupOptions,
        SubcommandOptions, TestOptions,
    },
    config::{Settings, SettingsStore},
    error::{Error, Result},
    interfaces::Host,
    project::Project,
    relay::ProcessRunner,
    sink::{OutputPanels, OutputSink},
    tool::MesonTool,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Product tag in front of every status message
pub const PKG_NAME: &str = "Meson";

/// How an action ended, as far as the user is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// meson ran and exited nonzero; its diagnostics are in the output panel
    Failed(i32),
    /// The user declined a confirmation; nothing was spawned
    Cancelled,
}

impl Outcome {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            Outcome::Succeeded
        } else {
            Outcome::Failed(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Status texts for one action
struct Messages {
    success: &'static str,
    failure: &'static str,
}

const SETUP: Messages = Messages {
    success: "Project setup complete",
    failure: "Failed to setup project, please refer to output panel",
};

const CONFIGURE: Messages = Messages {
    success: "Project configured successfully",
    failure: "Failed to configure project, please refer to output panel",
};

const COMPILE: Messages = Messages {
    success: "Project compiled successfully",
    failure: "Compilation failed, please refer to output panel",
};

const TEST: Messages = Messages {
    success: "Tests passed",
    failure: "Tests failed, please refer to output panel",
};

/// The setup / configure / compile / test actions for one project.
///
/// Constructing one requires a resolved [`MesonTool`], so a missing meson
/// stops everything before any action exists.
pub struct MesonRunner {
    tool: MesonTool,
    project: Project,
    store: SettingsStore,
    runner: ProcessRunner,
}

impl MesonRunner {
    pub fn new(tool: MesonTool, project: Project, settings: Settings) -> Self {
        let runner = process_runner(&project, &settings);
        Self {
            tool,
            project,
            store: SettingsStore::with_settings(settings),
            runner,
        }
    }

    /// Load the project's settings and resolve meson, failing fast when it is missing.
    ///
    /// The settings file is read once here; every later action is served from the store.
    pub fn load(project: Project) -> Result<Self> {
        let store = SettingsStore::new(project.folder());
        let settings = store.get()?;
        let tool = MesonTool::resolve(settings.meson_binary.as_deref())?;
        let runner = process_runner(&project, settings);
        Ok(Self {
            tool,
            project,
            store,
            runner,
        })
    }

    pub fn tool(&self) -> &MesonTool {
        &self.tool
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn settings(&self) -> Result<&Settings> {
        self.store.get()
    }

    /// `meson setup <build_dir>` from the folder holding `meson.build`.
    pub fn setup<H, S>(
        &self,
        host: &H,
        panels: &mut OutputPanels<S>,
        build_dir: &Path,
        options: &SetupOptions,
    ) -> Result<Outcome>
    where
        H: Host + ?Sized,
        S: OutputSink,
    {
        let Some(config_path) = self.project.build_config_path() else {
            host.message_dialog(
                "The meson.build file wasn't found, check that the project folder is correct.",
            );
            return Err(Error::NoBuildDescriptor(self.project.folder().to_path_buf()));
        };

        if build_dir.is_absolute() {
            let message = format!(
                "\"{}\" is an absolute path!\nDo you want to setup anyway?",
                build_dir.display()
            );
            if !host.ok_cancel_dialog(&message, "Continue") {
                info!("Setup of {:?} cancelled by the user", build_dir);
                return Ok(Outcome::Cancelled);
            }
        }

        self.status(host, &format!("Setting up: {}", build_dir.display()));

        let mut merged = self.settings()?.setup.clone();
        merged.merge_from(options);
        let mut command = merged.build(&self.tool, build_dir)?;
        if let Some(config_dir) = config_path.parent() {
            command = command.with_working_dir(config_dir);
        }

        let code = self.execute(panels, command)?;
        Ok(self.report(host, code, &SETUP))
    }

    /// `meson configure <build_dir>` on an existing build directory.
    pub fn configure<H, S>(
        &self,
        host: &H,
        panels: &mut OutputPanels<S>,
        build_dir: Option<&Path>,
        options: &ConfigureOptions,
    ) -> Result<Outcome>
    where
        H: Host + ?Sized,
        S: OutputSink,
    {
        let build_dir = self.select_build_dir(host, build_dir, "configure")?;
        self.status(host, &format!("Configuring: {}", build_dir.display()));

        let mut merged = self.settings()?.configure.clone();
        merged.merge_from(options);
        let command = merged.build(&self.tool, &build_dir)?;

        let code = self.execute(panels, command)?;
        Ok(self.report(host, code, &CONFIGURE))
    }

    /// `meson compile -C <build_dir>`.
    pub fn compile<H, S>(
        &self,
        host: &H,
        panels: &mut OutputPanels<S>,
        build_dir: Option<&Path>,
        options: &CompileOptions,
    ) -> Result<Outcome>
    where
        H: Host + ?Sized,
        S: OutputSink,
    {
        let build_dir = self.select_build_dir(host, build_dir, "compile")?;
        self.status(host, "Project compilation started");

        let mut merged = self.settings()?.compile.clone();
        merged.merge_from(options);
        let command = merged.build(&self.tool, &build_dir)?;

        let code = self.execute(panels, command)?;
        Ok(self.report(host, code, &COMPILE))
    }

    /// `meson test -C <build_dir>`.
    pub fn test<H, S>(
        &self,
        host: &H,
        panels: &mut OutputPanels<S>,
        build_dir: Option<&Path>,
        options: &TestOptions,
    ) -> Result<Outcome>
    where
        H: Host + ?Sized,
        S: OutputSink,
    {
        let build_dir = self.select_build_dir(host, build_dir, "test")?;
        self.status(host, "Running tests");

        let mut merged = self.settings()?.test.clone();
        merged.merge_from(options);
        let command = merged.build(&self.tool, &build_dir)?;

        let code = self.execute(panels, command)?;
        Ok(self.report(host, code, &TEST))
    }

    pub fn toggle_panel<S: OutputSink>(&self, panels: &mut OutputPanels<S>) -> Result<()> {
        panels.open(&self.settings()?.panel_name, false)?.toggle();
        Ok(())
    }

    pub fn clear_panel<S: OutputSink>(&self, panels: &mut OutputPanels<S>) -> Result<()> {
        panels.open(&self.settings()?.panel_name, true)?;
        Ok(())
    }

    /// Explicit directory, else the only discovered one, else the user's pick.
    fn select_build_dir<H: Host + ?Sized>(
        &self,
        host: &H,
        explicit: Option<&Path>,
        action: &str,
    ) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }

        let mut candidates = self.project.build_dirs()?;
        match candidates.len() {
            0 => {
                host.message_dialog(&format!("Meson {action}: no build directories found."));
                Err(Error::NoBuildDirectoriesFound)
            }
            1 => {
                let dir = candidates.remove(0);
                debug!("Only one build directory, using {:?}", dir);
                Ok(dir)
            }
            count => match host.choose_build_dir(&candidates) {
                Some(dir) => Ok(dir),
                None => {
                    self.status(host, "No build directory selected");
                    Err(Error::NoBuildDirectorySelected { candidates: count })
                }
            },
        }
    }

    fn execute<S: OutputSink>(
        &self,
        panels: &mut OutputPanels<S>,
        command: MesonCommand,
    ) -> Result<i32> {
        let settings = self.settings()?;
        let command = command.with_envs(&settings.env);
        let sink = panels.open(&settings.panel_name, settings.clear_panel_on_run)?;
        self.runner.run(sink, &command)
    }

    fn report<H: Host + ?Sized>(&self, host: &H, code: i32, messages: &Messages) -> Outcome {
        let outcome = Outcome::from_exit_code(code);
        let message = if outcome.is_success() {
            messages.success
        } else {
            messages.failure
        };
        self.status(host, message);
        outcome
    }

    fn status<H: Host + ?Sized>(&self, host: &H, message: &str) {
        host.status_message(&format!("{PKG_NAME}: {message}"));
    }
}

fn process_runner(project: &Project, settings: &Settings) -> ProcessRunner {
    ProcessRunner::new(settings.panel_name.clone())
        .with_project_name(project.name())
        .with_default_dir(project.folder())
}
