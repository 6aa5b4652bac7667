use anyhow::{Context, Result};
use meson_runner_core::{
    CompileOptions, ConfigureOptions, MesonRunner, OutputPanels, Outcome, Project, SetupOptions,
    TestOptions,
};
use std::io::{self, Stdout};
use std::path::Path;
use tracing::debug;

use crate::display::{TerminalHost, TerminalSink};

/// Everything an action needs: resolved meson, the prompt host and stdout panels.
pub struct Session {
    runner: MesonRunner,
    host: TerminalHost,
    panels: OutputPanels<TerminalSink<Stdout>>,
}

impl Session {
    /// Load settings and resolve meson for the project in `project_dir`.
    pub fn open(project_dir: &Path, assume_yes: bool) -> Result<Self> {
        let folder = std::fs::canonicalize(project_dir)
            .with_context(|| format!("Project folder {} not found", project_dir.display()))?;
        let runner = MesonRunner::load(Project::from_folder(folder))?;
        debug!("Using meson at {:?}", runner.tool().path());

        let panels = OutputPanels::new(|_: &str| TerminalSink::new(io::stdout()))
            .with_syntax_files(runner.settings()?.syntax_files.clone());

        Ok(Self {
            runner,
            host: TerminalHost::new(assume_yes),
            panels,
        })
    }

    pub fn runner(&self) -> &MesonRunner {
        &self.runner
    }
}

/// Process exit code for a finished action
pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Succeeded | Outcome::Cancelled => 0,
        Outcome::Failed(code) => code,
    }
}

pub fn setup_command(session: &mut Session, build_dir: &Path, options: &SetupOptions) -> Result<i32> {
    let outcome = session
        .runner
        .setup(&session.host, &mut session.panels, build_dir, options)?;
    Ok(exit_code(outcome))
}

pub fn configure_command(
    session: &mut Session,
    build_dir: Option<&Path>,
    options: &ConfigureOptions,
) -> Result<i32> {
    let outcome = session
        .runner
        .configure(&session.host, &mut session.panels, build_dir, options)?;
    Ok(exit_code(outcome))
}

pub fn compile_command(
    session: &mut Session,
    build_dir: Option<&Path>,
    options: &CompileOptions,
) -> Result<i32> {
    let outcome = session
        .runner
        .compile(&session.host, &mut session.panels, build_dir, options)?;
    Ok(exit_code(outcome))
}

pub fn test_command(
    session: &mut Session,
    build_dir: Option<&Path>,
    options: &TestOptions,
) -> Result<i32> {
    let outcome = session
        .runner
        .test(&session.host, &mut session.panels, build_dir, options)?;
    Ok(exit_code(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(Outcome::Succeeded), 0);
        assert_eq!(exit_code(Outcome::Cancelled), 0);
        assert_eq!(exit_code(Outcome::Failed(3)), 3);
        assert_eq!(exit_code(Outcome::from_exit_code(127)), 127);
    }
}
