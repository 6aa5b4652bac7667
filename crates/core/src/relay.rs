//! Running meson and relaying its output into a sink
//!
//! One invocation goes `Idle -> ShowingPanel -> HeaderWritten -> Streaming ->
//! Drained -> Terminated(code)`. The sink is borrowed mutably for the whole
//! invocation, so nothing else can write to it until the exit code is back.

use crate::{
    command::MesonCommand,
    error::{Error, Result},
    sink::{OutputSink, panel_id},
};
use std::future::{Future, poll_fn};
use std::io;
use std::mem;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::process::Stdio;
use std::task::Poll;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, trace, warn};

/// Exit code reported when the child has none (killed by a signal).
pub const NO_EXIT_CODE: i32 = 1;

const PROJECT_FILE_SUFFIX: &str = ".sublime-project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Idle,
    ShowingPanel,
    HeaderWritten,
    Streaming { open_streams: usize },
    Drained,
    Terminated(i32),
}

/// Spawns meson invocations and streams their output into a sink.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    channel: String,
    project_name: String,
    default_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            project_name: String::new(),
            default_dir: None,
        }
    }

    pub fn with_project_name(mut self, name: &str) -> Self {
        self.project_name = name
            .strip_suffix(PROJECT_FILE_SUFFIX)
            .unwrap_or(name)
            .to_string();
        self
    }

    /// Working directory for commands that do not carry one.
    pub fn with_default_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_dir = Some(dir.into());
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// `>>> output.<channel>[@<project>]:# <command line>`
    pub fn header(&self, command: &MesonCommand) -> String {
        let at = if self.project_name.is_empty() { "" } else { "@" };
        format!(
            ">>> {}{}{}:# {}\n",
            panel_id(&self.channel),
            at,
            self.project_name,
            command.command_line()
        )
    }

    /// Run `command` to completion, relaying its output, and return its exit code.
    pub fn run<S: OutputSink + ?Sized>(&self, sink: &mut S, command: &MesonCommand) -> Result<i32> {
        let program = command
            .program()
            .ok_or_else(|| Error::ConfigError("cannot run an empty command".to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.relay(sink, program, command))
    }

    async fn relay<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        program: &str,
        command: &MesonCommand,
    ) -> Result<i32> {
        let mut state = RelayState::Idle;

        sink.show();
        advance(&mut state, RelayState::ShowingPanel);

        sink.append(&self.header(command))?;
        advance(&mut state, RelayState::HeaderWritten);

        info!("Process began: {}", command.to_shell_command());
        let mut process = Command::new(program);
        process
            .args(&command.args[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = self.working_dir_for(command) {
            process.current_dir(dir);
        }
        for (key, value) in &command.env {
            process.env(key, value);
        }

        let mut child = process.spawn()?;

        let mut streams: Vec<Box<dyn AsyncBufRead + Unpin>> = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            streams.push(Box::new(BufReader::new(stdout)));
        }
        if let Some(stderr) = child.stderr.take() {
            streams.push(Box::new(BufReader::new(stderr)));
        }
        advance(
            &mut state,
            RelayState::Streaming {
                open_streams: streams.len(),
            },
        );

        if let Err(err) = drain_round_robin(streams, sink).await {
            warn!("Output relay failed, stopping process: {}", err);
            let _ = child.kill().await;
            return Err(err);
        }
        advance(&mut state, RelayState::Drained);

        let status = child.wait().await?;
        let code = status.code().unwrap_or(NO_EXIT_CODE);
        advance(&mut state, RelayState::Terminated(code));

        info!("Process ended with exit code {}", code);
        Ok(code)
    }

    fn working_dir_for<'a>(&'a self, command: &'a MesonCommand) -> Option<&'a Path> {
        command.working_dir().or(self.default_dir.as_deref())
    }
}

fn advance(state: &mut RelayState, next: RelayState) {
    trace!("relay {:?} -> {:?}", state, next);
    *state = next;
}

/// What one stream yielded during a pass.
enum Polled {
    Line(Vec<u8>),
    /// End of stream, with whatever unterminated bytes were left.
    Closed(Vec<u8>),
}

/// Relay every line of every stream into `sink`.
///
/// Each pass takes at most one line from every stream that has one ready,
/// in stream order. A stream with nothing to read is skipped rather than
/// waited on, so a child flooding one pipe never stalls behind the other.
/// A stream leaves the working set at end-of-stream; the loop ends when the
/// set is empty. Returns the number of lines relayed.
pub async fn drain_round_robin<R, S>(streams: Vec<R>, sink: &mut S) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    S: OutputSink + ?Sized,
{
    let mut open = streams;
    let mut partial: Vec<Vec<u8>> = vec![Vec::new(); open.len()];
    let mut relayed = 0;

    while !open.is_empty() {
        let pass = ready_pass(&mut open, &mut partial).await?;

        let mut closed = Vec::new();
        for (index, polled) in pass {
            let line = match polled {
                Polled::Line(line) => line,
                Polled::Closed(rest) => {
                    closed.push(index);
                    rest
                }
            };
            if !line.is_empty() {
                sink.append(&String::from_utf8_lossy(&line))?;
                relayed += 1;
            }
        }
        for index in closed.into_iter().rev() {
            open.remove(index);
            partial.remove(index);
        }
    }

    Ok(relayed)
}

/// One pass over the open streams; resolves once at least one of them
/// produced a line or closed.
///
/// `read_until` keeps the bytes of an unfinished line in `partial`, so
/// dropping a pending read loses nothing.
async fn ready_pass<R: AsyncBufRead + Unpin>(
    streams: &mut [R],
    partial: &mut [Vec<u8>],
) -> io::Result<Vec<(usize, Polled)>> {
    poll_fn(|cx| {
        let mut pass = Vec::new();
        for (index, (stream, buf)) in streams.iter_mut().zip(partial.iter_mut()).enumerate() {
            let polled = {
                let read = pin!(stream.read_until(b'\n', buf));
                read.poll(cx)
            };
            match polled {
                Poll::Ready(Ok(0)) => pass.push((index, Polled::Closed(mem::take(buf)))),
                Poll::Ready(Ok(_)) => pass.push((index, Polled::Line(mem::take(buf)))),
                Poll::Ready(Err(err)) => return Poll::Ready(Err(err)),
                Poll::Pending => {}
            }
        }

        if pass.is_empty() {
            Poll::Pending
        } else {
            Poll::Ready(Ok(pass))
        }
    })
    .await
}
