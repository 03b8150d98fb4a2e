// src/exec/backend.rs

//! Pluggable process launcher abstraction.
//!
//! The pipeline talks to a `ProcessBackend` instead of spawning `act`
//! directly. This makes it easy to swap in a fake launcher in tests while
//! keeping the production implementation here.
//!
//! - `ActLauncher` is the default implementation. It prints the trace line,
//!   spawns the runner, tees its stdout to the console and a buffer, and
//!   inherits stderr.
//! - Tests can provide their own `ProcessBackend` that records the command
//!   and returns canned output.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::errors::{ActrunError, Result};

use super::command::RunCommand;
use super::interceptor::{tee, CapturedOutput};

/// Terminal state of one runner process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub captured: CapturedOutput,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting how the runner command is executed.
///
/// The returned future resolves only once the process has terminated.
pub trait ProcessBackend: Send {
    fn launch<'a>(
        &'a mut self,
        command: &'a RunCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>>;
}

/// Real launcher used in production.
///
/// `console` receives the trace line and the child's stdout; it is the
/// process stdout unless a test supplies its own writer.
pub struct ActLauncher<W = tokio::io::Stdout> {
    console: W,
}

impl ActLauncher<tokio::io::Stdout> {
    pub fn new() -> Self {
        Self {
            console: tokio::io::stdout(),
        }
    }
}

impl Default for ActLauncher<tokio::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ActLauncher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn with_console(console: W) -> Self {
        Self { console }
    }

    pub fn into_console(self) -> W {
        self.console
    }

    async fn launch_inner(&mut self, command: &RunCommand) -> Result<ProcessOutcome> {
        let trace = format!("{}\n", command.trace_line());
        let console_open = match write_trace(&mut self.console, trace.as_bytes()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "console unavailable; runner output is captured only");
                false
            }
        };

        let mut cmd = command.to_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let program = command.program().to_string();
        let mut child = cmd.spawn().map_err(|source| ActrunError::Spawn {
            program: program.clone(),
            source,
        })?;

        info!(program = %program, pid = child.id().unwrap_or(0), "runner process started");

        let stdout = child.stdout.take().ok_or_else(|| ActrunError::Spawn {
            program: program.clone(),
            source: std::io::Error::other("stdout pipe not available"),
        })?;

        let mut closed = tokio::io::sink();
        let live: &mut (dyn AsyncWrite + Unpin + Send) = if console_open {
            &mut self.console
        } else {
            &mut closed
        };

        // Drain stdout while waiting so the child never blocks on a full pipe.
        let (status, captured) = tokio::join!(child.wait(), tee(stdout, live));

        let status = status.map_err(|source| ActrunError::Wait {
            program: program.clone(),
            source,
        })?;
        let captured = captured.map_err(|source| ActrunError::Wait {
            program: program.clone(),
            source,
        })?;

        let exit_code = status.code().unwrap_or(-1);
        info!(
            program = %program,
            exit_code,
            success = status.success(),
            captured_bytes = captured.len(),
            "runner process exited"
        );
        debug!("stdout capture complete");

        Ok(ProcessOutcome {
            exit_code,
            captured,
        })
    }
}

async fn write_trace<W>(console: &mut W, line: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    console.write_all(line).await?;
    console.flush().await
}

impl<W> ProcessBackend for ActLauncher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn launch<'a>(
        &'a mut self,
        command: &'a RunCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(self.launch_inner(command))
    }
}
