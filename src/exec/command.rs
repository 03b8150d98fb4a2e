// src/exec/command.rs

//! Argument assembly for the `act` runner.

use std::fmt;

use tracing::debug;

use crate::errors::{ActrunError, Result};
use crate::fs::FileSystem;
use crate::types::{ActionSpec, RunPaths, PLATFORM_LABEL};

/// Default runner executable.
pub const DEFAULT_PROGRAM: &str = "act";

/// Fully resolved argument vector for one runner invocation.
///
/// Built once per run and handed to the launcher read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    program: String,
    args: Vec<String>,
}

impl RunCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by every argument.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// The operator-facing trace line, without trailing newline.
    pub fn trace_line(&self) -> String {
        format!("+ {}", self)
    }

    /// Whether `flag` appears, and the token right after it.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let idx = self.args.iter().position(|a| a == flag)?;
        self.args.get(idx + 1).map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    pub(crate) fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.tokens().collect();
        f.write_str(&joined.join(" "))
    }
}

/// Build the runner arguments for `spec`.
///
/// Order matters to the runner's argument grammar:
/// workflow, platform, secret file, env file, `-b`, `--detect-event`, then
/// the optional actor, event path and verbosity flags.
///
/// This is pure: it does not write the event payload file. Use
/// [`prepare_run_command`] for that.
pub fn build_run_command(program: &str, spec: &ActionSpec, paths: &RunPaths) -> RunCommand {
    let mut args: Vec<String> = vec![
        "-W".into(),
        paths.workflow.display().to_string(),
        "-P".into(),
        format!("{PLATFORM_LABEL}={}", spec.image),
    ];

    if let Some(secret) = &paths.secret {
        args.push("--secret-file".into());
        args.push(secret.display().to_string());
    }

    args.extend([
        "--env-file".into(),
        paths.env.display().to_string(),
        "-b".into(),
        "--detect-event".into(),
    ]);

    if !spec.actor.is_empty() {
        args.push("--actor".into());
        args.push(spec.actor.clone());
    }

    if !spec.event_payload.is_empty() {
        args.push("--eventpath".into());
        args.push(paths.event_payload.display().to_string());
    }

    if spec.verbose {
        args.push("-v".into());
    }

    RunCommand::new(program, args)
}

/// Write the event payload (if any) and build the runner command.
///
/// A payload write failure aborts the run before anything is spawned.
pub fn prepare_run_command(
    program: &str,
    spec: &ActionSpec,
    paths: &RunPaths,
    fs: &dyn FileSystem,
) -> Result<RunCommand> {
    if !spec.event_payload.is_empty() {
        fs.write(&paths.event_payload, spec.event_payload.as_bytes())
            .map_err(|cause| ActrunError::PayloadWrite {
                path: paths.event_payload.clone(),
                cause,
            })?;
        debug!(
            path = %paths.event_payload.display(),
            bytes = spec.event_payload.len(),
            "wrote event payload"
        );
    }

    Ok(build_run_command(program, spec, paths))
}
