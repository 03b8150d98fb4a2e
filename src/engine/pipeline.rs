// src/engine/pipeline.rs

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::daemon::DaemonGate;
use crate::errors::{ActrunError, Result};
use crate::exec::{prepare_run_command, ProcessBackend};
use crate::fs::FileSystem;
use crate::materialize::ConfigMaterializer;
use crate::output::{parse_outputs, ResultWriter};
use crate::types::ActionSpec;

use super::{PipelineOptions, RunReport};

/// Runs one action end to end.
///
/// Generic over the daemon gate and the process backend so that production
/// wires in `DockerDaemon` / `ActLauncher` and tests wire in fakes.
pub struct Pipeline<D: DaemonGate, L: ProcessBackend> {
    daemon: D,
    materializer: Box<dyn ConfigMaterializer>,
    launcher: L,
    fs: Arc<dyn FileSystem>,
    writer: ResultWriter,
    options: PipelineOptions,
}

impl<D: DaemonGate, L: ProcessBackend> fmt::Debug for Pipeline<D, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}

impl<D: DaemonGate, L: ProcessBackend> Pipeline<D, L> {
    pub fn new(
        daemon: D,
        materializer: Box<dyn ConfigMaterializer>,
        launcher: L,
        fs: Arc<dyn FileSystem>,
        writer: ResultWriter,
        options: PipelineOptions,
    ) -> Self {
        Self {
            daemon,
            materializer,
            launcher,
            fs,
            writer,
            options,
        }
    }

    /// Execute `spec` once.
    ///
    /// Readiness, materialization, launch and result-write failures abort
    /// immediately. A non-zero exit still has its outputs extracted and
    /// written before `ActrunError::ExecutionFailed` is returned.
    pub async fn run(&mut self, spec: &ActionSpec) -> Result<RunReport> {
        info!(uses = %spec.uses, image = %spec.image, "starting action run");

        self.daemon.ensure_ready().await?;

        self.materializer.materialize(spec, &self.options.paths)?;

        let command = prepare_run_command(
            &self.options.program,
            spec,
            &self.options.paths,
            self.fs.as_ref(),
        )?;

        let outcome = self.launcher.launch(&command).await?;
        let outputs = parse_outputs(outcome.captured.as_bytes());
        info!(
            exit_code = outcome.exit_code,
            outputs = outputs.len(),
            keys = ?outputs.keys().collect::<Vec<_>>(),
            "extracted action outputs"
        );

        if !outcome.success() {
            if let Err(e) = self.writer.write(&outputs) {
                warn!(error = %e, "could not record outputs of failed run");
            }
            error!(exit_code = outcome.exit_code, "action run failed");
            return Err(ActrunError::ExecutionFailed {
                program: command.program().to_string(),
                exit_code: outcome.exit_code,
                outputs,
            });
        }

        let result_path = self.writer.write(&outputs)?;

        Ok(RunReport {
            command,
            exit_code: outcome.exit_code,
            outputs,
            result_path,
        })
    }
}
