// src/engine/mod.rs

//! Orchestration of a single run.
//!
//! The [`Pipeline`] drives the stages in order:
//! daemon gate → file materialization → command assembly → launch with
//! stdout capture → output parsing → result file.
//!
//! Every collaborator sits behind a trait so tests can run the whole
//! pipeline without Docker, `act`, or `/tmp`.

use std::path::PathBuf;

use crate::exec::RunCommand;
use crate::output::OutputRecord;
use crate::types::RunPaths;

pub mod pipeline;

pub use pipeline::Pipeline;

/// Fixed inputs of a pipeline that do not come from the action itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Runner executable name.
    pub program: String,
    pub paths: RunPaths,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            program: crate::exec::DEFAULT_PROGRAM.to_string(),
            paths: RunPaths::default(),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub command: RunCommand,
    pub exit_code: i32,
    pub outputs: OutputRecord,
    /// Where the outputs were written.
    pub result_path: PathBuf,
}
