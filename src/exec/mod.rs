// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running the `act` runner with
//! `tokio::process::Command` and handing its captured stdout back to the
//! pipeline.
//!
//! - [`command`] assembles the [`RunCommand`] and writes the event payload.
//! - [`interceptor`] tees the child's stdout to the console and a buffer.
//! - [`backend`] provides the `ProcessBackend` trait and the production
//!   `ActLauncher`, which tests can replace with a fake implementation.

pub mod backend;
pub mod command;
pub mod interceptor;

pub use backend::{ActLauncher, ProcessBackend, ProcessOutcome};
pub use command::{build_run_command, prepare_run_command, RunCommand, DEFAULT_PROGRAM};
pub use interceptor::{tee, CapturedOutput};
