// src/lib.rs

pub mod cli;
pub mod config;
pub mod daemon;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod materialize;
pub mod output;
pub mod types;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::daemon::DockerDaemon;
use crate::engine::{Pipeline, RunReport};
use crate::errors::Result;
use crate::exec::{build_run_command, ActLauncher};
use crate::fs::{FileSystem, RealFileSystem};
use crate::materialize::FileMaterializer;
use crate::output::ResultWriter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the Docker daemon gate
/// - file materialization from the process environment
/// - the `act` launcher
/// - the `DRONE_OUTPUT` result writer
pub async fn run(args: CliArgs) -> Result<Option<RunReport>> {
    let cfg = load_and_validate(&args.config)?.with_overrides(
        args.image.clone(),
        args.actor.clone(),
        args.verbose,
    );

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(None);
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let mut pipeline = Pipeline::new(
        DockerDaemon::new(cfg.daemon.clone()),
        Box::new(FileMaterializer::from_process_env(Arc::clone(&fs))),
        ActLauncher::new(),
        Arc::clone(&fs),
        ResultWriter::from_env(Arc::clone(&fs)),
        cfg.options.clone(),
    );

    let report = pipeline.run(&cfg.action).await?;
    info!(
        outputs = report.outputs.len(),
        path = %report.result_path.display(),
        "action run succeeded"
    );
    Ok(Some(report))
}

/// Print the resolved command and the files a run would write.
fn print_dry_run(cfg: &ConfigFile) {
    let paths = &cfg.options.paths;
    let command = build_run_command(&cfg.options.program, &cfg.action, paths);

    println!("actrun dry-run");
    println!("  uses:  {}", cfg.action.uses);
    println!("  image: {}", cfg.action.image);
    if !cfg.action.with.is_empty() {
        println!("  with:");
        for (k, v) in &cfg.action.with {
            println!("    {k} = {v}");
        }
    }
    if !cfg.action.env.is_empty() {
        println!("  env:");
        for (k, v) in &cfg.action.env {
            println!("    {k} = {v}");
        }
    }
    println!();

    println!("files:");
    println!("  workflow: {}", paths.workflow.display());
    println!("  env:      {}", paths.env.display());
    if let Some(secret) = &paths.secret {
        println!("  secrets:  {}", secret.display());
    }
    if !cfg.action.event_payload.is_empty() {
        println!("  event:    {}", paths.event_payload.display());
    }
    println!();

    println!("command:");
    println!("  {}", command.trace_line());

    if cfg.daemon.disabled {
        println!();
        println!("daemon: startup disabled (probe only)");
    }

    debug!("dry-run complete (no execution)");
}
