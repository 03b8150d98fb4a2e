// src/main.rs

use actrun::errors::ActrunError;
use actrun::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("actrun error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        eprintln!("actrun error: {err:?}");
        std::process::exit(exit_code_for(&err));
    }
}

/// Mirror the runner's exit code when it failed on its own.
fn exit_code_for(err: &ActrunError) -> i32 {
    match err {
        ActrunError::ExecutionFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
        _ => 1,
    }
}
