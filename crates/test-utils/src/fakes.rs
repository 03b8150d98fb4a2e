use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use actrun::daemon::DaemonGate;
use actrun::errors::{ActrunError, Result};
use actrun::exec::{CapturedOutput, ProcessBackend, ProcessOutcome, RunCommand};

/// A daemon gate that succeeds or fails on demand and counts its calls.
#[derive(Debug, Clone, Default)]
pub struct FakeDaemon {
    fail: bool,
    calls: Arc<Mutex<u32>>,
}

impl FakeDaemon {
    pub fn ready() -> Self {
        Self::default()
    }

    pub fn never_ready() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl DaemonGate for FakeDaemon {
    fn ensure_ready(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        *self.calls.lock().unwrap() += 1;
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(ActrunError::DaemonNotReady("fake daemon never ready".into()))
            } else {
                Ok(())
            }
        })
    }
}

/// A launcher that:
/// - records every command it is asked to run
/// - immediately "terminates" with a canned exit code and stdout.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
    exit_code: i32,
    stdout: Vec<u8>,
    spawn_fails: bool,
    launched: Arc<Mutex<Vec<RunCommand>>>,
}

impl FakeLauncher {
    pub fn new(exit_code: i32, stdout: &str) -> Self {
        Self {
            exit_code,
            stdout: stdout.as_bytes().to_vec(),
            spawn_fails: false,
            launched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A launcher whose process can never be started.
    pub fn unspawnable() -> Self {
        Self {
            spawn_fails: true,
            ..Self::new(0, "")
        }
    }

    /// Shared handle to the recorded commands.
    pub fn launched(&self) -> Arc<Mutex<Vec<RunCommand>>> {
        Arc::clone(&self.launched)
    }
}

impl ProcessBackend for FakeLauncher {
    fn launch<'a>(
        &'a mut self,
        command: &'a RunCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(async move {
            if self.spawn_fails {
                return Err(ActrunError::Spawn {
                    program: command.program().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
                });
            }

            self.launched.lock().unwrap().push(command.clone());

            Ok(ProcessOutcome {
                exit_code: self.exit_code,
                captured: CapturedOutput::from(self.stdout.clone()),
            })
        })
    }
}
