// src/daemon/docker.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{ActrunError, Result};

use super::{DaemonGate, DaemonSettings};

const DATA_ROOT: &str = "/var/lib/docker";
const SOCKET_HOST: &str = "unix:///var/run/docker.sock";

/// Starts `dockerd` in the background and polls `docker version` until it
/// answers.
///
/// The spawned daemon is intentionally left running for the lifetime of the
/// process; the runner needs it after this gate returns.
#[derive(Debug)]
pub struct DockerDaemon {
    settings: DaemonSettings,
    child: Option<Child>,
}

impl DockerDaemon {
    pub fn new(settings: DaemonSettings) -> Self {
        Self {
            settings,
            child: None,
        }
    }

    /// Arguments passed to `dockerd`.
    pub fn dockerd_args(&self) -> Vec<String> {
        let s = &self.settings;
        let mut args = vec![
            format!("--data-root={DATA_ROOT}"),
            format!("--host={SOCKET_HOST}"),
        ];
        if let Some(driver) = &s.storage_driver {
            args.push(format!("--storage-driver={driver}"));
        }
        if let Some(mirror) = &s.mirror {
            args.push(format!("--registry-mirror={mirror}"));
        }
        if s.insecure {
            if let Some(mirror) = &s.mirror {
                args.push(format!("--insecure-registry={mirror}"));
            }
        }
        if s.debug {
            args.push("--debug".to_string());
        }
        args
    }

    fn start(&mut self) -> Result<()> {
        let args = self.dockerd_args();
        info!(program = %self.settings.dockerd, ?args, "starting docker daemon");

        let mut cmd = Command::new(&self.settings.dockerd);
        cmd.args(&args).stdin(Stdio::null());
        if self.settings.debug {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let child = cmd.spawn().map_err(|e| {
            ActrunError::DaemonNotReady(format!(
                "failed to start '{}': {e}",
                self.settings.dockerd
            ))
        })?;
        self.child = Some(child);
        Ok(())
    }

    async fn probe(&self) -> bool {
        let status = Command::new(&self.settings.docker)
            .arg("version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(s) => s.success(),
            Err(e) => {
                debug!(error = %e, "docker probe failed to run");
                false
            }
        }
    }

    async fn wait_until_ready(&mut self) -> Result<()> {
        for attempt in 1..=self.settings.max_attempts {
            if self.probe().await {
                info!(attempt, "docker daemon is ready");
                return Ok(());
            }

            if let Some(child) = self.child.as_mut() {
                if let Ok(Some(status)) = child.try_wait() {
                    return Err(ActrunError::DaemonNotReady(format!(
                        "'{}' exited early with {status}",
                        self.settings.dockerd
                    )));
                }
            }

            debug!(attempt, max_attempts = self.settings.max_attempts, "docker daemon not ready yet");
            tokio::time::sleep(self.settings.poll_interval).await;
        }

        warn!(attempts = self.settings.max_attempts, "giving up waiting for docker daemon");
        Err(ActrunError::DaemonNotReady(format!(
            "no response from '{} version' after {} attempts",
            self.settings.docker, self.settings.max_attempts
        )))
    }
}

impl DaemonGate for DockerDaemon {
    fn ensure_ready(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            if self.settings.disabled {
                debug!("daemon startup disabled; probing existing daemon");
            } else {
                self.start()?;
            }
            self.wait_until_ready().await
        })
    }
}
