// src/daemon/mod.rs

//! Container runtime readiness gate.
//!
//! Nothing is written or spawned for a run until [`DaemonGate::ensure_ready`]
//! has succeeded.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::errors::Result;

pub mod docker;

pub use docker::DockerDaemon;

/// Settings for starting and probing the Docker daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonSettings {
    /// Do not start `dockerd`; only probe an already-running daemon.
    pub disabled: bool,
    pub dockerd: String,
    pub docker: String,
    pub storage_driver: Option<String>,
    pub mirror: Option<String>,
    pub insecure: bool,
    pub debug: bool,
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            dockerd: "dockerd".to_string(),
            docker: "docker".to_string(),
            storage_driver: None,
            mirror: None,
            insecure: false,
            debug: false,
            max_attempts: 15,
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Something that can make a container runtime available.
pub trait DaemonGate: Send {
    /// Resolve once the runtime accepts requests, or fail with
    /// `ActrunError::DaemonNotReady`.
    fn ensure_ready(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
