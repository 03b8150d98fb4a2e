// src/materialize/mod.rs

//! Writing the files the runner reads.
//!
//! - [`workflow`] renders the single-step workflow YAML.
//! - [`env_file`] renders the env and secret files from an environment
//!   snapshot.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::errors::{ActrunError, Result};
use crate::fs::FileSystem;
use crate::types::{ActionSpec, RunPaths};

pub mod env_file;
pub mod workflow;

pub use env_file::{render_env_files, EnvFiles};
pub use workflow::render_workflow;

/// Produces the runner's input files from an [`ActionSpec`].
pub trait ConfigMaterializer: Send + Sync {
    fn materialize(&self, spec: &ActionSpec, paths: &RunPaths) -> Result<()>;
}

/// Default materializer writing through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FileMaterializer {
    fs: Arc<dyn FileSystem>,
    environment: BTreeMap<String, String>,
}

impl FileMaterializer {
    /// `environment` is the snapshot split into the env and secret files.
    pub fn new(fs: Arc<dyn FileSystem>, environment: BTreeMap<String, String>) -> Self {
        Self { fs, environment }
    }

    /// Snapshot the current process environment. Non-UTF-8 entries are
    /// skipped.
    pub fn from_process_env(fs: Arc<dyn FileSystem>) -> Self {
        let environment = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::new(fs, environment)
    }

    fn write(&self, what: &'static str, path: &Path, contents: &str) -> Result<()> {
        self.fs
            .write(path, contents.as_bytes())
            .map_err(|cause| ActrunError::Materialize {
                what,
                path: path.to_path_buf(),
                cause,
            })?;
        debug!(what, path = %path.display(), bytes = contents.len(), "materialized file");
        Ok(())
    }
}

impl ConfigMaterializer for FileMaterializer {
    fn materialize(&self, spec: &ActionSpec, paths: &RunPaths) -> Result<()> {
        let yaml = render_workflow(spec)
            .context("serializing workflow")
            .map_err(|cause| ActrunError::Materialize {
                what: "workflow",
                path: paths.workflow.clone(),
                cause,
            })?;
        self.write("workflow", &paths.workflow, &yaml)?;

        // Without a secret file, secrets stay in the env file.
        let secrets: &[String] = if paths.secret.is_some() {
            &spec.secrets
        } else {
            &[]
        };
        let files = render_env_files(&self.environment, secrets);
        self.write("env file", &paths.env, &files.env)?;

        if let Some(secret) = &paths.secret {
            self.write("secret file", secret, &files.secrets)?;
        }

        Ok(())
    }
}
