// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::daemon::DaemonSettings;
use crate::engine::PipelineOptions;
use crate::types::ActionSpec;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [action]
/// uses = "actions/hello-world-javascript-action@v1"
/// image = "node:16-buster-slim"
///
/// [action.with]
/// who-to-greet = "Mona"
///
/// [daemon]
/// disabled = true
/// ```
///
/// Only `[action]` is required; every other section has defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub action: ActionSection,

    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub daemon: DaemonSection,
}

/// `[action]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActionSection {
    /// Action reference passed to the workflow step's `uses:`.
    #[serde(default)]
    pub uses: String,

    /// Image bound to the `ubuntu-latest` runner label.
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub with: BTreeMap<String, String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub actor: Option<String>,

    /// Raw webhook event JSON, passed through untouched.
    #[serde(default)]
    pub event_payload: Option<String>,

    #[serde(default)]
    pub verbose: bool,

    /// Environment variables routed to the secret file.
    ///
    /// Defaults to `["GITHUB_TOKEN"]` when omitted.
    #[serde(default)]
    pub secrets: Option<Vec<String>>,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunnerSection {
    /// Runner executable; defaults to `act`.
    #[serde(default)]
    pub program: Option<String>,
}

/// `[paths]` section. Unset entries fall back to the `/tmp` defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PathsSection {
    #[serde(default)]
    pub workflow: Option<PathBuf>,

    #[serde(default)]
    pub env: Option<PathBuf>,

    #[serde(default)]
    pub secret: Option<PathBuf>,

    #[serde(default)]
    pub event_payload: Option<PathBuf>,

    /// Set to `false` to stop passing `--secret-file` to the runner.
    #[serde(default)]
    pub secret_file: Option<bool>,
}

/// `[daemon]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DaemonSection {
    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub dockerd: Option<String>,

    #[serde(default)]
    pub docker: Option<String>,

    #[serde(default)]
    pub storage_driver: Option<String>,

    #[serde(default)]
    pub mirror: Option<String>,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Duration string such as `"1s"` or `"500ms"`.
    #[serde(default)]
    pub poll_interval: Option<String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub action: ActionSpec,
    pub daemon: DaemonSettings,
    pub options: PipelineOptions,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        action: ActionSpec,
        daemon: DaemonSettings,
        options: PipelineOptions,
    ) -> Self {
        Self {
            action,
            daemon,
            options,
        }
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        image: Option<String>,
        actor: Option<String>,
        verbose: bool,
    ) -> Self {
        if let Some(image) = image.filter(|s| !s.is_empty()) {
            self.action.image = image;
        }
        if let Some(actor) = actor {
            self.action.actor = actor;
        }
        if verbose {
            self.action.verbose = true;
        }
        self
    }
}
