#![allow(dead_code)]

use std::path::Path;

use actrun::types::{ActionSpec, RunPaths};

/// Builder for `ActionSpec` to simplify test setup.
pub struct ActionSpecBuilder {
    spec: ActionSpec,
}

impl ActionSpecBuilder {
    pub fn new(uses: &str) -> Self {
        Self {
            spec: ActionSpec {
                uses: uses.to_string(),
                image: "node:16-buster-slim".to_string(),
                secrets: vec!["GITHUB_TOKEN".to_string()],
                ..ActionSpec::default()
            },
        }
    }

    pub fn image(mut self, image: &str) -> Self {
        self.spec.image = image.to_string();
        self
    }

    pub fn with_input(mut self, key: &str, value: &str) -> Self {
        self.spec.with.insert(key.to_string(), value.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.spec.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn actor(mut self, actor: &str) -> Self {
        self.spec.actor = actor.to_string();
        self
    }

    pub fn event_payload(mut self, payload: &str) -> Self {
        self.spec.event_payload = payload.to_string();
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.spec.verbose = val;
        self
    }

    pub fn secrets(mut self, names: &[&str]) -> Self {
        self.spec.secrets = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> ActionSpec {
        self.spec
    }
}

/// `RunPaths` rooted under `dir` instead of `/tmp`.
pub fn paths_in(dir: &Path) -> RunPaths {
    RunPaths {
        workflow: dir.join("workflow.yml"),
        env: dir.join("action.env"),
        secret: Some(dir.join("action.secrets")),
        event_payload: dir.join("event.json"),
    }
}
