// src/materialize/workflow.rs

//! Single-step workflow definition consumed by `act -W`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{ActionSpec, PLATFORM_LABEL};

pub const WORKFLOW_NAME: &str = "actrun";
pub const JOB_NAME: &str = "action";

#[derive(Debug, Serialize)]
struct Workflow<'a> {
    name: &'a str,
    on: &'a str,
    jobs: BTreeMap<&'a str, Job<'a>>,
}

#[derive(Debug, Serialize)]
struct Job<'a> {
    #[serde(rename = "runs-on")]
    runs_on: &'a str,
    steps: Vec<Step<'a>>,
}

#[derive(Debug, Serialize)]
struct Step<'a> {
    uses: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    with: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "is_empty")]
    env: &'a BTreeMap<String, String>,
}

fn is_empty(map: &&BTreeMap<String, String>) -> bool {
    map.is_empty()
}

/// Render the workflow YAML for `spec`.
pub fn render_workflow(spec: &ActionSpec) -> Result<String, serde_yaml::Error> {
    let step = Step {
        uses: &spec.uses,
        with: &spec.with,
        env: &spec.env,
    };

    let mut jobs = BTreeMap::new();
    jobs.insert(
        JOB_NAME,
        Job {
            runs_on: PLATFORM_LABEL,
            steps: vec![step],
        },
    );

    serde_yaml::to_string(&Workflow {
        name: WORKFLOW_NAME,
        on: "push",
        jobs,
    })
}
