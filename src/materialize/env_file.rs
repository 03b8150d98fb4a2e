// src/materialize/env_file.rs

//! `KEY=VALUE` files for `act --env-file` / `--secret-file`.

use std::collections::BTreeMap;

use tracing::debug;

/// Contents of the env and secret files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFiles {
    pub env: String,
    pub secrets: String,
}

/// Split an environment snapshot into env-file and secret-file contents.
///
/// Names listed in `secrets` go to the secret file, everything else to the
/// env file. Values containing a newline cannot be represented in this
/// format and are skipped. Output is sorted by name.
pub fn render_env_files(environment: &BTreeMap<String, String>, secrets: &[String]) -> EnvFiles {
    let mut files = EnvFiles::default();

    for (name, value) in environment {
        if name.is_empty() {
            continue;
        }
        if value.contains('\n') {
            debug!(name = %name, "skipping multi-line environment variable");
            continue;
        }

        let target = if secrets.iter().any(|s| s == name) {
            &mut files.secrets
        } else {
            &mut files.env
        };
        target.push_str(name);
        target.push('=');
        target.push_str(value);
        target.push('\n');
    }

    files
}
