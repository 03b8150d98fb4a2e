// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, DaemonSection, PathsSection, RawConfigFile};
use crate::daemon::DaemonSettings;
use crate::engine::PipelineOptions;
use crate::errors::{ActrunError, Result};
use crate::exec::DEFAULT_PROGRAM;
use crate::types::{ActionSpec, RunPaths, DEFAULT_SECRETS};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ActrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_action(&raw)?;
        let program = validate_program(&raw)?;
        let daemon = build_daemon_settings(&raw.daemon)?;
        let paths = build_paths(&raw.paths);

        let a = raw.action;
        let action = ActionSpec {
            uses: a.uses,
            with: a.with,
            env: a.env,
            image: a.image,
            event_payload: a.event_payload.unwrap_or_default(),
            actor: a.actor.unwrap_or_default(),
            verbose: a.verbose,
            secrets: a
                .secrets
                .unwrap_or_else(|| DEFAULT_SECRETS.iter().map(|s| s.to_string()).collect()),
        };

        Ok(ConfigFile::new_unchecked(
            action,
            daemon,
            PipelineOptions { program, paths },
        ))
    }
}

fn validate_action(cfg: &RawConfigFile) -> Result<()> {
    if cfg.action.uses.trim().is_empty() {
        return Err(ActrunError::ConfigError(
            "[action].uses must name the action to run".to_string(),
        ));
    }
    if cfg.action.image.trim().is_empty() {
        return Err(ActrunError::ConfigError(
            "[action].image must name the container image".to_string(),
        ));
    }
    for (section, map) in [("with", &cfg.action.with), ("env", &cfg.action.env)] {
        if map.keys().any(|k| k.is_empty()) {
            return Err(ActrunError::ConfigError(format!(
                "[action.{section}] contains an empty key"
            )));
        }
    }
    Ok(())
}

fn validate_program(cfg: &RawConfigFile) -> Result<String> {
    match &cfg.runner.program {
        None => Ok(DEFAULT_PROGRAM.to_string()),
        Some(p) if p.trim().is_empty() => Err(ActrunError::ConfigError(
            "[runner].program must not be empty".to_string(),
        )),
        Some(p) => Ok(p.clone()),
    }
}

fn build_paths(section: &PathsSection) -> RunPaths {
    let defaults = RunPaths::default();
    let secret = if section.secret_file.unwrap_or(true) {
        section.secret.clone().or(defaults.secret)
    } else {
        None
    };

    RunPaths {
        workflow: section.workflow.clone().unwrap_or(defaults.workflow),
        env: section.env.clone().unwrap_or(defaults.env),
        secret,
        event_payload: section.event_payload.clone().unwrap_or(defaults.event_payload),
    }
}

fn build_daemon_settings(section: &DaemonSection) -> Result<DaemonSettings> {
    let defaults = DaemonSettings::default();

    let max_attempts = section.max_attempts.unwrap_or(defaults.max_attempts);
    if max_attempts == 0 {
        return Err(ActrunError::ConfigError(
            "[daemon].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }

    let poll_interval = match &section.poll_interval {
        Some(s) => parse_duration(s).map_err(|e| {
            ActrunError::ConfigError(format!("[daemon].poll_interval: {e}"))
        })?,
        None => defaults.poll_interval,
    };

    let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    Ok(DaemonSettings {
        disabled: section.disabled,
        dockerd: non_empty(&section.dockerd).unwrap_or(defaults.dockerd),
        docker: non_empty(&section.docker).unwrap_or(defaults.docker),
        storage_driver: non_empty(&section.storage_driver),
        mirror: non_empty(&section.mirror),
        insecure: section.insecure,
        debug: section.debug,
        max_attempts,
        poll_interval,
    })
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
