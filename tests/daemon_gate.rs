// tests/daemon_gate.rs
//
// `true`/`false` stand in for `dockerd` and `docker`.

#![cfg(unix)]

use std::time::Duration;

use actrun::daemon::{DaemonGate, DaemonSettings, DockerDaemon};
use actrun::errors::ActrunError;
use actrun_test_utils::{init_tracing, within_secs};

fn settings(dockerd: &str, docker: &str) -> DaemonSettings {
    DaemonSettings {
        dockerd: dockerd.to_string(),
        docker: docker.to_string(),
        max_attempts: 3,
        poll_interval: Duration::from_millis(10),
        ..DaemonSettings::default()
    }
}

#[tokio::test]
async fn disabled_daemon_only_probes() {
    init_tracing();
    let mut gate = DockerDaemon::new(DaemonSettings {
        disabled: true,
        ..settings("actrun-no-such-dockerd", "true")
    });

    within_secs(5, gate.ensure_ready()).await.unwrap();
}

#[tokio::test]
async fn ready_once_probe_succeeds() {
    init_tracing();
    let mut gate = DockerDaemon::new(settings("true", "true"));

    within_secs(5, gate.ensure_ready()).await.unwrap();
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    init_tracing();
    let mut gate = DockerDaemon::new(DaemonSettings {
        disabled: true,
        ..settings("true", "false")
    });

    let result = within_secs(5, gate.ensure_ready()).await;

    match result {
        Err(ActrunError::DaemonNotReady(msg)) => assert!(msg.contains("3 attempts")),
        other => panic!("Expected DaemonNotReady, got: {:?}", other),
    }
}

#[tokio::test]
async fn dockerd_that_cannot_start_is_not_ready() {
    init_tracing();
    let mut gate = DockerDaemon::new(settings("actrun-no-such-dockerd", "true"));

    let result = within_secs(5, gate.ensure_ready()).await;

    assert!(matches!(result, Err(ActrunError::DaemonNotReady(_))));
}

#[test]
fn dockerd_args_reflect_settings() {
    let gate = DockerDaemon::new(DaemonSettings {
        storage_driver: Some("vfs".into()),
        mirror: Some("https://mirror.example".into()),
        insecure: true,
        debug: true,
        ..DaemonSettings::default()
    });

    assert_eq!(
        gate.dockerd_args(),
        vec![
            "--data-root=/var/lib/docker",
            "--host=unix:///var/run/docker.sock",
            "--storage-driver=vfs",
            "--registry-mirror=https://mirror.example",
            "--insecure-registry=https://mirror.example",
            "--debug",
        ]
    );
}
