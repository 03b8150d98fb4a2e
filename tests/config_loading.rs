// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::NamedTempFile;

use actrun::config::load_and_validate;
use actrun::errors::ActrunError;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn minimal_config_gets_defaults() {
    let file = config_file(
        r#"
[action]
uses = "actions/hello-world-javascript-action@v1"
image = "node:16-buster-slim"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.action.uses, "actions/hello-world-javascript-action@v1");
    assert_eq!(cfg.action.actor, "");
    assert_eq!(cfg.action.event_payload, "");
    assert_eq!(cfg.action.secrets, vec!["GITHUB_TOKEN".to_string()]);
    assert_eq!(cfg.options.program, "act");
    assert_eq!(cfg.options.paths.workflow, PathBuf::from("/tmp/workflow.yml"));
    assert_eq!(
        cfg.options.paths.secret,
        Some(PathBuf::from("/tmp/action.secrets"))
    );
    assert_eq!(cfg.daemon.max_attempts, 15);
    assert_eq!(cfg.daemon.poll_interval, Duration::from_secs(1));
    assert!(!cfg.daemon.disabled);
}

#[test]
fn full_config_is_mapped() {
    let file = config_file(
        r#"
[action]
uses = "actions/checkout@v4"
image = "catthehacker/ubuntu:act-latest"
actor = "octocat"
event_payload = '{"pull_request":{"number":1}}'
verbose = true
secrets = ["GITHUB_TOKEN", "NPM_TOKEN"]

[action.with]
fetch-depth = "0"

[action.env]
FOO = "bar"

[runner]
program = "/usr/local/bin/act"

[paths]
workflow = "/work/run-1/workflow.yml"
secret_file = false

[daemon]
disabled = true
mirror = "https://mirror.gcr.io"
max_attempts = 3
poll_interval = "250ms"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.action.actor, "octocat");
    assert_eq!(cfg.action.event_payload, r#"{"pull_request":{"number":1}}"#);
    assert!(cfg.action.verbose);
    assert_eq!(cfg.action.with.get("fetch-depth").map(String::as_str), Some("0"));
    assert_eq!(cfg.action.env.get("FOO").map(String::as_str), Some("bar"));
    assert_eq!(cfg.action.secrets.len(), 2);
    assert_eq!(cfg.options.program, "/usr/local/bin/act");
    assert_eq!(
        cfg.options.paths.workflow,
        PathBuf::from("/work/run-1/workflow.yml")
    );
    assert_eq!(cfg.options.paths.env, PathBuf::from("/tmp/action.env"));
    assert_eq!(cfg.options.paths.secret, None);
    assert!(cfg.daemon.disabled);
    assert_eq!(cfg.daemon.mirror.as_deref(), Some("https://mirror.gcr.io"));
    assert_eq!(cfg.daemon.max_attempts, 3);
    assert_eq!(cfg.daemon.poll_interval, Duration::from_millis(250));
}

#[test]
fn cli_overrides_replace_file_values() {
    let file = config_file(
        r#"
[action]
uses = "a@v1"
image = "node:16"
actor = "from-file"
"#,
    );

    let cfg = load_and_validate(file.path())
        .unwrap()
        .with_overrides(Some("node:20".into()), Some("from-cli".into()), true);

    assert_eq!(cfg.action.image, "node:20");
    assert_eq!(cfg.action.actor, "from-cli");
    assert!(cfg.action.verbose);
}

#[test]
fn missing_uses_returns_config_error() {
    let file = config_file(
        r#"
[action]
image = "node:16"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ActrunError::ConfigError(msg)) => assert!(msg.contains("uses")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_image_returns_config_error() {
    let file = config_file(
        r#"
[action]
uses = "a@v1"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ActrunError::ConfigError(msg)) => assert!(msg.contains("image")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn bad_poll_interval_returns_config_error() {
    let file = config_file(
        r#"
[action]
uses = "a@v1"
image = "node:16"

[daemon]
poll_interval = "soon"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ActrunError::ConfigError(msg)) => assert!(msg.contains("poll_interval")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_attempts_returns_config_error() {
    let file = config_file(
        r#"
[action]
uses = "a@v1"
image = "node:16"

[daemon]
max_attempts = 0
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ActrunError::ConfigError(_))
    ));
}

#[test]
fn invalid_toml_returns_toml_error() {
    let file = config_file("[action\nuses = ");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ActrunError::TomlError(_))
    ));
}
