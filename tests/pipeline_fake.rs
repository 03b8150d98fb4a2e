// tests/pipeline_fake.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use actrun::engine::{Pipeline, PipelineOptions};
use actrun::errors::ActrunError;
use actrun::fs::mock::MockFileSystem;
use actrun::fs::FileSystem;
use actrun::materialize::FileMaterializer;
use actrun::output::ResultWriter;
use actrun::types::{ActionSpec, RunPaths};
use actrun_test_utils::builders::ActionSpecBuilder;
use actrun_test_utils::fakes::{FakeDaemon, FakeLauncher};
use actrun_test_utils::init_tracing;

const RESULT_PATH: &str = "/drone/output.env";

fn environment() -> BTreeMap<String, String> {
    [("GITHUB_TOKEN", "ghp_secret"), ("DRONE_BUILD_NUMBER", "12")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pipeline(
    fs: &MockFileSystem,
    daemon: FakeDaemon,
    launcher: FakeLauncher,
    destination: Option<&str>,
) -> Pipeline<FakeDaemon, FakeLauncher> {
    let fs: Arc<dyn FileSystem> = Arc::new(fs.clone());
    Pipeline::new(
        daemon,
        Box::new(FileMaterializer::new(Arc::clone(&fs), environment())),
        launcher,
        Arc::clone(&fs),
        ResultWriter::new(destination.map(str::to_string), Arc::clone(&fs)),
        PipelineOptions::default(),
    )
}

fn spec() -> ActionSpec {
    ActionSpecBuilder::new("actions/hello-world-javascript-action@v1")
        .with_input("who-to-greet", "Mona")
        .actor("octocat")
        .build()
}

#[tokio::test]
async fn successful_run_writes_extracted_outputs() {
    init_tracing();
    let fs = MockFileSystem::new();
    let launcher = FakeLauncher::new(
        0,
        "[CI/action] ::set-output::time=12:00\n[CI/action] Success\n",
    );
    let launched = launcher.launched();

    let report = pipeline(&fs, FakeDaemon::ready(), launcher, Some(RESULT_PATH))
        .run(&spec())
        .await
        .unwrap();

    assert_eq!(report.exit_code, 0);
    assert_eq!(report.outputs.get("time"), Some("12:00"));
    assert_eq!(report.result_path, PathBuf::from(RESULT_PATH));
    assert_eq!(fs.read_to_string(RESULT_PATH.as_ref()).unwrap(), "time=12:00\n");

    let launched = launched.lock().unwrap();
    assert_eq!(launched.len(), 1);
    assert_eq!(launched[0], report.command);
    assert_eq!(launched[0].flag_value("--actor"), Some("octocat"));
}

#[tokio::test]
async fn config_files_are_materialized_before_launch() {
    init_tracing();
    let fs = MockFileSystem::new();
    let paths = RunPaths::default();

    pipeline(&fs, FakeDaemon::ready(), FakeLauncher::new(0, ""), Some(RESULT_PATH))
        .run(&spec())
        .await
        .unwrap();

    let workflow = fs.read_to_string(&paths.workflow).unwrap();
    assert!(workflow.contains("actions/hello-world-javascript-action@v1"));
    assert!(workflow.contains("who-to-greet: Mona"));

    let env = fs.read_to_string(&paths.env).unwrap();
    assert_eq!(env, "DRONE_BUILD_NUMBER=12\n");

    let secrets = fs.read_to_string(paths.secret.as_ref().unwrap()).unwrap();
    assert_eq!(secrets, "GITHUB_TOKEN=ghp_secret\n");
}

#[tokio::test]
async fn no_declarations_still_writes_empty_result() {
    init_tracing();
    let fs = MockFileSystem::new();

    let report = pipeline(&fs, FakeDaemon::ready(), FakeLauncher::new(0, "hello\n"), Some(RESULT_PATH))
        .run(&spec())
        .await
        .unwrap();

    assert!(report.outputs.is_empty());
    assert_eq!(fs.contents(RESULT_PATH), Some(Vec::new()));
}

#[tokio::test]
async fn non_zero_exit_still_extracts_outputs() {
    init_tracing();
    let fs = MockFileSystem::new();
    let launcher = FakeLauncher::new(2, "::set-output::partial=yes\nboom\n");

    let result = pipeline(&fs, FakeDaemon::ready(), launcher, Some(RESULT_PATH))
        .run(&spec())
        .await;

    match result {
        Err(ActrunError::ExecutionFailed {
            program,
            exit_code,
            outputs,
        }) => {
            assert_eq!(program, "act");
            assert_eq!(exit_code, 2);
            assert_eq!(outputs.get("partial"), Some("yes"));
        }
        other => panic!("Expected ExecutionFailed, got: {:?}", other),
    }
    assert_eq!(fs.read_to_string(RESULT_PATH.as_ref()).unwrap(), "partial=yes\n");
}

#[tokio::test]
async fn daemon_failure_aborts_before_any_file_write() {
    init_tracing();
    let fs = MockFileSystem::new();
    let launcher = FakeLauncher::new(0, "::set-output::a=b\n");
    let launched = launcher.launched();
    let daemon = FakeDaemon::never_ready();

    let result = pipeline(&fs, daemon.clone(), launcher, Some(RESULT_PATH))
        .run(&spec())
        .await;

    assert!(matches!(result, Err(ActrunError::DaemonNotReady(_))));
    assert_eq!(daemon.calls(), 1);
    assert!(fs.paths().is_empty());
    assert!(launched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn materialization_failure_prevents_launch() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.deny_writes("/tmp/workflow.yml");
    let launcher = FakeLauncher::new(0, "");
    let launched = launcher.launched();

    let result = pipeline(&fs, FakeDaemon::ready(), launcher, Some(RESULT_PATH))
        .run(&spec())
        .await;

    match result {
        Err(ActrunError::Materialize { what, .. }) => assert_eq!(what, "workflow"),
        other => panic!("Expected Materialize error, got: {:?}", other),
    }
    assert!(launched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn payload_write_failure_prevents_launch() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.deny_writes("/tmp/event.json");
    let launcher = FakeLauncher::new(0, "");
    let launched = launcher.launched();
    let spec = ActionSpecBuilder::new("a@v1").event_payload("{}").build();

    let result = pipeline(&fs, FakeDaemon::ready(), launcher, Some(RESULT_PATH))
        .run(&spec)
        .await;

    assert!(matches!(result, Err(ActrunError::PayloadWrite { .. })));
    assert!(launched.lock().unwrap().is_empty());
    assert!(!fs.exists(RESULT_PATH.as_ref()));
}

#[tokio::test]
async fn spawn_failure_skips_result_writing() {
    init_tracing();
    let fs = MockFileSystem::new();

    let result = pipeline(&fs, FakeDaemon::ready(), FakeLauncher::unspawnable(), Some(RESULT_PATH))
        .run(&spec())
        .await;

    assert!(matches!(result, Err(ActrunError::Spawn { .. })));
    assert!(!fs.exists(RESULT_PATH.as_ref()));
}

#[tokio::test]
async fn missing_destination_fails_the_run() {
    init_tracing();
    let fs = MockFileSystem::new();
    let launcher = FakeLauncher::new(0, "::set-output::a=b\n");

    let result = pipeline(&fs, FakeDaemon::ready(), launcher, Some(""))
        .run(&spec())
        .await;

    assert!(matches!(result, Err(ActrunError::OutputDestinationUnset(_))));
}

#[tokio::test]
async fn failed_run_without_destination_reports_the_runner_failure() {
    init_tracing();
    let fs = MockFileSystem::new();
    let launcher = FakeLauncher::new(2, "::set-output::a=b\n");

    let result = pipeline(&fs, FakeDaemon::ready(), launcher, Some(""))
        .run(&spec())
        .await;

    match result {
        Err(ActrunError::ExecutionFailed {
            exit_code, outputs, ..
        }) => {
            assert_eq!(exit_code, 2);
            assert_eq!(outputs.get("a"), Some("b"));
            assert_eq!(outputs.len(), 1);
        }
        other => panic!("Expected ExecutionFailed, got: {:?}", other),
    }
    assert!(!fs.exists(RESULT_PATH.as_ref()));
    assert!(fs.paths().iter().all(|p| p.starts_with("/tmp")));
}
