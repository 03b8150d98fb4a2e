use std::collections::BTreeMap;
use std::path::PathBuf;

/// Runner label the requested image is bound to via `-P`.
pub const PLATFORM_LABEL: &str = "ubuntu-latest";

/// Environment variables routed to the secret file unless configured otherwise.
pub const DEFAULT_SECRETS: &[&str] = &["GITHUB_TOKEN"];

/// One action invocation, as handed to the pipeline.
///
/// Built by the config layer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionSpec {
    /// Action reference, e.g. `actions/hello-world-javascript-action@v1`.
    pub uses: String,
    /// Action inputs (`with:`).
    pub with: BTreeMap<String, String>,
    /// Step environment (`env:`).
    pub env: BTreeMap<String, String>,
    /// Container image bound to the runner label.
    pub image: String,
    /// Raw webhook event payload; empty means none.
    pub event_payload: String,
    /// Actor override; empty means the runner's default.
    pub actor: String,
    pub verbose: bool,
    /// Environment variable names written to the secret file instead of the
    /// env file.
    pub secrets: Vec<String>,
}

/// Fixed locations of the files shared with the runner.
///
/// These are process-wide; two concurrent runs must use distinct paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub workflow: PathBuf,
    pub env: PathBuf,
    /// `None` disables the externalized secret file.
    pub secret: Option<PathBuf>,
    pub event_payload: PathBuf,
}

impl Default for RunPaths {
    fn default() -> Self {
        Self {
            workflow: PathBuf::from("/tmp/workflow.yml"),
            env: PathBuf::from("/tmp/action.env"),
            secret: Some(PathBuf::from("/tmp/action.secrets")),
            event_payload: PathBuf::from("/tmp/event.json"),
        }
    }
}
