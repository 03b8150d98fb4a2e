// src/config/mod.rs

//! Configuration loading and validation for actrun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate and convert it into an `ActionSpec` plus daemon and pipeline
//!   settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    ActionSection, ConfigFile, DaemonSection, PathsSection, RawConfigFile, RunnerSection,
};
pub use validate::parse_duration;
