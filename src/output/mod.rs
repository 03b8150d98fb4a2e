// src/output/mod.rs

//! Output extraction.
//!
//! - [`parser`] turns captured runner stdout into an [`OutputRecord`].
//! - [`writer`] persists an [`OutputRecord`] to the file named by
//!   `DRONE_OUTPUT`.

use std::collections::BTreeMap;

pub mod parser;
pub mod writer;

pub use parser::{parse_outputs, SET_OUTPUT_MARKER};
pub use writer::{ResultWriter, OUTPUT_ENV_VAR};

/// Declared outputs of one run.
///
/// Backed by a `BTreeMap` so iteration, and therefore the result file, is in
/// ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRecord {
    values: BTreeMap<String, String>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Serialize as `key=value\n` lines.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OutputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = OutputRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
