// src/output/parser.rs

use super::OutputRecord;

/// Marker the runner prints in front of an output declaration.
pub const SET_OUTPUT_MARKER: &str = "::set-output::";

/// Extract `::set-output::key=value` declarations from captured stdout.
///
/// Each line is split at the first marker; whatever follows is split at the
/// first `=`. Key and value are kept verbatim, so a value may itself contain
/// `=`. Lines without the marker, or with no `=` after it, are skipped.
/// Later declarations of a key replace earlier ones.
///
/// Invalid UTF-8 is replaced lossily; this function never fails.
pub fn parse_outputs(captured: &[u8]) -> OutputRecord {
    let text = String::from_utf8_lossy(captured);
    let mut record = OutputRecord::new();

    for line in text.lines() {
        if let Some((key, value)) = parse_line(line) {
            record.insert(key, value);
        }
    }

    record
}

/// Parse a single line, returning `(key, value)` for a well-formed declaration.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(SET_OUTPUT_MARKER)?;
    let suffix = &line[idx + SET_OUTPUT_MARKER.len()..];
    suffix.split_once('=')
}
