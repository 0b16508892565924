//! YAML clean-up for provider session dumps
//!
//! Dumps produced by spreadsheet tools or by redirecting a console often carry a
//! byte-order mark, Windows line endings and stray control characters that
//! `serde_yaml_ng` refuses. This module normalises the text without parsing it.

use crate::{Result, TelemetryError};

/// Remove the BOM and control characters (except `\n` and `\t`) and normalise
/// line endings to `\n`.
pub fn clean_session_yaml(yaml: &str) -> Result<String> {
    let body = yaml.strip_prefix('\u{feff}').unwrap_or(yaml);
    let mut result = String::with_capacity(body.len());

    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    result.push('\n');
                }
            }
            '\n' | '\t' => result.push(ch),
            c if c.is_control() => continue,
            c => result.push(c),
        }
    }

    if result.trim().is_empty() {
        return Err(TelemetryError::parse_error(
            "Session YAML cleaning",
            "document is empty after cleaning",
        ));
    }

    Ok(result)
}
