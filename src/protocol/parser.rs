//! Parsing of the backend's line-oriented responses.
//!
//! # Responsibilities
//! - Match the greeting line and extract the daemon version
//! - Turn a multiline response block into a key/value record
//!
//! # Design Decisions
//! - Scanning stops at the success terminator; later lines are ignored
//! - Lines that match no pattern are skipped, never an error
//! - Duplicate keys overwrite (last write wins)

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Key/value mapping extracted from one response block.
pub type Record = HashMap<String, String>;

/// The line that terminates a successful response block.
pub const TERMINATOR: &str = "OK";

static GREETING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^OK MPD ([0-9.]+)$").expect("greeting pattern compiles"));

static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*): (.*)$").expect("field pattern compiles"));

/// Match the daemon's greeting line and extract the dotted version.
///
/// Returns `None` for anything that is not exactly `OK MPD <version>`.
pub fn parse_greeting(line: &str) -> Option<&str> {
    GREETING_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a response block into a [`Record`].
///
/// Iterates lines in order and stops at the first line equal to
/// [`TERMINATOR`]. Every `key: value` line before it is recorded; anything
/// else (blank lines, unrecognized fields) is skipped. An input with zero
/// matching lines yields an empty record, not an error.
pub fn parse_response<S: AsRef<str>>(lines: &[S]) -> Record {
    let mut parsed = Record::new();

    for line in lines {
        let line = line.as_ref();

        if line == TERMINATOR {
            break;
        }

        if let Some(caps) = FIELD_RE.captures(line) {
            parsed.insert(caps[1].to_string(), caps[2].to_string());
        }
    }

    parsed
}
