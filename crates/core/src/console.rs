//! Console log post-processing
//!
//! Raw websocket log entries arrive oldest-first and carry terminal colour
//! codes. Snapshots expose them newest-first, plain text, no blank lines.

use kineticpanel_domain::constants::CONSOLE_OUTPUT_EVENT;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    // CSI sequences: ESC [ parameters intermediates final-byte
    static ref ANSI_CSI: Regex = Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]")
        .expect("ANSI_CSI should compile - this is a bug");
}

/// One entry of the websocket log buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConsoleEntry {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ConsoleEntry {
    fn is_console_output(&self) -> bool {
        self.event.as_deref().map_or(true, |event| event == CONSOLE_OUTPUT_EVENT)
    }

    fn line(&self) -> Option<&str> {
        self.args.first().map(String::as_str).or(self.text.as_deref())
    }
}

/// Cleaned console lines with their timestamps, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleLines {
    pub logs: Vec<String>,
    /// Parallel to `logs`; empty string when the entry had none
    pub timestamps: Vec<String>,
}

/// Remove ANSI CSI escape sequences.
pub fn strip_ansi(line: &str) -> String {
    ANSI_CSI.replace_all(line, "").into_owned()
}

/// Keep console output, strip colour codes, drop blank lines and reverse.
pub fn clean_console_output(entries: Vec<ConsoleEntry>) -> ConsoleLines {
    let mut cleaned = ConsoleLines::default();

    for entry in entries.iter().rev().filter(|entry| entry.is_console_output()) {
        let Some(raw) = entry.line() else { continue };
        let line = strip_ansi(raw).trim().to_string();
        if line.is_empty() {
            continue;
        }
        cleaned.logs.push(line);
        cleaned.timestamps.push(entry.timestamp.clone().unwrap_or_default());
    }

    cleaned
}
