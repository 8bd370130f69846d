//! GitHub Actions runtime glue
//!
//! Reads the triggering pull request out of the event payload and writes
//! step outputs and failure annotations the way the runner expects them.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use url::Url;

/// Output name carrying the temporary branch of a successful run
pub const TEMP_BRANCH_OUTPUT: &str = "temp-branch";

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    pull_request: Option<NumberedItem>,
    issue: Option<NumberedItem>,
    comment: Option<EventComment>,
}

#[derive(Debug, Deserialize)]
struct NumberedItem {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct EventComment {
    issue_url: Option<String>,
}

/// Find the pull request number an event refers to
///
/// Checks `pull_request.number`, then `issue.number`, then the last path
/// segment of `comment.issue_url`.
pub fn trigger_from_event(payload: &str) -> Result<Option<u64>> {
    let event: EventPayload = serde_json::from_str(payload)
        .map_err(|e| Error::Event(format!("invalid event payload: {e}")))?;

    if let Some(pr) = event.pull_request {
        return Ok(Some(pr.number));
    }
    if let Some(issue) = event.issue {
        return Ok(Some(issue.number));
    }

    Ok(event
        .comment
        .and_then(|c| c.issue_url)
        .as_deref()
        .and_then(issue_number_from_url))
}

/// Read an event payload file and find its pull request number
pub fn read_trigger_from_event_file(path: &Path) -> Result<Option<u64>> {
    let payload = fs::read_to_string(path)
        .map_err(|e| Error::Event(format!("failed to read {}: {e}", path.display())))?;
    trigger_from_event(&payload)
}

fn issue_number_from_url(issue_url: &str) -> Option<u64> {
    let url = Url::parse(issue_url).ok()?;
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?
        .parse()
        .ok()
}

/// Record a step output
///
/// Appends `name=value` to `output_file` (the runner's `$GITHUB_OUTPUT`)
/// when given, otherwise prints it to stdout.
pub fn set_output(name: &str, value: &str, output_file: Option<&Path>) -> Result<()> {
    let line = format!("{name}={value}\n");
    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(line.as_bytes())?;
        }
        None => print!("{line}"),
    }
    Ok(())
}

/// Workflow command that marks the step failed with `message`
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
