//! JSON code report output and process exit codes

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, StyleDiffError};
use crate::issue::IssueRecord;

pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_ISSUES_FOUND: i32 = 1;
pub const EXIT_FAILED: i32 = 2;

/// Serialize issues as a JSON array indented with four spaces
pub fn render_report(issues: &[IssueRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    issues.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the report to `result_file`, or to stdout when none is given
pub fn write_report(issues: &[IssueRecord], result_file: Option<&Path>) -> Result<()> {
    let json = render_report(issues)?;

    match result_file {
        Some(path) => std::fs::write(path, json).map_err(|source| StyleDiffError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .map_err(|source| StyleDiffError::Write {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}

/// `0` for a clean run, `1` when issues were found, `2` when the run failed
///
/// A failed external tool passes its own non-zero exit code through instead
/// of `2`.
#[must_use]
pub fn exit_code(outcome: &Result<Vec<IssueRecord>>) -> i32 {
    match outcome {
        Ok(issues) if issues.is_empty() => EXIT_CLEAN,
        Ok(_) => EXIT_ISSUES_FOUND,
        Err(e) => {
            log::error!("{e}");
            match e {
                StyleDiffError::ToolFailed {
                    code: Some(code), ..
                } if *code != EXIT_CLEAN => *code,
                _ => EXIT_FAILED,
            }
        }
    }
}
