//! File/line-addressable style issues built from mismatching blocks

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::matcher::matching_blocks;
use crate::message::issue_message;
use crate::mismatch::mismatching_blocks;
use crate::whitespace::visualize_whitespace;

/// Symbol carried by every reported style issue
pub const CODE_STYLE_SYMBOL: &str = "Code Style issue";

/// One entry of the JSON code report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub symbol: String,
    pub message: String,
    pub path: String,
    pub line: usize,
}

impl IssueRecord {
    #[must_use]
    pub fn code_style(path: &Path, line: usize, message: String) -> Self {
        Self {
            symbol: CODE_STYLE_SYMBOL.to_string(),
            message,
            path: path.to_string_lossy().into_owned(),
            line,
        }
    }
}

/// Compare a source file with its reformatted version
///
/// Issues come back in source order, so their `line` values never decrease.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kodegen_style_diff::issue::extract_issues;
///
/// let source = ["foo\n", "bar\n", "baz\n"];
/// let target = ["foo\n", "BAR\n", "baz\n"];
/// let issues = extract_issues(Path::new("src/a.c"), &source, &target);
///
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues[0].line, 2);
/// assert!(issues[0].message.contains("bar↓"));
/// assert!(issues[0].message.contains("BAR↓"));
/// ```
#[must_use]
pub fn extract_issues<T: AsRef<str> + Eq + std::hash::Hash>(
    relative: &Path,
    source: &[T],
    target: &[T],
) -> Vec<IssueRecord> {
    let blocks = matching_blocks(source, target);

    mismatching_blocks(&blocks, source, target)
        .into_iter()
        .map(|block| {
            let before = visualize_whitespace(&block.before);
            let after = visualize_whitespace(&block.after);
            IssueRecord::code_style(relative, block.line_number, issue_message(&before, &after))
        })
        .collect()
}
