//! Line sequences read from source and formatted files
//!
//! Files are read with universal newlines: CRLF and lone CR become LF, and every
//! line keeps its trailing `\n` so that joining a slice reproduces the text.

use std::fs;
use std::ops::Deref;
use std::path::Path;

use crate::error::{Result, StyleDiffError};

/// Line ending styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingStyle {
    /// Unix/Linux/Mac: \n
    Lf,
    /// Windows: \r\n
    Crlf,
    /// Classic Mac: \r
    Cr,
}

/// Detect the first line ending used in `content`
///
/// Returns `None` for text without any line break.
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::lines::{detect_line_ending, LineEndingStyle};
///
/// assert_eq!(detect_line_ending("a\nb\n"), Some(LineEndingStyle::Lf));
/// assert_eq!(detect_line_ending("a\r\nb\r\n"), Some(LineEndingStyle::Crlf));
/// assert_eq!(detect_line_ending("no breaks"), None);
/// ```
#[must_use]
pub fn detect_line_ending(content: &str) -> Option<LineEndingStyle> {
    let bytes = content.as_bytes();

    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    return Some(LineEndingStyle::Crlf);
                }
                return Some(LineEndingStyle::Cr);
            }
            b'\n' => return Some(LineEndingStyle::Lf),
            _ => {}
        }
    }

    None
}

/// Convert every CRLF and lone CR to LF
#[must_use]
pub fn normalize_to_lf(text: &str) -> String {
    // CRLF first, otherwise each CRLF would turn into two breaks
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Immutable ordered lines of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Split text into lines, each keeping its trailing newline
    ///
    /// # Examples
    ///
    /// ```
    /// use kodegen_style_diff::lines::LineSequence;
    ///
    /// let seq = LineSequence::from_text("int a;\r\nint b;");
    /// assert_eq!(seq.as_slice(), ["int a;\n", "int b;"]);
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let normalized = normalize_to_lf(text);
        let lines = normalized
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Read a UTF-8 text file into a line sequence
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| StyleDiffError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match detect_line_ending(&text) {
            Some(LineEndingStyle::Lf) | None => {}
            Some(style) => log::debug!(
                "Normalizing {:?} line endings in {}",
                style,
                path.display()
            ),
        }

        Ok(Self::from_text(&text))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl Deref for LineSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
