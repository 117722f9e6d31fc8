//! Human-readable messages for mismatching blocks

/// Largest block, in lines, that is reported with its full content
pub const MAX_REPORTED_LINES: usize = 11;

/// Build the issue message for an already visualized before/after pair
///
/// Blocks longer than [`MAX_REPORTED_LINES`] get a short notice instead of
/// their content.
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::message::issue_message;
///
/// let message = issue_message("int·a;↓\n", "int a;↓\n");
/// assert!(message.contains("Original code:\n```diff\nint·a;↓\n```"));
/// assert!(message.contains("Fixed code:\n```diff\nint a;↓\n```"));
/// ```
#[must_use]
pub fn issue_message(before: &str, after: &str) -> String {
    let diff_size = count_lines(before);
    if diff_size > MAX_REPORTED_LINES {
        format!(
            "\nLarge block of code ({diff_size} lines) has issues\n\
             Non-compliant code blocks exceeding {MAX_REPORTED_LINES} lines are not reported\n"
        )
    } else {
        format!("\nOriginal code:\n```diff\n{before}```\nFixed code:\n```diff\n{after}```\n")
    }
}

/// Number of lines in `text`, breaking on every Unicode line boundary
///
/// Besides `\n`, `\r` and `\r\n` this counts vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators. A trailing terminator does not start another line.
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::message::count_lines;
///
/// assert_eq!(count_lines("a\nb\n"), 2);
/// assert_eq!(count_lines("a\u{000C}b\n"), 2);
/// assert_eq!(count_lines("a\r\nb"), 2);
/// assert_eq!(count_lines(""), 0);
/// ```
#[must_use]
pub fn count_lines(text: &str) -> usize {
    let mut count = 0;
    let mut open_line = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                count += 1;
                open_line = false;
            }
            '\n' | '\u{000B}' | '\u{000C}' | '\u{001C}' | '\u{001D}' | '\u{001E}'
            | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                count += 1;
                open_line = false;
            }
            _ => open_line = true,
        }
    }

    if open_line { count + 1 } else { count }
}
