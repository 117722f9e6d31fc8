//! Visible rendering of invisible whitespace in reported code blocks

/// Middle dot shown for a space
pub const SPACE_GLYPH: char = '\u{00B7}';

/// Shown for a tab; always four arrows regardless of the configured tab width
pub const TAB_GLYPH: &str = "\u{2192}\u{2192}\u{2192}\u{2192}";

/// Down arrow shown before each line break
pub const NEWLINE_GLYPH: char = '\u{2193}';

/// Replace spaces, tabs and newlines with visible glyphs
///
/// Newlines are kept after their glyph so the block still renders as lines.
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::whitespace::visualize_whitespace;
///
/// assert_eq!(visualize_whitespace("a b\tc\n"), "a·b→→→→c↓\n");
/// ```
#[must_use]
pub fn visualize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        match ch {
            ' ' => out.push(SPACE_GLYPH),
            '\t' => out.push_str(TAB_GLYPH),
            '\n' => {
                out.push(NEWLINE_GLYPH);
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    out
}
