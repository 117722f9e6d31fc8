//! Character-level change span inside a replaced line
//!
//! Used to highlight the part of a line that the formatter rewrote.

use std::ops::Range;

/// Common prefix/suffix split of two lines, measured in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineChange {
    pub prefix_len: usize,
    pub suffix_len: usize,
    old_len: usize,
    new_len: usize,
}

impl InlineChange {
    /// Find the changed middle between `old` and `new`
    ///
    /// # Examples
    ///
    /// ```
    /// use kodegen_style_diff::intraline::InlineChange;
    ///
    /// let change = InlineChange::new("if(x){", "if (x) {");
    /// assert_eq!(change.old_range(), 2..5);
    /// assert_eq!(change.new_range(), 2..7);
    /// ```
    #[must_use]
    pub fn new(old: &str, new: &str) -> Self {
        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();

        let prefix_len = old_chars
            .iter()
            .zip(&new_chars)
            .take_while(|(a, b)| a == b)
            .count();

        // the suffix may not reuse characters already claimed by the prefix
        let max_suffix = old_chars.len().min(new_chars.len()) - prefix_len;
        let suffix_len = old_chars
            .iter()
            .rev()
            .zip(new_chars.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Self {
            prefix_len,
            suffix_len,
            old_len: old_chars.len(),
            new_len: new_chars.len(),
        }
    }

    /// Character range of `old` that differs
    #[must_use]
    pub fn old_range(&self) -> Range<usize> {
        self.prefix_len..self.old_len - self.suffix_len
    }

    /// Character range of `new` that differs
    #[must_use]
    pub fn new_range(&self) -> Range<usize> {
        self.prefix_len..self.new_len - self.suffix_len
    }
}
