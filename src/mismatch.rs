//! Gaps between consecutive match blocks
//!
//! Each gap carries one line of leading context taken from the end of the
//! preceding match. A gap is reported at the source index where matching
//! resumes, which is the line right after the diverging region.

use crate::matcher::MatchBlock;

/// Virtual match in front of the first aligner block so that a divergence on
/// the first lines of a file is reported too
const ORIGIN: MatchBlock = MatchBlock::new(0, 0, 0);

/// One diverging region, raw (not whitespace-visualized)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchBlock {
    /// Source index where the next match resumes
    pub line_number: usize,
    pub before: String,
    pub after: String,
}

/// Mismatch between two consecutive match blocks, if any
///
/// Returns `None` when the blocks are contiguous in the source, so regions that
/// only add lines to the target are not reported.
#[must_use]
pub fn mismatching_block<T: AsRef<str>>(
    previous: &MatchBlock,
    current: &MatchBlock,
    source: &[T],
    target: &[T],
) -> Option<MismatchBlock> {
    if previous.source_end() == current.source_start {
        return None;
    }

    // with no preceding matched line the lookback is empty
    let before = join_lines(
        source,
        previous.source_end().saturating_sub(1),
        current.source_start,
    );
    let after = join_lines(
        target,
        previous.target_end().saturating_sub(1),
        current.target_start,
    );

    Some(MismatchBlock {
        line_number: current.source_start,
        before,
        after,
    })
}

/// All mismatches of an aligner result, in source order
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::matcher::matching_blocks;
/// use kodegen_style_diff::mismatch::mismatching_blocks;
///
/// let source = ["foo\n", "bar\n", "baz\n"];
/// let target = ["foo\n", "BAR\n", "baz\n"];
/// let blocks = matching_blocks(&source, &target);
///
/// let mismatches = mismatching_blocks(&blocks, &source, &target);
/// assert_eq!(mismatches.len(), 1);
/// assert_eq!(mismatches[0].line_number, 2);
/// assert_eq!(mismatches[0].before, "foo\nbar\n");
/// assert_eq!(mismatches[0].after, "foo\nBAR\n");
/// ```
#[must_use]
pub fn mismatching_blocks<T: AsRef<str>>(
    blocks: &[MatchBlock],
    source: &[T],
    target: &[T],
) -> Vec<MismatchBlock> {
    std::iter::once(&ORIGIN)
        .chain(blocks)
        .zip(blocks)
        .filter_map(|(previous, current)| mismatching_block(previous, current, source, target))
        .collect()
}

fn join_lines<T: AsRef<str>>(lines: &[T], start: usize, end: usize) -> String {
    let end = end.min(lines.len());
    let start = start.min(end);
    lines[start..end].iter().map(|line| line.as_ref()).collect()
}
