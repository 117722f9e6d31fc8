//! Greedy longest-block alignment of two line sequences
//!
//! The longest common contiguous run is taken first, then the ranges left and
//! right of it are aligned the same way until no common run remains. Ties go to
//! the earliest position in the source, then the earliest in the target.
//!
//! Lines that are very frequent in a long target (blank lines, lone braces) do
//! not seed matches; they only extend a match found around them.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Targets at least this long get popular lines pruned from the index
pub const POPULAR_MIN_TARGET_LEN: usize = 200;

// ============================================================================
// PUBLIC TYPES
// ============================================================================

/// `source[source_start..][..length] == target[target_start..][..length]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchBlock {
    pub source_start: usize,
    pub target_start: usize,
    pub length: usize,
}

impl MatchBlock {
    #[must_use]
    pub const fn new(source_start: usize, target_start: usize, length: usize) -> Self {
        Self {
            source_start,
            target_start,
            length,
        }
    }

    #[must_use]
    pub const fn source_end(&self) -> usize {
        self.source_start + self.length
    }

    #[must_use]
    pub const fn target_end(&self) -> usize {
        self.target_start + self.length
    }
}

/// Kind of edit between two aligned regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One span of an edit script derived from match blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

// ============================================================================
// MATCHER
// ============================================================================

/// Aligner over two borrowed sequences
///
/// Keeps an index of target positions per element so each longest-match probe
/// only visits positions where the element actually occurs.
pub struct SequenceMatcher<'a, T> {
    source: &'a [T],
    target: &'a [T],
    target_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    #[must_use]
    pub fn new(source: &'a [T], target: &'a [T]) -> Self {
        let mut target_index: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in target.iter().enumerate() {
            target_index.entry(item).or_default().push(j);
        }

        if target.len() >= POPULAR_MIN_TARGET_LEN {
            let limit = target.len() / 100 + 1;
            target_index.retain(|_, positions| positions.len() <= limit);
        }

        Self {
            source,
            target,
            target_index,
        }
    }

    /// Longest common run inside `source[alo..ahi]` and `target[blo..bhi]`
    ///
    /// Returns a zero-length block at `(alo, blo)` when the ranges share nothing.
    #[must_use]
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best = MatchBlock::new(alo, blo, 0);
        // run length of the match ending at target index j, for the previous source line
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();

            if let Some(positions) = self.target_index.get(&self.source[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let run = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, run);

                    // strict comparison keeps the earliest candidate on ties
                    if run > best.length {
                        best = MatchBlock::new(i + 1 - run, j + 1 - run, run);
                    }
                }
            }

            run_ending_at = next_runs;
        }

        // grow over equal lines the index does not hold
        while best.source_start > alo
            && best.target_start > blo
            && self.source[best.source_start - 1] == self.target[best.target_start - 1]
        {
            best = MatchBlock::new(best.source_start - 1, best.target_start - 1, best.length + 1);
        }
        while best.source_end() < ahi
            && best.target_end() < bhi
            && self.source[best.source_end()] == self.target[best.target_end()]
        {
            best.length += 1;
        }

        best
    }

    /// Ordered, non-overlapping match blocks terminated by a zero-length sentinel
    /// at `(source.len(), target.len())`
    ///
    /// Adjacent blocks are merged, so identical inputs produce one block plus the
    /// sentinel.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let source_len = self.source.len();
        let target_len = self.target.len();

        let mut pending = vec![(0, source_len, 0, target_len)];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.length == 0 {
                continue;
            }

            if alo < block.source_start && blo < block.target_start {
                pending.push((alo, block.source_start, blo, block.target_start));
            }
            if block.source_end() < ahi && block.target_end() < bhi {
                pending.push((block.source_end(), ahi, block.target_end(), bhi));
            }
            found.push(block);
        }

        found.sort_unstable_by_key(|block| (block.source_start, block.target_start));

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match merged.last_mut() {
                Some(last)
                    if last.source_end() == block.source_start
                        && last.target_end() == block.target_start =>
                {
                    last.length += block.length;
                }
                _ => merged.push(block),
            }
        }

        merged.push(MatchBlock::new(source_len, target_len, 0));
        merged
    }
}

/// Align two sequences and return their match blocks
///
/// # Examples
///
/// ```
/// use kodegen_style_diff::matcher::{matching_blocks, MatchBlock};
///
/// let source = ["foo\n", "bar\n", "baz\n"];
/// let target = ["foo\n", "BAR\n", "baz\n"];
/// assert_eq!(
///     matching_blocks(&source, &target),
///     vec![
///         MatchBlock::new(0, 0, 1),
///         MatchBlock::new(2, 2, 1),
///         MatchBlock::new(3, 3, 0),
///     ]
/// );
/// ```
#[must_use]
pub fn matching_blocks<T: Eq + Hash>(source: &[T], target: &[T]) -> Vec<MatchBlock> {
    SequenceMatcher::new(source, target).matching_blocks()
}

/// Convert match blocks into an edit script covering both sequences
///
/// Source ranges of the result partition `0..source_len` and target ranges
/// partition `0..target_len`.
#[must_use]
pub fn opcodes(blocks: &[MatchBlock]) -> Vec<Opcode> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    for block in blocks {
        let tag = match (i < block.source_start, j < block.target_start) {
            (true, true) => Some(OpTag::Replace),
            (true, false) => Some(OpTag::Delete),
            (false, true) => Some(OpTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            result.push(Opcode {
                tag,
                source: i..block.source_start,
                target: j..block.target_start,
            });
        }

        i = block.source_end();
        j = block.target_end();
        if block.length > 0 {
            result.push(Opcode {
                tag: OpTag::Equal,
                source: block.source_start..i,
                target: block.target_start..j,
            });
        }
    }

    result
}
