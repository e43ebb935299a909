//! Work distribution: how the pixels of a frame are split between workers.
//!
//! Three strategies are provided:
//!
//! - [`StaticPartition`]: each worker gets one contiguous run of the
//!   flattened pixel index space, fixed up front.
//! - [`RowClaims`]: workers repeatedly claim whole rows from a shared
//!   [`WorkCursor`].
//! - [`BlockClaims`]: workers claim fixed-size blocks of a [`BlockGrid`]
//!   from a shared [`WorkCursor`].
//!
//! Every strategy hands out [`Span`]s. Across all workers of one render the
//! spans cover each pixel of the frame exactly once, which is what lets the
//! workers write into a shared buffer without locking.

mod block_claim;
mod cursor;
mod row_claim;
mod static_partition;

use std::ops::Range;

pub use block_claim::{Block, BlockClaims, BlockGrid, BlockSegment};
pub use cursor::WorkCursor;
pub use row_claim::RowClaims;
pub use static_partition::StaticPartition;

/// A horizontal run of pixels `[x_start, x_end)` on buffer row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: usize,
    pub x_start: usize,
    pub x_end: usize,
}

impl Span {
    /// Number of pixels in the span.
    pub fn len(&self) -> usize {
        self.x_end - self.x_start
    }

    pub fn is_empty(&self) -> bool {
        self.x_end == self.x_start
    }

    /// Indices of the span in a buffer with the given row stride.
    pub fn indices(&self, stride: usize) -> Range<usize> {
        let row = self.y * stride;
        row + self.x_start..row + self.x_end
    }
}

/// Splits a range of flattened positions into per-row runs.
///
/// Yields `(row, columns)` where `row = position / row_len`. The caller
/// decides what a "row" of the flattened sequence means.
#[derive(Debug, Clone)]
pub(crate) struct Runs {
    row_len: usize,
    position: usize,
    end: usize,
}

impl Runs {
    pub(crate) fn new(positions: Range<usize>, row_len: usize) -> Self {
        // An empty row length would never advance
        let end = if row_len == 0 { positions.start } else { positions.end };
        Self {
            row_len,
            position: positions.start,
            end,
        }
    }
}

impl Iterator for Runs {
    type Item = (usize, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }

        let row = self.position / self.row_len;
        let run_end = self.end.min((row + 1) * self.row_len);
        let first = self.position - row * self.row_len;
        let last = run_end - row * self.row_len;
        self.position = run_end;

        Some((row, first..last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_split_at_row_boundaries() {
        let runs: Vec<_> = Runs::new(3..12, 5).collect();
        assert_eq!(runs, vec![(0, 3..5), (1, 0..5), (2, 0..2)]);
    }

    #[test]
    fn test_runs_within_one_row() {
        let runs: Vec<_> = Runs::new(6..9, 5).collect();
        assert_eq!(runs, vec![(1, 1..4)]);
    }

    #[test]
    fn test_runs_empty() {
        assert_eq!(Runs::new(4..4, 5).count(), 0);
        assert_eq!(Runs::new(0..10, 0).count(), 0);
    }

    #[test]
    fn test_span_indices() {
        let span = Span {
            y: 2,
            x_start: 1,
            x_end: 4,
        };
        assert_eq!(span.indices(10), 21..24);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }
}
