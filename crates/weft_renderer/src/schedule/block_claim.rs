//! Block tiling for the dynamic block strategy.
//!
//! The image is cut into horizontal bands `block_size` rows tall. Reading
//! the bands one after another, column by column, gives a single sequence of
//! `bands × width` columns; block `i` is the run `[i·bs, (i+1)·bs)` of that
//! sequence. A block that crosses the right edge of the image wraps onto
//! column 0 of the next band, so no block is ever truncated and every pixel
//! belongs to exactly one block.

use std::ops::Range;

use super::{Runs, Span, WorkCursor};

/// Geometry of the block tiling for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    width: usize,
    height: usize,
    block_size: usize,
}

impl BlockGrid {
    /// # Panics
    /// If `block_size` is zero.
    pub fn new(width: usize, height: usize, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be positive");
        Self {
            width,
            height,
            block_size,
        }
    }

    /// Number of `block_size`-tall bands, the last one possibly short.
    pub fn bands(&self) -> usize {
        self.height.div_ceil(self.block_size)
    }

    /// Number of blocks needed to cover the image.
    pub fn block_count(&self) -> usize {
        (self.bands() * self.width).div_ceil(self.block_size)
    }

    /// Block count of the image padded up to whole blocks in both
    /// directions. Never less than [`block_count`](Self::block_count).
    pub fn padded_block_count(&self) -> usize {
        self.width.div_ceil(self.block_size) * self.bands()
    }

    /// Decode a claimed block index.
    ///
    /// Returns `None` once the index lies past the last block, which is how
    /// a claiming worker learns there is nothing left to do.
    pub fn block(&self, index: usize) -> Option<Block> {
        if index >= self.block_count() {
            return None;
        }
        let start = index * self.block_size;
        Some(Block {
            grid: *self,
            index,
            columns: start..start + self.block_size,
        })
    }
}

/// One claimed block: a run of the band-major column sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    grid: BlockGrid,
    index: usize,
    columns: Range<usize>,
}

impl Block {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rectangles making up the block, in order.
    ///
    /// A block inside one band is a single segment. A block crossing the
    /// right edge continues at column 0 of the next band. The walk stops
    /// once it would enter a band below the image.
    pub fn segments(&self) -> impl Iterator<Item = BlockSegment> + '_ {
        let grid = self.grid;
        Runs::new(self.columns.clone(), grid.width)
            .take_while(move |(band, _)| *band < grid.bands())
            .map(move |(band, columns)| {
                let y_start = band * grid.block_size;
                BlockSegment {
                    x_start: columns.start,
                    x_end: columns.end,
                    y_start,
                    y_end: (y_start + grid.block_size).min(grid.height),
                }
            })
    }

    /// Every row span of every segment.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.segments().flat_map(|segment| segment.spans())
    }
}

/// Axis-aligned rectangle `[x_start, x_end) × [y_start, y_end)` of a block,
/// already clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSegment {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl BlockSegment {
    pub fn pixel_count(&self) -> usize {
        (self.x_end - self.x_start) * (self.y_end - self.y_start)
    }

    pub fn spans(self) -> impl Iterator<Item = Span> {
        (self.y_start..self.y_end).map(move |y| Span {
            y,
            x_start: self.x_start,
            x_end: self.x_end,
        })
    }
}

/// Blocks claimed one at a time from a shared cursor.
#[derive(Debug)]
pub struct BlockClaims<'c> {
    cursor: &'c WorkCursor,
    grid: BlockGrid,
    done: bool,
}

impl<'c> BlockClaims<'c> {
    pub fn new(cursor: &'c WorkCursor, grid: BlockGrid) -> Self {
        Self {
            cursor,
            grid,
            done: false,
        }
    }
}

impl Iterator for BlockClaims<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.done {
            return None;
        }

        let block = self.grid.block(self.cursor.claim());
        self.done = block.is_none();
        block
    }
}
