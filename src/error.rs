//! Error types shared by the ocean grid and its run-length encoding.

use crate::schema::Cell;

/// Errors reported by ocean and run-length encoding operations.
///
/// The three `Corrupt*` variants are only ever produced by
/// [`RunList::check`](crate::RunList::check): they indicate internal
/// corruption of the encoding (a programming error), not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OceanError {
    /// Grid width or height is zero.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    /// Explicit run lengths do not tile the grid.
    #[error("run lengths sum to {actual} but the grid has {expected} cells")]
    RunSumMismatch { expected: usize, actual: usize },

    /// Coordinate outside the grid. Coordinates never wrap; only neighbor
    /// lookup during a time step is toroidal.
    #[error("coordinate ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Run lengths no longer cover the grid exactly.
    #[error("corrupt encoding: runs cover {actual} cells, expected {expected}")]
    CorruptTotalLength { expected: usize, actual: usize },

    /// Two adjacent runs hold the same cell and should have been merged.
    #[error(
        "corrupt encoding: runs {position} and {} both hold {cell:?} \
         (lengths {left_len} and {right_len})",
        .position + 1
    )]
    CorruptAdjacentRuns {
        /// Ordinal position of the first run of the offending pair.
        position: usize,
        cell: Cell,
        left_len: usize,
        right_len: usize,
    },

    /// A zero-length run survived a split.
    #[error("corrupt encoding: zero-length {cell:?} run at position {position}")]
    CorruptEmptyRun { position: usize, cell: Cell },

    /// A splice primitive was asked to insert before the head sentinel,
    /// after the tail sentinel, or to remove a sentinel.
    #[error("splice would cross a sentinel boundary")]
    InvalidSplice,
}
