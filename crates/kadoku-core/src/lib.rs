//! Core data structures for Kadoku grids.
//!
//! This crate provides the data model and geometry for Sudoku-family puzzles
//! of arbitrary block length `k` (board side `N = k²`). These structures are
//! shared by the solving engine and any driver that renders or drives a grid.
//!
//! # Overview
//!
//! The crate is organized around three concepts:
//!
//! 1. **Data model** - Immutable grid values
//!    - [`grid`]: [`Grid`], [`Block`], and [`Cell`], plus the empty-grid
//!      generator [`Grid::empty`]
//! 2. **Candidate sets** - Efficient possibility tracking
//!    - [`value_set`]: [`ValueSet`], a bitset over the values `1..=N`
//! 3. **Topology** - Unit membership derived from band arithmetic
//!    - [`topology`]: peer queries over blocks, rows, and columns
//!
//! Every grid is an immutable value: transitions build a new [`Grid`] (see
//! [`Grid::map_cells`]) and the superseded value is dropped by whoever owns
//! it. This is the crate's concurrency contract; no interior mutability or
//! shared state exists anywhere.
//!
//! # Examples
//!
//! ```
//! use kadoku_core::Grid;
//!
//! // A 9×9 board (block length 3), all cells open
//! let grid = Grid::empty(3)?;
//!
//! assert_eq!(grid.side(), 9);
//! assert_eq!(grid.guess(0, 0), None);
//! assert_eq!(grid.peers_in_row(grid.cell(0, 0)).len(), 8);
//! # Ok::<(), kadoku_core::GridError>(())
//! ```

pub mod grid;
pub mod topology;
pub mod value_set;

// Re-export commonly used types
pub use self::{
    grid::{Block, Cell, Grid, GridError, MAX_BLOCK_LEN},
    value_set::ValueSet,
};
