//! Grid, block, and cell types for arbitrary block lengths.
//!
//! A grid with block length `k` consists of `k²` blocks, each holding `k²`
//! cells, for a board side of `N = k²`. All types in this module are plain
//! immutable values: every state transition builds a brand-new [`Grid`], and
//! a superseded grid is simply dropped by its owner.

use derive_more::{Display, Error};

use crate::ValueSet;

/// The largest supported block length (bounded by [`ValueSet::MAX_VALUE`]).
pub const MAX_BLOCK_LEN: u8 = 11;

/// An error from grid construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// The requested block length is outside the supported range.
    #[display("block length must be in 1..={MAX_BLOCK_LEN}, got {block_len}")]
    InvalidBlockLength {
        /// The rejected block length.
        block_len: u8,
    },
}

/// A single cell of the grid.
///
/// A cell is addressed by the block it lives in and its position within that
/// block; both indices are fixed at construction and never change. The
/// `possibilities` set is only meaningful while the cell carries no guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Index of the owning block (`0..k²`).
    pub block_index: u8,
    /// Position within the owning block (`0..k²`).
    pub cell_index: u8,
    /// Values this cell may still take, given its peers' guesses.
    pub possibilities: ValueSet,
    /// The value assigned to this cell, if any.
    pub guess: Option<u8>,
    /// How many times a guess has ever been assigned to this cell. Reset to
    /// zero only when the cell is cleared by a backtracking reset.
    pub passes: u32,
}

impl Cell {
    /// Returns `true` if this cell carries a guess.
    #[must_use]
    pub const fn has_guess(&self) -> bool {
        self.guess.is_some()
    }
}

/// One of the `k²` non-overlapping `k×k` sub-grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Positional index of this block (`0..k²`).
    pub block_index: u8,
    /// The block's cells, in row-major order within the block.
    pub cells: Vec<Cell>,
}

/// An immutable Sudoku-family grid of arbitrary block length.
///
/// # Examples
///
/// ```
/// use kadoku_core::Grid;
///
/// let grid = Grid::empty(3)?;
/// assert_eq!(grid.side(), 9);
/// assert_eq!(grid.blocks().len(), 9);
/// assert!(!grid.is_solved());
/// # Ok::<(), kadoku_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    solved: bool,
    block_len: u8,
    blocks: Vec<Block>,
}

impl Grid {
    /// Creates an empty grid with the given block length.
    ///
    /// Every cell starts unguessed with the full possibility range
    /// `1..=k²` and a pass count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBlockLength`] if `block_len` is zero or
    /// exceeds [`MAX_BLOCK_LEN`].
    pub fn empty(block_len: u8) -> Result<Self, GridError> {
        if block_len < 1 || block_len > MAX_BLOCK_LEN {
            return Err(GridError::InvalidBlockLength { block_len });
        }
        let side = block_len * block_len;
        let blocks = (0..side)
            .map(|block_index| Block {
                block_index,
                cells: (0..side)
                    .map(|cell_index| Cell {
                        block_index,
                        cell_index,
                        possibilities: ValueSet::full(side),
                        guess: None,
                        passes: 0,
                    })
                    .collect(),
            })
            .collect();
        Ok(Self {
            solved: false,
            block_len,
            blocks,
        })
    }

    /// Returns `true` once the grid has been marked solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns the block length `k`.
    #[must_use]
    pub const fn block_len(&self) -> u8 {
        self.block_len
    }

    /// Returns the side length `N = k²` (values range over `1..=N`).
    #[must_use]
    pub const fn side(&self) -> u8 {
        self.block_len * self.block_len
    }

    /// Returns all blocks in positional order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the cell at the given block and cell index.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for this grid.
    #[must_use]
    pub fn cell(&self, block_index: u8, cell_index: u8) -> &Cell {
        &self.blocks[usize::from(block_index)].cells[usize::from(cell_index)]
    }

    /// Returns the guess at the given block and cell index, if any.
    ///
    /// This is the read accessor a renderer uses; it never exposes the
    /// possibility bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for this grid.
    #[must_use]
    pub fn guess(&self, block_index: u8, cell_index: u8) -> Option<u8> {
        self.cell(block_index, cell_index).guess
    }

    /// Returns an iterator over every cell in block-then-cell order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.blocks.iter().flat_map(|block| block.cells.iter())
    }

    /// Builds a new grid by applying `f` to every cell.
    ///
    /// The `solved` flag and block length carry over unchanged. This is the
    /// single rebuild primitive all state transitions go through; `f` must
    /// preserve each cell's `block_index` and `cell_index`.
    #[must_use]
    pub fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Cell) -> Cell,
    {
        let blocks = self
            .blocks
            .iter()
            .map(|block| Block {
                block_index: block.block_index,
                cells: block.cells.iter().map(&mut f).collect(),
            })
            .collect();
        Self {
            solved: self.solved,
            block_len: self.block_len,
            blocks,
        }
    }

    /// Returns a copy of this grid with the `solved` flag set.
    ///
    /// Guesses and pass counts carry over unchanged.
    #[must_use]
    pub fn mark_solved(&self) -> Self {
        Self {
            solved: true,
            block_len: self.block_len,
            blocks: self.blocks.clone(),
        }
    }

    /// Returns `true` if every unit (block, row, and column) contains each
    /// value in `1..=N` exactly once.
    #[must_use]
    pub fn is_complete_solution(&self) -> bool {
        let side = self.side();
        let full = ValueSet::full(side);
        self.blocks
            .iter()
            .all(|block| unit_is_complete(full, block.cells.iter()))
            && (0..side).all(|row| unit_is_complete(full, self.row_cells(row)))
            && (0..side).all(|col| unit_is_complete(full, self.column_cells(col)))
    }
}

/// A unit is complete when all of its cells are guessed and the guesses
/// cover the full value range, which for `N` cells rules out duplicates.
fn unit_is_complete<'a>(full: ValueSet, cells: impl Iterator<Item = &'a Cell>) -> bool {
    cells
        .map(|cell| cell.guess)
        .collect::<Option<ValueSet>>()
        .is_some_and(|values| values == full)
}
