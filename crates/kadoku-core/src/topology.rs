//! Coordinate mapping between block/cell addresses and row/column units.
//!
//! Every cell belongs to exactly three units: its block, its row, and its
//! column. Blocks are stored; rows and columns are derived from band
//! arithmetic. For a cell at `(block_index, cell_index)` in a grid with
//! block length `k`:
//!
//! - `row_band = block_index / k`, `row_in_block = cell_index / k`,
//!   `global_row = row_band·k + row_in_block`
//! - `col_band = block_index % k`, `col_in_block = cell_index % k`,
//!   `global_column = col_band·k + col_in_block`
//!
//! The peer queries here are the only geometry primitives in the workspace;
//! everything above them (possibility recomputation, forced-cell detection)
//! is expressed through these rather than ad hoc index arithmetic.

use crate::{Cell, Grid, ValueSet};

impl Cell {
    /// Returns the band of blocks this cell's row runs through.
    #[must_use]
    pub const fn row_band(&self, block_len: u8) -> u8 {
        self.block_index / block_len
    }

    /// Returns which row of its block this cell lies in.
    #[must_use]
    pub const fn row_in_block(&self, block_len: u8) -> u8 {
        self.cell_index / block_len
    }

    /// Returns this cell's row on the full board (`0..N`).
    #[must_use]
    pub const fn global_row(&self, block_len: u8) -> u8 {
        self.row_band(block_len) * block_len + self.row_in_block(block_len)
    }

    /// Returns the band of blocks this cell's column runs through.
    #[must_use]
    pub const fn col_band(&self, block_len: u8) -> u8 {
        self.block_index % block_len
    }

    /// Returns which column of its block this cell lies in.
    #[must_use]
    pub const fn col_in_block(&self, block_len: u8) -> u8 {
        self.cell_index % block_len
    }

    /// Returns this cell's column on the full board (`0..N`).
    #[must_use]
    pub const fn global_column(&self, block_len: u8) -> u8 {
        self.col_band(block_len) * block_len + self.col_in_block(block_len)
    }
}

impl Grid {
    /// Returns the cells of a row, selected band-wise: the blocks sharing
    /// the row's band, and within each the matching row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `global_row` is not in `0..N`.
    pub fn row_cells(&self, global_row: u8) -> impl Iterator<Item = &Cell> {
        assert!(global_row < self.side());
        let k = self.block_len();
        let row_band = global_row / k;
        let row_in_block = global_row % k;
        self.blocks()[usize::from(row_band * k)..usize::from(row_band * k + k)]
            .iter()
            .flat_map(move |block| {
                block.cells[usize::from(row_in_block * k)..usize::from(row_in_block * k + k)]
                    .iter()
            })
    }

    /// Returns the cells of a column, selected band-wise: in every band the
    /// block at the column's band position, and within each the matching
    /// column of cells.
    ///
    /// # Panics
    ///
    /// Panics if `global_column` is not in `0..N`.
    pub fn column_cells(&self, global_column: u8) -> impl Iterator<Item = &Cell> {
        assert!(global_column < self.side());
        let k = self.block_len();
        let col_band = global_column / k;
        let col_in_block = global_column % k;
        (0..k).flat_map(move |band| {
            let block = &self.blocks()[usize::from(band * k + col_band)];
            (0..k).map(move |row| &block.cells[usize::from(row * k + col_in_block)])
        })
    }

    /// Returns all other cells sharing `cell`'s block (`N−1` cells).
    #[must_use]
    pub fn peers_in_block(&self, cell: &Cell) -> Vec<&Cell> {
        self.blocks()[usize::from(cell.block_index)]
            .cells
            .iter()
            .filter(|peer| peer.cell_index != cell.cell_index)
            .collect()
    }

    /// Returns all other cells sharing `cell`'s row (`N−1` cells).
    #[must_use]
    pub fn peers_in_row(&self, cell: &Cell) -> Vec<&Cell> {
        self.row_cells(cell.global_row(self.block_len()))
            .filter(|peer| {
                peer.block_index != cell.block_index || peer.cell_index != cell.cell_index
            })
            .collect()
    }

    /// Returns all other cells sharing `cell`'s column (`N−1` cells).
    #[must_use]
    pub fn peers_in_column(&self, cell: &Cell) -> Vec<&Cell> {
        self.column_cells(cell.global_column(self.block_len()))
            .filter(|peer| {
                peer.block_index != cell.block_index || peer.cell_index != cell.cell_index
            })
            .collect()
    }

    /// Returns the union of guesses over all of `cell`'s peers, across its
    /// block, row, and column.
    #[must_use]
    pub fn peer_guesses(&self, cell: &Cell) -> ValueSet {
        self.peers_in_block(cell)
            .into_iter()
            .chain(self.peers_in_row(cell))
            .chain(self.peers_in_column(cell))
            .filter_map(|peer| peer.guess)
            .collect()
    }
}
