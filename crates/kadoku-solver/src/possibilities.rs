//! Possibility recomputation over a whole grid.

use kadoku_core::{Cell, Grid, ValueSet};

/// Recomputes the possibility set of every unguessed cell.
///
/// Each open cell's possibilities become `{1..=N}` minus the union of
/// guesses over its block, row, and column peers. Cells that already carry a
/// guess pass through unchanged. The whole grid is recomputed on every call;
/// with `N` at most 16 in practice there is nothing worth diffing
/// incrementally.
///
/// # Examples
///
/// ```
/// use kadoku_core::Grid;
/// use kadoku_solver::update_possibilities;
///
/// let grid = Grid::empty(2)?;
/// let next = update_possibilities(&grid);
/// assert_eq!(next.cell(0, 0).possibilities.len(), 4);
/// # Ok::<(), kadoku_core::GridError>(())
/// ```
#[must_use]
pub fn update_possibilities(grid: &Grid) -> Grid {
    let full = ValueSet::full(grid.side());
    grid.map_cells(|cell| {
        if cell.has_guess() {
            return cell.clone();
        }
        Cell {
            possibilities: full.difference(grid.peer_guesses(cell)),
            ..cell.clone()
        }
    })
}
