//! Selection of the next cell to assign.

use kadoku_core::{Cell, Grid};
use rand::Rng;
use rand::seq::IndexedRandom as _;

fn guessed_count(peers: &[&Cell]) -> usize {
    peers.iter().filter(|peer| peer.has_guess()).count()
}

/// Finds the first forced cell, scanning in block-then-cell order.
///
/// A cell is forced when one of its units (block, row, or column) has
/// exactly one open slot left, i.e. all `N−1` of the cell's peers in that
/// unit carry a guess. This is the naked-single shortcut; it is fully
/// deterministic and the first match wins.
#[must_use]
pub fn find_forced_cell(grid: &Grid) -> Option<(u8, u8)> {
    let unit_full = usize::from(grid.side()) - 1;
    grid.cells()
        .find(|cell| {
            !cell.has_guess()
                && (guessed_count(&grid.peers_in_block(cell)) == unit_full
                    || guessed_count(&grid.peers_in_row(cell)) == unit_full
                    || guessed_count(&grid.peers_in_column(cell)) == unit_full)
        })
        .map(|cell| (cell.block_index, cell.cell_index))
}

/// Chooses the next cell to assign, as a `(block_index, cell_index)` pair.
///
/// A forced cell wins outright. Otherwise the most-constrained-cell
/// heuristic applies: among the unguessed cells with the fewest remaining
/// possibilities, one is picked uniformly at random. Assigning the most
/// constrained cell first keeps the branching factor down and surfaces dead
/// ends early; the random tie-break is what varies the solution between
/// runs.
///
/// Returns `None` only when every cell already carries a guess. The
/// returned cell may have an empty possibility set; that is the dead-end
/// signal the step engine reacts to.
#[must_use]
pub fn find_next_cell<R>(grid: &Grid, rng: &mut R) -> Option<(u8, u8)>
where
    R: Rng + ?Sized,
{
    if let Some(addr) = find_forced_cell(grid) {
        return Some(addr);
    }

    let mut min_len = u8::MAX;
    let mut candidates = Vec::new();
    for cell in grid.cells() {
        if cell.has_guess() {
            continue;
        }
        let len = cell.possibilities.len();
        if len < min_len {
            min_len = len;
            candidates.clear();
        }
        if len == min_len {
            candidates.push((cell.block_index, cell.cell_index));
        }
    }
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use kadoku_core::{Cell, ValueSet};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn grid_with_guesses(block_len: u8, guesses: &[(u8, u8, u8)]) -> Grid {
        Grid::empty(block_len).unwrap().map_cells(|cell| {
            let guess = guesses
                .iter()
                .find(|(block, idx, _)| (*block, *idx) == (cell.block_index, cell.cell_index))
                .map(|(_, _, value)| *value);
            Cell {
                guess,
                ..cell.clone()
            }
        })
    }

    #[test]
    fn test_forced_cell_in_block() {
        // Block 0 of a 4x4 grid has one open slot left.
        let grid = grid_with_guesses(2, &[(0, 0, 1), (0, 1, 2), (0, 2, 3)]);
        assert_eq!(find_forced_cell(&grid), Some((0, 3)));
    }

    #[test]
    fn test_forced_cell_in_row() {
        // Top row of a 4x4 grid: blocks 0 and 1, cells 0 and 1 each.
        // Three of the four are guessed; (1, 1) is forced.
        let grid = grid_with_guesses(2, &[(0, 0, 1), (0, 1, 2), (1, 0, 3)]);
        assert_eq!(find_forced_cell(&grid), Some((1, 1)));
    }

    #[test]
    fn test_forced_cell_in_column() {
        // Left column of a 4x4 grid: blocks 0 and 2, cells 0 and 2 each.
        let grid = grid_with_guesses(2, &[(0, 0, 1), (0, 2, 2), (2, 0, 3)]);
        assert_eq!(find_forced_cell(&grid), Some((2, 2)));
    }

    #[test]
    fn test_no_forced_cell_on_empty_grid() {
        assert_eq!(find_forced_cell(&Grid::empty(2).unwrap()), None);
    }

    #[test]
    fn test_forced_cell_wins_over_heuristic() {
        let grid = grid_with_guesses(2, &[(0, 0, 1), (0, 1, 2), (0, 2, 3)]);
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        assert_eq!(find_next_cell(&grid, &mut rng), Some((0, 3)));
    }

    #[test]
    fn test_picks_most_constrained_cell() {
        // Narrow (3, 3) to a single possibility; every other open cell
        // keeps more, so the heuristic must land on it regardless of seed.
        let grid = Grid::empty(2).unwrap().map_cells(|cell| {
            if (cell.block_index, cell.cell_index) == (3, 3) {
                Cell {
                    possibilities: ValueSet::from_iter([4]),
                    ..cell.clone()
                }
            } else {
                cell.clone()
            }
        });
        for seed in 0..8 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            assert_eq!(find_next_cell(&grid, &mut rng), Some((3, 3)));
        }
    }

    #[test]
    fn test_tie_break_stays_within_minimal_set() {
        // Two cells tied at one possibility each; nothing else comes close.
        let grid = Grid::empty(2).unwrap().map_cells(|cell| {
            match (cell.block_index, cell.cell_index) {
                (0, 0) | (3, 3) => Cell {
                    possibilities: ValueSet::from_iter([1]),
                    ..cell.clone()
                },
                _ => cell.clone(),
            }
        });
        for seed in 0..16 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let picked = find_next_cell(&grid, &mut rng);
            assert!(matches!(picked, Some((0, 0) | (3, 3))), "picked {picked:?}");
        }
    }

    #[test]
    fn test_returns_none_when_all_guessed() {
        let grid = Grid::empty(1).unwrap().map_cells(|cell| Cell {
            guess: Some(1),
            ..cell.clone()
        });
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        assert_eq!(find_next_cell(&grid, &mut rng), None);
    }
}
