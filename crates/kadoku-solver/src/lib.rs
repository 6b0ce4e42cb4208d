//! Incremental solving engine for Kadoku grids.
//!
//! The engine advances a [`Grid`](kadoku_core::Grid) one assignment at a
//! time through a pure constraint-propagation + heuristic-search step, and
//! can also be driven to full completion. Each transition consumes a grid
//! value and produces a brand-new one; nothing is mutated in place and no
//! state lives outside the grid, which makes a step safe to run from any
//! thread that exclusively owns its input value.
//!
//! # Pipeline
//!
//! A single [`StepSolver::step`] runs three stages:
//!
//! 1. [`update_possibilities`] recomputes every open cell's legal values
//!    from its peers' guesses.
//! 2. [`selector::find_next_cell`] picks the cell to assign: a forced cell
//!    (a unit with one open slot) if any exists, otherwise the most
//!    constrained cell with a random tie-break.
//! 3. The step engine assigns a random legal value, marks the grid solved
//!    when no cell remains, or — on a cell with no legal values — backs out
//!    of the dead end by resetting blocks probabilistically.
//!
//! Randomness is always drawn from a caller-supplied [`rand::Rng`], so a
//! seeded generator makes every outcome reproducible.
//!
//! # Examples
//!
//! ```
//! use kadoku_core::Grid;
//! use kadoku_solver::StepSolver;
//!
//! let solver = StepSolver::new();
//! let mut rng = rand::rng();
//!
//! // Step a 4×4 grid to completion, one transition at a time.
//! let mut grid = Grid::empty(2)?;
//! while !grid.is_solved() {
//!     grid = solver.step(&grid, &mut rng);
//! }
//! assert!(grid.is_complete_solution());
//! # Ok::<(), kadoku_core::GridError>(())
//! ```

pub mod possibilities;
pub mod selector;
pub mod step;

pub use self::{
    possibilities::update_possibilities,
    step::{DEFAULT_RESET_PROBABILITY, FinishStats, StepSolver},
};
