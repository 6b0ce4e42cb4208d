//! Example demonstrating grid generation and solving.
//!
//! This example shows how to:
//! - Generate an empty grid of a chosen block length
//! - Drive the step engine to completion, optionally under an iteration
//!   budget
//! - Render the solved grid (rendering belongs to the driver, not the
//!   engine)
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_grid
//! ```
//!
//! Solve a 16×16 grid (block length 4) with a fixed seed:
//!
//! ```sh
//! cargo run --example solve_grid -- --block-len 4 --seed 42
//! ```
//!
//! Cap the iteration count and report whether the budget sufficed:
//!
//! ```sh
//! cargo run --example solve_grid -- --block-len 3 --max-iterations 5000
//! ```

use std::process;

use clap::Parser;
use kadoku_core::Grid;
use kadoku_solver::StepSolver;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Block length k; the board side is k².
    #[arg(long, value_name = "K", default_value_t = 3)]
    block_len: u8,

    /// Seed for the random source; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Iteration budget; unbounded when omitted.
    #[arg(long, value_name = "COUNT")]
    max_iterations: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let grid = match Grid::empty(args.block_len) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let mut rng = match args.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };

    let solver = StepSolver::new();
    let (grid, stats) = match args.max_iterations {
        Some(budget) => solver.finish_within(grid, budget, &mut rng),
        None => solver.finish(grid, &mut rng),
    };

    if !stats.solved() {
        eprintln!(
            "budget of {} iterations exhausted before a solution was found",
            stats.iterations()
        );
        process::exit(1);
    }

    print_grid(&grid);
    println!();
    println!("iterations: {}", stats.iterations());
}

/// Renders the grid row by row with block separators.
fn print_grid(grid: &Grid) {
    let k = grid.block_len();
    let side = grid.side();
    let width = if side >= 10 { 3 } else { 2 };
    for row in 0..side {
        if row > 0 && row % k == 0 {
            let segment = "-".repeat(usize::from(k) * width);
            let mut line = String::new();
            for band in 0..k {
                if band > 0 {
                    line.push('+');
                }
                line.push_str(&segment);
            }
            println!("{line}");
        }
        let mut line = String::new();
        for (i, cell) in grid.row_cells(row).enumerate() {
            if i > 0 && i % usize::from(k) == 0 {
                line.push('|');
            }
            match cell.guess {
                Some(value) => line.push_str(&format!("{value:>width$}")),
                None => line.push_str(&format!("{:>width$}", ".")),
            }
        }
        println!("{line}");
    }
}
