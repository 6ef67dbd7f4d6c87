//! Forcing matrix engine.
//!
//! A forcing matrix is a 4x4 grid in which picking exactly one cell from each
//! column, with every column landing on a different row, always yields the
//! same sum. The grid is built from four row seeds and four column seeds:
//! `cell[r][c] = row[r] + col[c]`, so any such selection adds up every seed
//! exactly once and the sum equals the seed total.

mod bounds;
mod error;
mod generator;
mod grid;
pub mod permutations;
mod resolver;
mod seeds;
mod state;
mod validator;

pub use bounds::{clamp_cell_value, Target, Variance, MAX_VALUE, MIN_VALUE};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, SeedSolver, SpreadBand};
pub use grid::{share_text, Cell, Grid, Position};
pub use resolver::{resolve_edit, Edit, EditSet};
pub use seeds::Seeds;
pub use state::{MatrixSnapshot, MatrixState};
pub use validator::{permutation_sums, validate, ValidationReport, ValidationStatus};

/// Grid side length. Rows and columns are both indexed `0..SIZE`.
pub const SIZE: usize = 4;

/// Generate a fresh forcing matrix for `target`.
///
/// Uses a randomly seeded [`SeedSolver`] with the default configuration. The
/// result always satisfies the forcing invariant.
pub fn generate(target: Target, variance: Variance) -> Grid {
    SeedSolver::new().solve(target, variance).to_grid()
}

/// Regenerate from scratch. Clearing any edit set is the caller's concern.
pub fn reset(target: Target, variance: Variance) -> Grid {
    generate(target, variance)
}
