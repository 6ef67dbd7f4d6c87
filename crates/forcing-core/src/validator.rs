//! Exhaustive check of the forcing property.

use crate::permutations::{self, Permutation};
use crate::{Grid, Position, Target, SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating a grid against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Every row assignment sums to the target.
    Valid,
    /// At least one row assignment misses the target.
    Invalid,
}

impl ValidationStatus {
    pub fn is_valid(self) -> bool {
        self == ValidationStatus::Valid
    }

    pub fn message(self) -> &'static str {
        match self {
            ValidationStatus::Valid => "Valid matrix: all combinations sum to target",
            ValidationStatus::Invalid => "Invalid matrix: some combinations do not sum to target",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Full validation result, including every assignment that missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub target: i64,
    /// Row assignments whose sum differs from the target, with that sum.
    pub failures: Vec<(Permutation, i64)>,
}

impl ValidationReport {
    pub fn new(grid: &Grid, target: Target) -> Self {
        let failures: Vec<_> = permutation_sums(grid)
            .into_iter()
            .filter(|&(_, sum)| sum != target.get())
            .collect();
        let status = if failures.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        Self {
            status,
            target: target.get(),
            failures,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}

/// True iff all 24 row assignments sum exactly to `target`.
pub fn validate(grid: &Grid, target: Target) -> bool {
    permutations::all()
        .iter()
        .all(|perm| selection_sum(grid, perm) == target.get())
}

/// Sum for each of the 24 row assignments, in enumeration order.
pub fn permutation_sums(grid: &Grid) -> Vec<(Permutation, i64)> {
    permutations::all()
        .iter()
        .map(|perm| (*perm, selection_sum(grid, perm)))
        .collect()
}

fn selection_sum(grid: &Grid, perm: &Permutation) -> i64 {
    (0..SIZE)
        .map(|col| grid.value(Position::new(perm[col], col)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Seeds;

    #[test]
    fn test_seeded_grid_is_valid() {
        let grid = Seeds::new([100, -20, 37, 4], [250, 1, 90, 538]).to_grid();
        let report = ValidationReport::new(&grid, Target::new(1000).unwrap());
        assert!(report.is_valid());
        assert!(report.failures.is_empty());
        assert_eq!(report.message(), "Valid matrix: all combinations sum to target");
    }

    #[test]
    fn test_single_change_breaks_invariant() {
        let mut grid = Seeds::new([62, 62, 63, 63], [187, 187, 188, 188]).to_grid();
        let target = Target::new(1000).unwrap();
        assert!(validate(&grid, target));

        grid.cell_mut(Position::new(0, 0)).value += 1;
        let report = ValidationReport::new(&grid, target);
        assert!(!report.is_valid());
        // Six of the 24 assignments pick row 0 in column 0.
        assert_eq!(report.failures.len(), 6);
        assert!(report.failures.iter().all(|&(perm, sum)| perm[0] == 0 && sum == 1001));
        assert_eq!(
            report.status.to_string(),
            "Invalid matrix: some combinations do not sum to target"
        );
    }

    #[test]
    fn test_wrong_target() {
        let grid = Seeds::new([1, 1, 1, 1], [1, 1, 1, 1]).to_grid();
        assert!(validate(&grid, Target::new(8).unwrap()));
        assert!(!validate(&grid, Target::new(9).unwrap()));
    }

    #[test]
    fn test_permutation_sums_cover_all() {
        let grid = Seeds::new([1, 2, 3, 4], [10, 20, 30, 40]).to_grid();
        let sums = permutation_sums(&grid);
        assert_eq!(sums.len(), 24);
        assert!(sums.iter().all(|&(_, sum)| sum == 110));
    }
}
