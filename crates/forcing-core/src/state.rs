use crate::{
    resolve_edit, EditSet, Grid, GeneratorConfig, Position, Result, SeedSolver, Target,
    ValidationReport, ValidationStatus, Variance,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Serializable snapshot of a [`MatrixState`] for front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSnapshot {
    pub target: Target,
    pub variance: Variance,
    pub matrix: Grid,
    pub edits: EditSet,
    pub is_valid: bool,
    pub validation_message: String,
}

/// One logical grid and the parameters and edits that produced it.
///
/// Changing the target or variance throws the grid away and generates a new
/// one with no edits. Edits are resolved incrementally.
pub struct MatrixState {
    target: Target,
    variance: Variance,
    grid: Grid,
    edits: EditSet,
    status: ValidationStatus,
    solver: SeedSolver,
}

impl MatrixState {
    pub fn new(target: Target, variance: Variance) -> Self {
        Self::with_solver(target, variance, SeedSolver::new())
    }

    pub fn with_config(target: Target, variance: Variance, config: GeneratorConfig) -> Self {
        Self::with_solver(target, variance, SeedSolver::with_config(config))
    }

    /// Use a caller-supplied solver, e.g. one built with
    /// [`SeedSolver::with_seed`].
    pub fn with_solver(target: Target, variance: Variance, solver: SeedSolver) -> Self {
        let mut state = Self {
            target,
            variance,
            grid: Grid::default(),
            edits: EditSet::new(),
            status: ValidationStatus::Invalid,
            solver,
        };
        state.regenerate();
        state
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn variance(&self) -> Variance {
        self.variance
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn edits(&self) -> &EditSet {
        &self.edits
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn validation_message(&self) -> &'static str {
        self.status.message()
    }

    /// Detailed validation of the current grid.
    pub fn report(&self) -> ValidationReport {
        ValidationReport::new(&self.grid, self.target)
    }

    pub fn set_target(&mut self, target: Target) {
        if target != self.target {
            self.target = target;
            self.regenerate();
        }
    }

    pub fn set_variance(&mut self, variance: Variance) {
        if variance != self.variance {
            self.variance = variance;
            self.regenerate();
        }
    }

    /// Regenerate with the current parameters and drop all edits.
    pub fn reset(&mut self) {
        self.regenerate();
    }

    /// Apply a user edit.
    ///
    /// Rejects an edit to a different row of an already edited column; the
    /// state is unchanged in that case.
    pub fn edit_cell(&mut self, pos: Position, value: i64) -> Result<()> {
        let pos = Position::checked(pos.row, pos.col)?;
        let value = crate::clamp_cell_value(value);

        let mut edits = self.edits;
        edits.record(pos, value)?;
        self.grid = resolve_edit(&self.grid, self.target, pos, value, &self.edits);
        self.edits = edits;
        self.revalidate();
        debug!(
            row = pos.row,
            col = pos.col,
            value,
            edited = self.edits.len(),
            valid = self.is_valid(),
            "cell edited"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot {
            target: self.target,
            variance: self.variance,
            matrix: self.grid,
            edits: self.edits,
            is_valid: self.is_valid(),
            validation_message: self.validation_message().to_string(),
        }
    }

    /// Rebuild from a snapshot. Validity is recomputed, not trusted; edit rows
    /// were range-checked when the snapshot was deserialized.
    pub fn restore(snapshot: MatrixSnapshot) -> Self {
        let mut state = Self {
            target: snapshot.target,
            variance: snapshot.variance,
            grid: snapshot.matrix,
            edits: snapshot.edits,
            status: ValidationStatus::Invalid,
            solver: SeedSolver::new(),
        };
        state.revalidate();
        state
    }

    fn regenerate(&mut self) {
        self.grid = self.solver.solve(self.target, self.variance).to_grid();
        self.edits.clear();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.status = ValidationReport::new(&self.grid, self.target).status;
    }
}
