//! Folding user edits back into a forcing grid.
//!
//! Each column may carry at most one user edit. With fewer than four edited
//! columns the seed system is underdetermined and the edit is written straight
//! into the grid, which will usually fail validation. Once every column has an
//! edit the seeds are re-solved so that each edited cell keeps its value and
//! the seed total matches the target whenever some row is left unpinned.

use crate::seeds::{distribute, Seeds};
use crate::{clamp_cell_value, Cell, Error, Grid, Position, Result, Target, SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user-fixed cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    pub row: usize,
    pub value: i64,
}

/// At most one edit per column, indexed by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawEditSet")]
pub struct EditSet {
    columns: [Option<Edit>; SIZE],
}

/// Wire form of [`EditSet`], checked before use.
#[derive(Deserialize)]
struct RawEditSet {
    columns: [Option<Edit>; SIZE],
}

impl TryFrom<RawEditSet> for EditSet {
    type Error = Error;

    fn try_from(raw: RawEditSet) -> Result<Self> {
        for (col, edit) in raw.columns.iter().enumerate() {
            if let Some(edit) = edit {
                Position::checked(edit.row, col)?;
            }
        }
        Ok(Self {
            columns: raw.columns,
        })
    }
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, col: usize) -> Option<Edit> {
        self.columns.get(col).copied().flatten()
    }

    /// Number of edited columns.
    pub fn len(&self) -> usize {
        self.columns.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every column carries an edit.
    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(Option::is_some)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos.col).is_some_and(|edit| edit.row == pos.row)
    }

    /// Columns still without an edit.
    pub fn missing_columns(&self) -> Vec<usize> {
        (0..SIZE).filter(|&col| self.columns[col].is_none()).collect()
    }

    /// `(position, value)` for each edit, by column.
    pub fn iter(&self) -> impl Iterator<Item = (Position, i64)> + '_ {
        self.columns.iter().enumerate().filter_map(|(col, edit)| {
            edit.map(|edit| (Position::new(edit.row, col), edit.value))
        })
    }

    /// Record an edit under the one-edit-per-column policy.
    ///
    /// A repeat edit on the same row replaces the old value. An edit on a
    /// different row of an already edited column is rejected and the set is
    /// left untouched.
    pub fn record(&mut self, pos: Position, value: i64) -> Result<()> {
        let pos = Position::checked(pos.row, pos.col)?;
        if let Some(existing) = self.columns[pos.col] {
            if existing.row != pos.row {
                return Err(Error::ColumnAlreadyEdited {
                    col: pos.col,
                    row: pos.row,
                    existing_row: existing.row,
                });
            }
        }
        self.columns[pos.col] = Some(Edit {
            row: pos.row,
            value,
        });
        Ok(())
    }

    /// Copy of this set with `pos` written in, replacing whatever edit its
    /// column held.
    pub fn with(&self, pos: Position, value: i64) -> Self {
        let mut out = *self;
        out.columns[pos.col] = Some(Edit {
            row: pos.row,
            value,
        });
        out
    }

    pub fn clear(&mut self) {
        self.columns = [None; SIZE];
    }
}

/// Apply the edit at `pos` on top of `edits` and return the resulting grid.
///
/// `value` is clamped into the accepted cell range. The new edit replaces any
/// edit already held for its column; enforcing the one-row-per-column policy
/// is up to the caller (see [`EditSet::record`]).
pub fn resolve_edit(
    grid: &Grid,
    target: Target,
    pos: Position,
    value: i64,
    edits: &EditSet,
) -> Grid {
    let value = clamp_cell_value(value);
    let edits = edits.with(pos, value);

    if !edits.is_complete() {
        debug!(row = pos.row, col = pos.col, value, edited = edits.len(), "partial edit applied in place");
        let mut out = *grid;
        *out.cell_mut(pos) = Cell::user_edited(value);
        return out;
    }

    let seeds = pinned_seeds(&edits, target.get());
    let mut out = seeds.to_grid();
    for (edited, value) in edits.iter() {
        *out.cell_mut(edited) = Cell::user_edited(value);
    }
    out
}

/// Solve seeds for a complete edit set.
///
/// Each edited row gets a seed of half the mean of its edited values; the
/// columns it pins take the remainder, so those cells are exact. Rows no edit
/// touches absorb the gap to the target, spread evenly in index order. If
/// every row is pinned there is nothing left to absorb the gap and the grid
/// sums to the edited values instead.
fn pinned_seeds(edits: &EditSet, target: i64) -> Seeds {
    let mut seeds = Seeds::default();
    let mut pinned = [false; SIZE];

    for row in 0..SIZE {
        let in_row: Vec<(usize, i64)> = edits
            .iter()
            .filter(|(pos, _)| pos.row == row)
            .map(|(pos, value)| (pos.col, value))
            .collect();
        if in_row.is_empty() {
            continue;
        }
        let mean = in_row.iter().map(|&(_, v)| v).sum::<i64>().div_euclid(in_row.len() as i64);
        let row_seed = mean.div_euclid(2);
        seeds.rows[row] = row_seed;
        pinned[row] = true;
        for (col, value) in in_row {
            seeds.cols[col] = value - row_seed;
        }
    }

    let deficit = target - seeds.total();
    let free: Vec<usize> = (0..SIZE).filter(|&row| !pinned[row]).collect();
    if free.is_empty() {
        if deficit != 0 {
            debug!(deficit, "every row pinned by an edit; total left off target");
        }
        return seeds;
    }

    let mut shares = vec![0i64; free.len()];
    distribute(&mut shares, deficit);
    for (row, share) in free.into_iter().zip(shares) {
        seeds.rows[row] += share;
    }
    seeds
}
