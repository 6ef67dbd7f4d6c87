use crate::{Cell, Grid, Position, SIZE};
use serde::{Deserialize, Serialize};

/// Row and column seeds. Cell `(r, c)` of the grid is `rows[r] + cols[c]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Seeds {
    pub rows: [i64; SIZE],
    pub cols: [i64; SIZE],
}

impl Seeds {
    pub fn new(rows: [i64; SIZE], cols: [i64; SIZE]) -> Self {
        Self { rows, cols }
    }

    /// Build from a flat array: the first four entries are row seeds.
    pub fn from_flat(flat: [i64; 2 * SIZE]) -> Self {
        let mut seeds = Self::default();
        seeds.rows.copy_from_slice(&flat[..SIZE]);
        seeds.cols.copy_from_slice(&flat[SIZE..]);
        seeds
    }

    pub fn to_flat(&self) -> [i64; 2 * SIZE] {
        let mut flat = [0; 2 * SIZE];
        flat[..SIZE].copy_from_slice(&self.rows);
        flat[SIZE..].copy_from_slice(&self.cols);
        flat
    }

    /// Sum of all eight seeds. Every row assignment of the derived grid sums
    /// to this value.
    pub fn total(&self) -> i64 {
        self.rows.iter().sum::<i64>() + self.cols.iter().sum::<i64>()
    }

    pub fn value_at(&self, pos: Position) -> i64 {
        self.rows[pos.row] + self.cols[pos.col]
    }

    /// Smallest cell value the seeds would produce.
    pub fn min_cell(&self) -> i64 {
        min(&self.rows) + min(&self.cols)
    }

    /// Largest cell value the seeds would produce.
    pub fn max_cell(&self) -> i64 {
        max(&self.rows) + max(&self.cols)
    }

    /// Difference between the largest and smallest cell.
    pub fn cell_spread(&self) -> i64 {
        self.max_cell() - self.min_cell()
    }

    /// Expand into a grid. Every cell is marked calculated.
    pub fn to_grid(&self) -> Grid {
        let mut cells = [[Cell::default(); SIZE]; SIZE];
        for pos in Position::all() {
            cells[pos.row][pos.col] = Cell::calculated(self.value_at(pos));
        }
        Grid::from_cells(cells)
    }

    /// Add `amount` to all eight seeds as evenly as integers allow.
    ///
    /// Each seed gets `amount.div_euclid(8)`; the first `amount.rem_euclid(8)`
    /// seeds (rows before columns) get one more.
    pub fn spread_evenly(&mut self, amount: i64) {
        let mut flat = self.to_flat();
        distribute(&mut flat, amount);
        *self = Self::from_flat(flat);
    }

    /// Recover seeds from a grid of the form `row[r] + col[c]`.
    ///
    /// Uses the gauge `rows[0] = 0`, so `cols` is the first grid row. Returns
    /// `None` if any cell breaks the pattern.
    pub fn decompose(grid: &Grid) -> Option<Self> {
        let mut seeds = Self::default();
        for col in 0..SIZE {
            seeds.cols[col] = grid.value(Position::new(0, col));
        }
        for row in 0..SIZE {
            seeds.rows[row] = grid.value(Position::new(row, 0)) - seeds.cols[0];
        }
        Position::all()
            .all(|pos| seeds.value_at(pos) == grid.value(pos))
            .then_some(seeds)
    }
}

/// Add `amount` across `slots` as evenly as integers allow, extra units going
/// to the lowest indices.
pub(crate) fn distribute(slots: &mut [i64], amount: i64) {
    if slots.is_empty() {
        return;
    }
    let n = slots.len() as i64;
    let share = amount.div_euclid(n);
    let extra = amount.rem_euclid(n) as usize;
    for (i, slot) in slots.iter_mut().enumerate() {
        *slot += share + i64::from(i < extra);
    }
}

fn min(values: &[i64; SIZE]) -> i64 {
    values.iter().copied().min().unwrap_or(0)
}

fn max(values: &[i64; SIZE]) -> i64 {
    values.iter().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_grid_adds_seeds() {
        let seeds = Seeds::new([10, 20, 30, 40], [1, 2, 3, 4]);
        let grid = seeds.to_grid();
        assert_eq!(grid.value(Position::new(0, 0)), 11);
        assert_eq!(grid.value(Position::new(3, 2)), 43);
        assert!(grid.cell(Position::new(1, 1)).is_calculated);
        assert!(!grid.cell(Position::new(1, 1)).is_user_edited);
        assert_eq!(seeds.total(), 110);
        assert_eq!(seeds.cell_spread(), 33);
    }

    #[test]
    fn test_distribute_keeps_sum() {
        let mut slots = [0i64; 8];
        distribute(&mut slots, 13);
        assert_eq!(slots, [2, 2, 2, 2, 2, 1, 1, 1]);

        let mut slots = [0i64; 8];
        distribute(&mut slots, -3);
        assert_eq!(slots.iter().sum::<i64>(), -3);
        assert_eq!(slots, [0, 0, 0, 0, 0, -1, -1, -1]);
    }

    #[test]
    fn test_spread_evenly() {
        let mut seeds = Seeds::default();
        seeds.spread_evenly(100);
        assert_eq!(seeds.rows, [13, 13, 13, 13]);
        assert_eq!(seeds.cols, [12, 12, 12, 12]);
    }

    #[test]
    fn test_decompose_recovers_pattern() {
        let grid = Grid::from_values([
            [5110809, 2090403, 1554850, 1861293],
            [4124495, 1104089, 568536, 874979],
            [4820953, 1800547, 1264994, 1571437],
            [5769623, 2749217, 2213664, 2520107],
        ]);
        let seeds = Seeds::decompose(&grid).unwrap();
        assert_eq!(seeds.rows[0], 0);
        assert_eq!(seeds.to_grid().values(), grid.values());
        assert_eq!(seeds.total(), 9_999_999);
    }

    #[test]
    fn test_decompose_rejects_non_additive() {
        let mut values = [[25; SIZE]; SIZE];
        values[2][1] = 26;
        assert!(Seeds::decompose(&Grid::from_values(values)).is_none());
    }
}
