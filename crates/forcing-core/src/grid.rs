use crate::{Error, Result, Target, SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Minimum column width used when rendering grid text.
const MIN_CELL_WIDTH: usize = 4;

/// A cell position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Bounds-checked constructor for positions coming from outside the core.
    pub fn checked(row: usize, col: usize) -> Result<Self> {
        if row < SIZE && col < SIZE {
            Ok(Self { row, col })
        } else {
            Err(Error::CellOutOfBounds { row, col })
        }
    }

    /// All 16 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Position::new(row, col)))
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub value: i64,
    /// Value was supplied by the user and is a hard constraint.
    pub is_user_edited: bool,
    /// Value was derived from seeds during the last resolution pass.
    pub is_calculated: bool,
}

impl Cell {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            is_user_edited: false,
            is_calculated: false,
        }
    }

    pub fn calculated(value: i64) -> Self {
        Self {
            value,
            is_user_edited: false,
            is_calculated: true,
        }
    }

    pub fn user_edited(value: i64) -> Self {
        Self {
            value,
            is_user_edited: true,
            is_calculated: false,
        }
    }
}

/// A 4x4 grid of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    pub fn from_cells(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Build a grid of plain (neither edited nor calculated) cells.
    pub fn from_values(values: [[i64; SIZE]; SIZE]) -> Self {
        let mut grid = Self::default();
        for pos in Position::all() {
            grid.cells[pos.row][pos.col] = Cell::new(values[pos.row][pos.col]);
        }
        grid
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    pub fn value(&self, pos: Position) -> i64 {
        self.cells[pos.row][pos.col].value
    }

    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    pub fn values(&self) -> [[i64; SIZE]; SIZE] {
        let mut out = [[0; SIZE]; SIZE];
        for pos in Position::all() {
            out[pos.row][pos.col] = self.value(pos);
        }
        out
    }

    /// Positions of user-edited cells, row-major.
    pub fn edited_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.cell(pos).is_user_edited)
            .collect()
    }

    /// Smallest and largest value in the grid.
    pub fn value_range(&self) -> (i64, i64) {
        Position::all()
            .map(|pos| self.value(pos))
            .fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    /// Number of distinct values among the 16 cells.
    pub fn distinct_values(&self) -> usize {
        Position::all()
            .map(|pos| self.value(pos))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Render as 4 lines of space-separated, right-aligned integers.
    ///
    /// Every value shares one column width (at least 4), so each line has the
    /// same length and the text parses back unambiguously.
    pub fn to_text(&self) -> String {
        let width = self.cell_width();
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| format!("{:>width$}", cell.value, width = width))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Column width used by [`Grid::to_text`].
    pub fn cell_width(&self) -> usize {
        Position::all()
            .map(|pos| self.value(pos).to_string().len())
            .max()
            .unwrap_or(0)
            .max(MIN_CELL_WIDTH)
    }

    /// Parse the text produced by [`Grid::to_text`].
    ///
    /// Blank lines are skipped; any run of whitespace separates values.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut values = [[0i64; SIZE]; SIZE];
        let mut row = 0;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if row == SIZE {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("expected {} rows", SIZE),
                });
            }

            let parsed: Vec<i64> = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<i64>().map_err(|_| Error::Parse {
                        line: line_no,
                        message: format!("'{}' is not an integer", tok),
                    })
                })
                .collect::<Result<_>>()?;

            if parsed.len() != SIZE {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("expected {} values, found {}", SIZE, parsed.len()),
                });
            }
            values[row].copy_from_slice(&parsed);
            row += 1;
        }

        if row != SIZE {
            return Err(Error::Parse {
                line: text.lines().count(),
                message: format!("expected {} rows, found {}", SIZE, row),
            });
        }
        Ok(Self::from_values(values))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Text handed to a share sheet or clipboard.
pub fn share_text(grid: &Grid, target: Target) -> String {
    format!("Forcing Matrix (Target: {}):\n\n{}", target, grid.to_text())
}
