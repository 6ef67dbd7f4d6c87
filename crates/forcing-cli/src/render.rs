use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use forcing_core::{Grid, ValidationReport, SIZE};
use std::io::{self, Write};

/// Writes grids and reports, colored or plain.
pub struct Renderer {
    theme: Theme,
    color: bool,
}

impl Renderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    /// The grid in the plain text format, with edited cells highlighted when
    /// color is on. Without color the output is exactly [`Grid::to_text`].
    pub fn grid<W: Write>(&self, out: &mut W, grid: &Grid) -> io::Result<()> {
        if !self.color {
            return writeln!(out, "{}", grid.to_text());
        }

        let width = grid.cell_width();
        for row in grid.cells() {
            for (col, cell) in row.iter().enumerate() {
                let color = if cell.is_user_edited {
                    self.theme.edited
                } else if cell.is_calculated {
                    self.theme.calculated
                } else {
                    self.theme.fg
                };
                let sep = if col + 1 < SIZE { " " } else { "" };
                self.styled(out, color, &format!("{:>width$}{}", cell.value, sep, width = width))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Status line plus, when `detailed`, every failing assignment.
    pub fn report<W: Write>(
        &self,
        out: &mut W,
        report: &ValidationReport,
        detailed: bool,
    ) -> io::Result<()> {
        let color = if report.is_valid() {
            self.theme.success
        } else {
            self.theme.error
        };
        self.styled(out, color, report.message())?;
        writeln!(out)?;

        if detailed {
            for (perm, sum) in &report.failures {
                let line = format!(
                    "  rows {:?} sum to {} (off by {})\n",
                    perm,
                    sum,
                    sum - report.target
                );
                self.styled(out, self.theme.info, &line)?;
            }
        }
        Ok(())
    }

    pub fn info<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.styled(out, self.theme.info, text)?;
        writeln!(out)
    }

    fn styled<W: Write>(&self, out: &mut W, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)?;
        } else {
            write!(out, "{}", text)?;
        }
        Ok(())
    }
}
