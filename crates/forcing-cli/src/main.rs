mod error;
mod render;
mod settings;
mod share;
mod theme;

use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::tty::IsTty;
use error::{CliError, Result};
use forcing_core::{
    permutation_sums, share_text, Grid, MatrixState, Position, SeedSolver, Seeds, Target,
    ValidationReport, Variance,
};
use render::Renderer;
use settings::Settings;
use share::{FileSink, ShareSink, WriterSink};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use theme::Theme;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_SUCCESS: u8 = 0;
/// The grid was read fine but fails the forcing check.
const EXIT_INVALID: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "forcing-matrix")]
#[command(about = "Generate, edit and check 4x4 forcing matrices")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new forcing matrix
    #[command(after_help = "\
Examples:
  forcing-matrix generate -t 2024
  forcing-matrix generate -t 9999999 --variance 1 --seed 7
  forcing-matrix generate -t 365 --share -o grid.txt")]
    Generate {
        #[command(flatten)]
        params: GenerateParams,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,

        /// Print share text (title line plus grid) instead of the bare grid
        #[arg(long)]
        share: bool,

        /// Write share text to this file instead of stdout
        #[arg(long, short = 'o', requires = "share")]
        output: Option<PathBuf>,
    },

    /// Generate, then apply cell edits in order
    #[command(after_help = "\
Edits are ROW,COL=VALUE with 0-based indices. At most one row per column;
a second edit in the same column must target the same row.

Examples:
  forcing-matrix edit -t 1000 --set 0,0=240 --set 0,1=260 --set 2,2=230 --set 2,3=270")]
    Edit {
        #[command(flatten)]
        params: GenerateParams,

        /// Cell edit, ROW,COL=VALUE. Repeatable.
        #[arg(long = "set", value_name = "ROW,COL=VALUE", value_parser = parse_edit, required = true)]
        edits: Vec<CellEdit>,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,

        /// List failing row assignments
        #[arg(long)]
        details: bool,
    },

    /// Check a grid read from a file or stdin
    Validate {
        /// Grid text file (omit to read from stdin)
        input: Option<PathBuf>,

        /// Expected sum
        #[arg(long, short)]
        target: i64,

        /// List failing row assignments
        #[arg(long)]
        details: bool,
    },

    /// Describe a grid: value range, seeds, assignment sums
    Analyze {
        /// Grid text file (omit to read from stdin)
        input: Option<PathBuf>,

        /// Expected sum, if known
        #[arg(long, short)]
        target: Option<i64>,
    },

    /// Show or change stored defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct GenerateParams {
    /// Target sum (1..=9999999); defaults to the stored setting
    #[arg(long, short)]
    target: Option<i64>,

    /// Dispersion in [0, 1]; defaults to the stored setting
    #[arg(long)]
    variance: Option<f64>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings as JSON
    Show,
    /// Print the settings file path
    Path,
    /// Update one or more settings
    Set {
        #[arg(long)]
        target: Option<i64>,
        #[arg(long)]
        variance: Option<f64>,
        #[arg(long)]
        color: Option<bool>,
        #[arg(long)]
        theme: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellEdit {
    pos: Position,
    value: i64,
}

fn parse_edit(s: &str) -> std::result::Result<CellEdit, String> {
    let (cell, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROW,COL=VALUE, got '{}'", s))?;
    let (row, col) = cell
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL before '=', got '{}'", cell))?;
    let row: usize = row.trim().parse().map_err(|_| format!("bad row '{}'", row))?;
    let col: usize = col.trim().parse().map_err(|_| format!("bad column '{}'", col))?;
    let value: i64 = value.trim().parse().map_err(|_| format!("bad value '{}'", value))?;
    let pos = Position::checked(row, col).map_err(|e| e.to_string())?;
    Ok(CellEdit { pos, value })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load();
    let color = color_enabled(&settings, cli.no_color, io::stdout().is_tty());
    let renderer = Renderer::new(Theme::by_name(&settings.theme), color);

    match run(cli.command, &settings, &renderer, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Escapes only go to a terminal, so redirected output stays parseable.
fn color_enabled(settings: &Settings, no_color: bool, is_tty: bool) -> bool {
    settings.color && !no_color && is_tty
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "forcing_core=debug,forcing_matrix=debug",
        _ => "forcing_core=trace,forcing_matrix=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run<W: Write>(
    command: Commands,
    settings: &Settings,
    renderer: &Renderer,
    mut stdout: W,
) -> Result<u8> {
    match command {
        Commands::Generate {
            params,
            json,
            share,
            output,
        } => {
            let state = new_state(&params, settings)?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&state.snapshot())?)?;
            } else if share {
                let text = share_text(state.grid(), state.target());
                match output {
                    Some(path) => FileSink::new(path).share(&text)?,
                    None => WriterSink::new(&mut stdout).share(&text)?,
                }
            } else {
                renderer.grid(&mut stdout, state.grid())?;
            }
            Ok(EXIT_SUCCESS)
        }

        Commands::Edit {
            params,
            edits,
            json,
            details,
        } => {
            let mut state = new_state(&params, settings)?;
            for edit in edits {
                if let Err(e) = state.edit_cell(edit.pos, edit.value) {
                    warn!(row = edit.pos.row, col = edit.pos.col, "edit rejected");
                    eprintln!("skipped: {}", e);
                }
            }
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&state.snapshot())?)?;
            } else {
                renderer.grid(&mut stdout, state.grid())?;
                renderer.report(&mut stdout, &state.report(), details)?;
                let missing = state.edits().missing_columns();
                if !missing.is_empty() {
                    renderer.info(
                        &mut stdout,
                        &format!("columns without an edit: {:?}", missing),
                    )?;
                }
            }
            Ok(if state.is_valid() { EXIT_SUCCESS } else { EXIT_INVALID })
        }

        Commands::Validate {
            input,
            target,
            details,
        } => {
            let grid = read_grid(input)?;
            let report = ValidationReport::new(&grid, Target::new(target)?);
            renderer.report(&mut stdout, &report, details)?;
            Ok(if report.is_valid() { EXIT_SUCCESS } else { EXIT_INVALID })
        }

        Commands::Analyze { input, target } => {
            let grid = read_grid(input)?;
            analyze(&mut stdout, renderer, &grid, target.map(Target::new).transpose()?)?;
            Ok(EXIT_SUCCESS)
        }

        Commands::Config { action } => {
            config(&mut stdout, settings, action)?;
            Ok(EXIT_SUCCESS)
        }
    }
}

fn new_state(params: &GenerateParams, settings: &Settings) -> Result<MatrixState> {
    let target = Target::new(params.target.unwrap_or(settings.target))?;
    let variance = Variance::new(params.variance.unwrap_or(settings.variance));
    let solver = match params.seed {
        Some(seed) => SeedSolver::with_seed(seed),
        None => SeedSolver::new(),
    };
    Ok(MatrixState::with_solver(target, variance, solver))
}

fn read_grid(input: Option<PathBuf>) -> Result<Grid> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(Grid::from_text(&text)?)
}

fn analyze<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    grid: &Grid,
    target: Option<Target>,
) -> Result<()> {
    renderer.grid(out, grid)?;

    let (lo, hi) = grid.value_range();
    writeln!(out, "range: {}..={} (spread {})", lo, hi, hi - lo)?;
    writeln!(out, "distinct values: {} of 16", grid.distinct_values())?;

    match Seeds::decompose(grid) {
        Some(seeds) => {
            writeln!(out, "row seeds: {:?}", seeds.rows)?;
            writeln!(out, "col seeds: {:?}", seeds.cols)?;
            writeln!(out, "seed total: {}", seeds.total())?;
        }
        None => writeln!(out, "not of the form row + column")?,
    }

    let sums = permutation_sums(grid);
    let first = sums[0].1;
    if sums.iter().all(|&(_, sum)| sum == first) {
        writeln!(out, "all 24 assignments sum to {}", first)?;
    } else {
        let (min, max) = sums
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), &(_, s)| (lo.min(s), hi.max(s)));
        writeln!(out, "assignment sums range over {}..={}", min, max)?;
    }

    if let Some(target) = target {
        renderer.report(out, &ValidationReport::new(grid, target), true)?;
    }
    Ok(())
}

fn config<W: Write>(out: &mut W, settings: &Settings, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "{}", serde_json::to_string_pretty(settings)?)?;
        }
        ConfigAction::Path => match Settings::default_path() {
            Some(path) => writeln!(out, "{}", path.display())?,
            None => return Err(CliError::NoConfigDir),
        },
        ConfigAction::Set {
            target,
            variance,
            color,
            theme,
        } => {
            let mut updated = settings.clone();
            if let Some(target) = target {
                updated.target = Target::new(target)?.get();
            }
            if let Some(variance) = variance {
                updated.variance = Variance::new(variance).get();
            }
            if let Some(color) = color {
                updated.color = color;
            }
            if let Some(theme) = theme {
                updated.theme = theme;
            }
            let path = updated.save()?;
            writeln!(out, "saved {}", path.display())?;
        }
    }
    Ok(())
}
