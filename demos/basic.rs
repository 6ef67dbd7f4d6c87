//! Basic example of using the forcing matrix engine

use forcing_core::{
    generate, permutation_sums, resolve_edit, share_text, EditSet, Grid, Position, Seeds, Target,
    ValidationReport, Variance,
};

fn main() -> Result<(), forcing_core::Error> {
    // Generate a grid
    let target = Target::new(2024)?;
    println!("Generating a forcing matrix for {}...\n", target);
    let grid = generate(target, Variance::new(0.6));
    println!("{}\n", grid);

    // Check it
    let report = ValidationReport::new(&grid, target);
    println!("{}", report.message());
    let (lo, hi) = grid.value_range();
    println!("Values span {}..={} ({} distinct)\n", lo, hi, grid.distinct_values());

    // Edit one cell per column
    println!("Editing one cell in each column...\n");
    let mut edits = EditSet::new();
    let mut edited = grid;
    for (row, col, value) in [(0, 0, 480), (0, 1, 530), (3, 2, 505), (3, 3, 499)] {
        let pos = Position::new(row, col);
        edited = resolve_edit(&edited, target, pos, value, &edits);
        edits.record(pos, value)?;
        println!(
            "after ({}, {}) = {}: {}",
            row,
            col,
            value,
            ValidationReport::new(&edited, target).message()
        );
    }
    println!("\n{}\n", edited);

    // Parse a grid from text and recover its seeds
    println!("--- Parsing a grid from text ---\n");
    let text = "5110809 2090403 1554850 1861293\n\
                4124495 1104089  568536  874979\n\
                4820953 1800547 1264994 1571437\n\
                5769623 2749217 2213664 2520107";
    let parsed = Grid::from_text(text)?;
    if let Some(seeds) = Seeds::decompose(&parsed) {
        println!("rows {:?}\ncols {:?}\ntotal {}", seeds.rows, seeds.cols, seeds.total());
    }
    let sums = permutation_sums(&parsed);
    println!("first assignment {:?} sums to {}\n", sums[0].0, sums[0].1);

    println!("{}", share_text(&edited, target));
    Ok(())
}
