// Property-based tests for generation, validation and edit resolution.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use forcing_core::{
    generate, reset, resolve_edit, validate, EditSet, Grid, Position, SeedSolver, Seeds, Target,
    Variance, MAX_VALUE, MIN_VALUE,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_target() -> impl Strategy<Value = Target> {
    prop_oneof![
        3 => MIN_VALUE..=MAX_VALUE,
        1 => 1i64..=64,
        1 => 9_999_000i64..=MAX_VALUE,
    ]
    .prop_map(|t| Target::new(t).unwrap())
}

fn arb_variance() -> impl Strategy<Value = Variance> {
    prop_oneof![
        Just(0.0),
        Just(0.25),
        Just(0.5),
        Just(0.75),
        Just(1.0),
        0.0f64..=1.0,
    ]
    .prop_map(Variance::new)
}

/// Four edits, one per column, with rows and values chosen freely.
fn arb_full_edits() -> impl Strategy<Value = [(usize, i64); 4]> {
    [
        (0usize..4, 1i64..=100_000),
        (0usize..4, 1i64..=100_000),
        (0usize..4, 1i64..=100_000),
        (0usize..4, 1i64..=100_000),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn generated_grid_satisfies_invariant(target in arb_target(), variance in arb_variance(), seed in any::<u64>()) {
        let grid = SeedSolver::with_seed(seed).solve(target, variance).to_grid();
        prop_assert!(validate(&grid, target));
    }

    #[test]
    fn generated_cells_are_positive(target in arb_target(), variance in arb_variance(), seed in any::<u64>()) {
        prop_assume!(target.get() >= 4);
        let grid = SeedSolver::with_seed(seed).solve(target, variance).to_grid();
        let (lo, _) = grid.value_range();
        prop_assert!(lo >= 1, "min cell {} for target {}", lo, target);
    }

    #[test]
    fn zero_variance_is_narrow(target in arb_target()) {
        let (lo, hi) = generate(target, Variance::ZERO).value_range();
        prop_assert!(hi - lo <= 1);
    }

    #[test]
    fn complete_edits_keep_their_values(target in arb_target(), edits in arb_full_edits()) {
        let mut grid = generate(target, Variance::new(0.5));
        let mut set = EditSet::new();
        for (col, &(row, value)) in edits.iter().enumerate() {
            let pos = Position::new(row, col);
            grid = resolve_edit(&grid, target, pos, value, &set);
            set.record(pos, value).unwrap();
        }
        for (pos, value) in set.iter() {
            prop_assert_eq!(grid.value(pos), value);
            prop_assert!(grid.cell(pos).is_user_edited);
        }
        // Some row left unpinned means the gap to the target was absorbed.
        let mut rows: Vec<usize> = edits.iter().map(|&(row, _)| row).collect();
        rows.sort_unstable();
        rows.dedup();
        if rows.len() < 4 {
            prop_assert!(validate(&grid, target));
        }
    }

    #[test]
    fn text_round_trip(target in arb_target(), variance in arb_variance()) {
        let grid = generate(target, variance);
        let parsed = Grid::from_text(&grid.to_text()).unwrap();
        prop_assert_eq!(parsed.values(), grid.values());
    }

    #[test]
    fn generated_grid_decomposes_to_target(target in arb_target(), variance in arb_variance()) {
        let grid = generate(target, variance);
        let seeds = Seeds::decompose(&grid).unwrap();
        prop_assert_eq!(seeds.total(), target.get());
    }
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn thousand_random_targets_validate() {
    let mut solver = SeedSolver::with_seed(2024);
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    for _ in 0..1000 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let t = Target::new((state >> 33) as i64 % MAX_VALUE + 1).unwrap();
        for v in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let grid = solver.solve(t, Variance::new(v)).to_grid();
            assert!(validate(&grid, t), "target {} variance {}", t, v);
        }
    }
}

#[test]
fn hundred_at_zero_variance() {
    let grid = generate(Target::new(100).unwrap(), Variance::ZERO);
    let seeds = Seeds::decompose(&grid).unwrap();
    assert_eq!(grid.value_range(), (25, 25));
    assert_eq!(seeds.total(), 100);
    assert_eq!(SeedSolver::minimal(100).rows, [13, 13, 13, 13]);
    assert_eq!(SeedSolver::minimal(100).cols, [12, 12, 12, 12]);
}

#[test]
fn max_target_full_variance() {
    let t = Target::new(MAX_VALUE).unwrap();
    let grid = generate(t, Variance::MAX);
    assert!(validate(&grid, t));
    let (lo, hi) = grid.value_range();
    assert!(hi - lo > MAX_VALUE / 100);
}

#[test]
fn single_edit_leaves_grid_invalid() {
    let t = Target::new(1000).unwrap();
    let grid = generate(t, Variance::new(0.5));
    let edited = resolve_edit(&grid, t, Position::new(0, 0), 500, &EditSet::new());
    assert_eq!(edited.value(Position::new(0, 0)), 500);
    assert!(!validate(&edited, t));
}

#[test]
fn minimum_target() {
    let t = Target::new(1).unwrap();
    let grid = reset(t, Variance::MAX);
    assert!(validate(&grid, t));
    let (lo, hi) = grid.value_range();
    assert!(lo >= 0 && hi <= 1);
}
