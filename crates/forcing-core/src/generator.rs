use crate::seeds::Seeds;
use crate::{Target, Variance, SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Offset profile for row seeds, in units of the amplitude. Sums to zero and
/// is deliberately not an arithmetic progression.
const ROW_SHAPE: [f64; SIZE] = [-0.9, -0.3, 0.25, 0.95];
/// Offset profile for column seeds. Sums to zero.
const COL_SHAPE: [f64; SIZE] = [-0.75, -0.15, 0.4, 0.5];

/// Spread cap for targets below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadBand {
    /// Exclusive upper bound on the target for this band.
    pub below: i64,
    /// Maximum seed offset as a fraction of `target / 8` at variance 1.
    pub cap: f64,
}

/// Configuration for seed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Spread caps by target magnitude, ascending by `below`. Targets past the
    /// last band use the last cap.
    pub spread_bands: Vec<SpreadBand>,
    /// Largest allowed `max cell - min cell`, as a fraction of the target.
    pub max_spread_ratio: f64,
    /// Random wobble added to each shape entry, in amplitude units.
    pub jitter: f64,
    /// Halving attempts before falling back to the minimal spread.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spread_bands: vec![
                SpreadBand { below: 1_000, cap: 0.5 },
                SpreadBand { below: 100_000, cap: 0.7 },
                SpreadBand { below: i64::MAX, cap: 0.85 },
            ],
            max_spread_ratio: 0.45,
            jitter: 0.1,
            max_attempts: 8,
        }
    }
}

impl GeneratorConfig {
    /// Narrow grids: values stay close to `target / 4`.
    pub fn tight() -> Self {
        Self {
            spread_bands: vec![SpreadBand { below: i64::MAX, cap: 0.3 }],
            max_spread_ratio: 0.2,
            ..Self::default()
        }
    }

    /// Wide grids for large targets.
    pub fn wide() -> Self {
        Self {
            spread_bands: vec![
                SpreadBand { below: 1_000, cap: 0.6 },
                SpreadBand { below: i64::MAX, cap: 0.9 },
            ],
            max_spread_ratio: 0.5,
            ..Self::default()
        }
    }

    /// Spread cap that applies to `target`.
    pub fn cap_for(&self, target: i64) -> f64 {
        self.spread_bands
            .iter()
            .find(|band| target < band.below)
            .or_else(|| self.spread_bands.last())
            .map(|band| band.cap)
            .unwrap_or(0.0)
    }
}

/// Derives row and column seeds for a target sum.
pub struct SeedSolver {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for SeedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSolver {
    /// Create a solver with default configuration and a random seed
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a solver with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a solver with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce 8 seeds whose total is exactly `target`.
    ///
    /// At variance 0 this is [`SeedSolver::minimal`]. Otherwise the seeds carry
    /// organic offsets sized by the variance and the target's spread cap, kept
    /// so that every cell is at least 1 and the cell spread stays under the
    /// configured ratio of the target.
    pub fn solve(&mut self, target: Target, variance: Variance) -> Seeds {
        let target = target.get();
        let minimal = Self::minimal(target);
        if variance.is_zero() {
            return minimal;
        }

        let base = target / (2 * SIZE as i64);
        let mut amplitude = variance.get() * self.config.cap_for(target) * base as f64;

        for attempt in 0..self.config.max_attempts {
            if amplitude < 1.0 {
                break;
            }
            let offsets = self.organic_offsets(amplitude);
            if let Some(seeds) = self.settle(&minimal, offsets, target) {
                trace!(sum = target, attempt, spread = seeds.cell_spread(), "organic seeds accepted");
                return seeds;
            }
            debug!(sum = target, attempt, amplitude, "organic seeds rejected, scaling down");
            amplitude /= 2.0;
        }

        debug!(sum = target, "falling back to minimal spread");
        minimal
    }

    /// The narrowest seed set: every seed is `target / 8`, and the first
    /// `target % 8` seeds (rows first) get one more.
    ///
    /// All 16 cells are within 1 of each other. For targets of 4 or more every
    /// cell is at least 1.
    pub fn minimal(target: i64) -> Seeds {
        let mut seeds = Seeds::default();
        seeds.spread_evenly(target);
        seeds
    }

    /// Shuffled, jittered copies of the row and column shapes, scaled to
    /// `amplitude` and rounded. Rows come first.
    fn organic_offsets(&mut self, amplitude: f64) -> [i64; 2 * SIZE] {
        let mut rows = ROW_SHAPE;
        let mut cols = COL_SHAPE;
        self.shuffle(&mut rows);
        self.shuffle(&mut cols);

        let mut offsets = [0i64; 2 * SIZE];
        for (slot, shape) in offsets.iter_mut().zip(rows.iter().chain(cols.iter())) {
            let wobble = (self.rng.next_f64() * 2.0 - 1.0) * self.config.jitter;
            *slot = ((shape + wobble) * amplitude).round() as i64;
        }
        offsets
    }

    /// Apply offsets to the minimal seeds and restore the exact total, then
    /// enforce the spread ratio and positivity. `None` if the result still
    /// breaks either bound.
    fn settle(&self, minimal: &Seeds, offsets: [i64; 2 * SIZE], target: i64) -> Option<Seeds> {
        let limit = (self.config.max_spread_ratio * target as f64).floor() as i64;

        let mut seeds = with_offsets(minimal, &offsets, target);
        let spread = seeds.cell_spread();
        if spread > limit && spread > 0 {
            let factor = limit as f64 / spread as f64;
            let scaled = offsets.map(|o| (o as f64 * factor).trunc() as i64);
            seeds = with_offsets(minimal, &scaled, target);
        }

        let low = seeds.min_cell();
        if low < 1 {
            // Lift every seed by `shift`, then take the surplus back out of the
            // last column seed so the total is unchanged.
            let shift = (1 - low + 1) / 2;
            for seed in seeds.rows.iter_mut().chain(seeds.cols.iter_mut()) {
                *seed += shift;
            }
            seeds.cols[SIZE - 1] -= 2 * SIZE as i64 * shift;
        }

        debug_assert_eq!(seeds.total(), target);
        (seeds.min_cell() >= 1 && seeds.cell_spread() <= limit).then_some(seeds)
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

fn with_offsets(minimal: &Seeds, offsets: &[i64; 2 * SIZE], target: i64) -> Seeds {
    let mut flat = minimal.to_flat();
    for (seed, offset) in flat.iter_mut().zip(offsets) {
        *seed += offset;
    }
    let mut seeds = Seeds::from_flat(flat);
    seeds.spread_evenly(target - seeds.total());
    seeds
}

/// Simple PRNG for no-std compatibility
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        // Use getrandom for WASM-compatible random seeding
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        // PCG-like PRNG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.next_u64() as f64 / (u32::MAX as f64 + 1.0)
    }
}
