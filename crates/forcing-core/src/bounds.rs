use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest accepted target and user-supplied cell value.
pub const MIN_VALUE: i64 = 1;
/// Largest accepted target and user-supplied cell value.
pub const MAX_VALUE: i64 = 9_999_999;

/// A validated target sum in `MIN_VALUE..=MAX_VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Target(i64);

impl Target {
    /// Validate a raw target. Out-of-range values are rejected, not clamped.
    pub fn new(value: i64) -> Result<Self> {
        if (MIN_VALUE..=MAX_VALUE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::TargetOutOfRange(value))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Target {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Target> for i64 {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dispersion knob for generation, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Variance(f64);

impl Variance {
    /// No dispersion: the narrowest possible grid.
    pub const ZERO: Variance = Variance(0.0);
    /// Full dispersion.
    pub const MAX: Variance = Variance(1.0);

    /// Clamp into `[0, 1]`. NaN is treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Variance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Variance> for f64 {
    fn from(variance: Variance) -> Self {
        variance.0
    }
}

/// Clamp a user-supplied cell value into `MIN_VALUE..=MAX_VALUE`.
pub fn clamp_cell_value(value: i64) -> i64 {
    value.clamp(MIN_VALUE, MAX_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_bounds() {
        assert!(Target::new(1).is_ok());
        assert!(Target::new(9_999_999).is_ok());
        assert_eq!(Target::new(0), Err(Error::TargetOutOfRange(0)));
        assert_eq!(
            Target::new(10_000_000),
            Err(Error::TargetOutOfRange(10_000_000))
        );
        assert_eq!(Target::new(-5), Err(Error::TargetOutOfRange(-5)));
    }

    #[test]
    fn test_variance_clamps() {
        assert_eq!(Variance::new(-0.5).get(), 0.0);
        assert_eq!(Variance::new(1.7).get(), 1.0);
        assert_eq!(Variance::new(0.25).get(), 0.25);
        assert!(Variance::new(f64::NAN).is_zero());
    }

    #[test]
    fn test_clamp_cell_value() {
        assert_eq!(clamp_cell_value(0), 1);
        assert_eq!(clamp_cell_value(-40), 1);
        assert_eq!(clamp_cell_value(500), 500);
        assert_eq!(clamp_cell_value(12_345_678), 9_999_999);
    }

    #[test]
    fn test_target_serde_rejects_out_of_range() {
        let ok: Target = serde_json::from_str("250").unwrap();
        assert_eq!(ok.get(), 250);
        assert!(serde_json::from_str::<Target>("0").is_err());
    }
}
