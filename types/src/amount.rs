//! Grin amount type.
//!
//! Amounts are represented as integer base units (nanogrin, u64) to avoid
//! floating-point errors. Display-unit scaling happens only at the
//! request-construction boundary (fee estimation and send), never when
//! parsing responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Base units per grin.
pub const NANOGRIN_PER_GRIN: u64 = 1_000_000_000;

/// An amount in nanogrin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Convert a display-unit amount (grin) into base units, rounding to
    /// the nearest nanogrin.
    pub fn from_grins(grins: f64) -> Self {
        Self((grins * NANOGRIN_PER_GRIN as f64).round() as u64)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn as_grins(&self) -> f64 {
        self.0 as f64 / NANOGRIN_PER_GRIN as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:09} ツ",
            self.0 / NANOGRIN_PER_GRIN,
            self.0 % NANOGRIN_PER_GRIN
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_grins_scales_by_ten_to_the_ninth() {
        assert_eq!(Amount::from_grins(1.5).raw(), 1_500_000_000);
        assert_eq!(Amount::from_grins(0.0).raw(), 0);
        assert_eq!(Amount::from_grins(2.0).raw(), 2_000_000_000);
    }

    #[test]
    fn from_grins_rounds_to_nearest_nanogrin() {
        assert_eq!(Amount::from_grins(0.000000001).raw(), 1);
        assert_eq!(Amount::from_grins(0.123456789).raw(), 123_456_789);
    }

    #[test]
    fn as_grins_inverts_whole_values() {
        let amount = Amount::new(3_000_000_000);
        assert_eq!(amount.as_grins(), 3.0);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let a = Amount::new(10);
        let b = Amount::new(50);
        assert_eq!(a.saturating_sub(b), Amount::ZERO);
    }

    #[test]
    fn display_shows_nine_decimals() {
        assert_eq!(Amount::new(1_500_000_000).to_string(), "1.500000000 ツ");
        assert_eq!(Amount::new(42).to_string(), "0.000000042 ツ");
    }
}
