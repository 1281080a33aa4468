//! Currency amount type.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid
//! floating-point errors. The smallest unit is 1 Drip; 1 CFX = 10^18 Drip.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of Drip in one whole CFX.
pub const COIN: u128 = 1_000_000_000_000_000_000;

/// A currency amount in Drip, the smallest indivisible unit.
///
/// Internally stored as raw units (u128) for precision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(drip: u128) -> Self {
        Self(drip)
    }

    /// Whole-CFX constructor: `from_cfx(100)` is 100 CFX in Drip.
    pub fn from_cfx(cfx: u64) -> Self {
        Self(cfx as u128 * COIN)
    }

    pub fn raw(&self) -> u128 {
        self.0
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

    /// Truncating basis-point scaling: `amount * bps / base`.
    ///
    /// Floor division — the ledger must never distribute more than it
    /// received, so rounding dust stays with the pool.
    pub fn checked_mul_bps(self, bps: u32, base: u32) -> Option<Self> {
        self.0
            .checked_mul(bps as u128)
            .map(|n| Self(n / base as u128))
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
        write!(f, "{} Drip", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cfx_scales_by_coin() {
        assert_eq!(Amount::from_cfx(1).raw(), COIN);
        assert_eq!(Amount::from_cfx(100).raw(), 100 * COIN);
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        assert!(Amount::new(1).checked_sub(Amount::new(2)).is_none());
    }

    #[test]
    fn mul_bps_truncates() {
        // 10% of 56 CFX
        let fee = Amount::from_cfx(56).checked_mul_bps(1000, 10_000).unwrap();
        assert_eq!(fee.raw(), 56 * COIN / 10);
        // floor division on a non-exact split
        let odd = Amount::new(7).checked_mul_bps(1, 3).unwrap();
        assert_eq!(odd.raw(), 2);
    }
}
