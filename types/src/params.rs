//! Pool parameters — the unit converter and the lock-period policy.
//!
//! Both must be fixed before the first stake exists; the facade rejects any
//! later change with `PolicyAlreadyLocked`.

use crate::amount::{Amount, COIN};
use crate::error::PoolError;
use serde::{Deserialize, Serialize};

/// Denominator for all basis-point ratios (fee rate, APY).
pub const RATIO_BASE: u32 = 10_000;

/// Configuration read by every component of the pool.
///
/// One vote is worth `cfx_count_of_one_vote` whole CFX; decreased stake stays
/// locked for `lock_period` blocks before it becomes withdrawable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolParams {
    /// Whole CFX per vote. Default: 1000.
    pub cfx_count_of_one_vote: u64,

    /// Unlock delay in blocks after a stake decrease.
    /// Default: 14 days at ~2 blocks/s.
    pub lock_period: u64,

    /// Pool fee taken from each reward section (basis points).
    pub fee_rate_bps: u32,

    /// How far back (in blocks) `pool_apy` looks when averaging sections.
    pub apy_window_blocks: u64,

    /// Blocks per year, used to annualize section yield.
    pub blocks_per_year: u64,
}

impl PoolParams {
    /// Conflux-flavored defaults for the live network.
    pub fn mainnet_defaults() -> Self {
        Self {
            cfx_count_of_one_vote: 1000,
            lock_period: 2 * 3600 * 24 * 14, // 14 days at 2 blocks/s
            fee_rate_bps: 1000,              // 10%
            apy_window_blocks: 2 * 3600 * 24 * 7,
            blocks_per_year: 2 * 3600 * 24 * 365,
        }
    }

    /// The Drip value of a single vote.
    pub fn one_vote_value(&self) -> Amount {
        Amount::new(self.cfx_count_of_one_vote as u128 * COIN)
    }

    /// Convert a currency amount to votes.
    ///
    /// Fails with `InvalidAmount` unless `amount` is an exact multiple of the
    /// per-vote value, so that `to_votes` and `to_currency` round-trip
    /// exactly by construction.
    pub fn to_votes(&self, amount: Amount) -> Result<u64, PoolError> {
        let unit = self.one_vote_value().raw();
        if unit == 0 {
            return Err(PoolError::Config(
                "cfx_count_of_one_vote must be non-zero".into(),
            ));
        }
        if amount.raw() % unit != 0 {
            return Err(PoolError::InvalidAmount(amount.raw()));
        }
        u64::try_from(amount.raw() / unit).map_err(|_| PoolError::Overflow)
    }

    /// Convert votes to a currency amount. Exact checked multiplication.
    pub fn to_currency(&self, votes: u64) -> Result<Amount, PoolError> {
        self.one_vote_value()
            .raw()
            .checked_mul(votes as u128)
            .map(Amount::new)
            .ok_or(PoolError::Overflow)
    }
}

/// Default is the mainnet configuration.
impl Default for PoolParams {
    fn default() -> Self {
        Self::mainnet_defaults()
    }
}
