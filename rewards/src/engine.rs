//! Per-user interest settlement against the section log.
//!
//! The engine owns the log and one checkpoint per user: a cursor marking the
//! first unconsumed section and a claimable bucket. The facade settles a
//! user BEFORE any operation that changes their available votes, so a user's
//! shot value is constant across all of their unconsumed sections — one shot
//! per user is enough.

use crate::section::{RewardSection, SectionLog};
use pospool_types::{Address, Amount, BlockNumber, PoolError, RATIO_BASE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user's position in the section log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCheckpoint {
    /// Index of the first section this user has not yet consumed.
    pub cursor: usize,
    /// Settled, unclaimed interest.
    pub claimable: Amount,
}

/// The reward snapshot engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardEngine {
    log: SectionLog,
    checkpoints: HashMap<Address, UserCheckpoint>,
}

impl RewardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from snapshot parts.
    pub fn from_parts(
        log: SectionLog,
        checkpoints: impl IntoIterator<Item = (Address, UserCheckpoint)>,
    ) -> Self {
        Self {
            log,
            checkpoints: checkpoints.into_iter().collect(),
        }
    }

    pub fn log(&self) -> &SectionLog {
        &self.log
    }

    /// Start tracking a user with their cursor at the active section, so a
    /// late joiner consumes nothing accrued before they joined.
    pub fn track(&mut self, who: &Address) {
        let cursor = self.log.active_index();
        self.checkpoints
            .entry(who.clone())
            .or_insert(UserCheckpoint {
                cursor,
                claimable: Amount::ZERO,
            });
    }

    /// Close the active section with newly reported interest; returns the
    /// pool fee. O(1) — no user iteration.
    pub fn record_interest(
        &mut self,
        gross: Amount,
        pool_available: u64,
        fee_rate_bps: u32,
        at: BlockNumber,
    ) -> Result<Amount, PoolError> {
        self.log.record_interest(gross, pool_available, fee_rate_bps, at)
    }

    /// Close the active section with zero reward after an available-changing
    /// operation.
    pub fn rotate(&mut self, pool_available: u64, at: BlockNumber) -> Result<(), PoolError> {
        self.log.rotate(pool_available, at)
    }

    /// Settle a user's unconsumed sections into their claimable bucket and
    /// advance their cursor to the active section. Returns the newly settled
    /// amount.
    ///
    /// Idempotent: with no intervening section closes a second call settles
    /// zero. `shot_available` is the user's shot value, which held across
    /// every unconsumed section because the facade settles before mutating.
    pub fn settle(
        &mut self,
        who: &Address,
        shot_available: u64,
        fee_rate_bps: u32,
    ) -> Result<Amount, PoolError> {
        let active = self.log.active_index();
        let checkpoint = self
            .checkpoints
            .entry(who.clone())
            .or_insert(UserCheckpoint {
                cursor: active,
                claimable: Amount::ZERO,
            });

        let mut settled = Amount::ZERO;
        for section in self.log.closed_since(checkpoint.cursor) {
            let share = user_share(section, shot_available, fee_rate_bps)?;
            settled = settled.checked_add(share).ok_or(PoolError::Overflow)?;
        }
        checkpoint.cursor = active;
        checkpoint.claimable = checkpoint
            .claimable
            .checked_add(settled)
            .ok_or(PoolError::Overflow)?;
        Ok(settled)
    }

    /// A user's settled, unclaimed interest. Zero for an unknown user.
    pub fn claimable(&self, who: &Address) -> Amount {
        self.checkpoints
            .get(who)
            .map_or(Amount::ZERO, |c| c.claimable)
    }

    /// Zero a user's claimable bucket, returning what was in it.
    pub fn take_claimable(&mut self, who: &Address) -> Amount {
        match self.checkpoints.get_mut(who) {
            Some(checkpoint) => std::mem::take(&mut checkpoint.claimable),
            None => Amount::ZERO,
        }
    }

    pub fn checkpoint(&self, who: &Address) -> Option<UserCheckpoint> {
        self.checkpoints.get(who).copied()
    }

    /// All checkpoints, unordered.
    pub fn checkpoints(&self) -> impl Iterator<Item = (&Address, &UserCheckpoint)> {
        self.checkpoints.iter()
    }
}

/// One user's share of one closed section, after the pool fee.
///
/// `share = reward * (RATIO_BASE - fee) / RATIO_BASE * shot / available`,
/// truncating at each division so the sum across users can never exceed the
/// section's net reward. A section with zero available votes pays nothing —
/// its whole reward went to the fee bucket when it closed.
fn user_share(
    section: &RewardSection,
    shot_available: u64,
    fee_rate_bps: u32,
) -> Result<Amount, PoolError> {
    if section.available == 0 || shot_available == 0 || section.reward.is_zero() {
        return Ok(Amount::ZERO);
    }
    let net = section
        .reward
        .checked_mul_bps(RATIO_BASE - fee_rate_bps, RATIO_BASE)
        .ok_or(PoolError::Overflow)?;
    let share = net
        .raw()
        .checked_mul(shot_available as u128)
        .ok_or(PoolError::Overflow)?
        / section.available as u128;
    Ok(Amount::new(share))
}
