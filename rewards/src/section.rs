//! Reward sections — the append-only history of pool yield.
//!
//! Each section covers a closed interval of blocks over which the pool held
//! a fixed `available` total and earned a fixed total reward. The last
//! element is always the active section (`end == None`); closed sections are
//! never mutated. The log rotates whenever the pool's available total
//! changes, so a section's `available` is constant over its lifetime.

use pospool_types::{Amount, BlockNumber, PoolError, RATIO_BASE};
use serde::{Deserialize, Serialize};

/// One reward section: "from `start` until `end`, the pool held `available`
/// votes and earned `reward`."
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSection {
    /// Pool available votes in effect during this section.
    pub available: u64,
    /// Total reward accrued during this section. Zero until the section is
    /// closed by an interest event; sections closed by rotation stay zero.
    pub reward: Amount,
    pub start: BlockNumber,
    pub end: Option<BlockNumber>,
}

impl RewardSection {
    /// Whether this section has been closed.
    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

/// The ordered, append-only sequence of reward sections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectionLog {
    sections: Vec<RewardSection>,
}

impl SectionLog {
    /// A fresh log with an empty active section at genesis.
    pub fn new() -> Self {
        Self {
            sections: vec![RewardSection {
                available: 0,
                reward: Amount::ZERO,
                start: BlockNumber::GENESIS,
                end: None,
            }],
        }
    }

    /// Index of the active section — also the number of closed sections.
    pub fn active_index(&self) -> usize {
        self.sections.len() - 1
    }

    pub fn active(&self) -> &RewardSection {
        self.sections.last().expect("log always has an active section")
    }

    /// The most recently closed section, if any section has closed yet.
    pub fn last_closed(&self) -> Option<&RewardSection> {
        let n = self.active_index();
        (n > 0).then(|| &self.sections[n - 1])
    }

    /// Closed sections in `[from, active_index)`.
    pub fn closed_since(&self, from: usize) -> &[RewardSection] {
        &self.sections[from.min(self.active_index())..self.active_index()]
    }

    pub fn get(&self, index: usize) -> Option<&RewardSection> {
        self.sections.get(index)
    }

    /// Total sections, closed plus active.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// The log always holds at least the active section.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn close_and_open(
        &mut self,
        reward: Amount,
        pool_available: u64,
        at: BlockNumber,
    ) -> Result<(), PoolError> {
        let active = self
            .sections
            .last_mut()
            .expect("log always has an active section");
        if at < active.start {
            return Err(PoolError::OutOfOrderBlock {
                at: at.as_u64(),
                section_start: active.start.as_u64(),
            });
        }
        active.reward = reward;
        active.end = Some(at);
        self.sections.push(RewardSection {
            available: pool_available,
            reward: Amount::ZERO,
            start: at,
            end: None,
        });
        Ok(())
    }

    /// Close the active section with the interest accrued during it and open
    /// a new one. Returns the pool fee to record.
    ///
    /// If the closing section held zero available votes, no depositor was
    /// present to earn the reward and the whole of it becomes pool fee.
    pub fn record_interest(
        &mut self,
        gross: Amount,
        pool_available: u64,
        fee_rate_bps: u32,
        at: BlockNumber,
    ) -> Result<Amount, PoolError> {
        let fee = if self.active().available == 0 {
            gross
        } else {
            gross
                .checked_mul_bps(fee_rate_bps, RATIO_BASE)
                .ok_or(PoolError::Overflow)?
        };
        self.close_and_open(gross, pool_available, at)?;
        Ok(fee)
    }

    /// Close the active section with zero reward and open a new one seeded
    /// with the changed pool available. Called on every available-changing
    /// operation.
    pub fn rotate(&mut self, pool_available: u64, at: BlockNumber) -> Result<(), PoolError> {
        self.close_and_open(Amount::ZERO, pool_available, at)
    }
}

impl Default for SectionLog {
    fn default() -> Self {
        Self::new()
    }
}
