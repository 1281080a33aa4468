//! Lock queues — the `locked -> unlocked` transition of the withdrawal
//! state machine.
//!
//! Each stake decrease creates its own tranche with its own deadline;
//! overlapping decreases never extend one another. Maturation is lazy:
//! tranches are coalesced into `unlocked` on access, evaluated against the
//! caller-supplied block number. There is no background scheduler.

use pospool_types::BlockNumber;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One pending unlock: `votes` become withdrawable at `unlock_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedTranche {
    pub votes: u64,
    pub unlock_at: BlockNumber,
}

/// An ordered queue of pending unlocks, oldest deadline first.
///
/// Deadlines are monotone because every tranche gets `now + lock_period`,
/// so maturation only ever pops from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockQueue {
    tranches: VecDeque<LockedTranche>,
}

impl LockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new tranche.
    pub fn push(&mut self, votes: u64, unlock_at: BlockNumber) {
        self.tranches.push_back(LockedTranche { votes, unlock_at });
    }

    /// Drain every tranche whose deadline has passed, returning the total
    /// matured votes.
    pub fn mature(&mut self, at: BlockNumber) -> u64 {
        let mut matured = 0u64;
        while let Some(front) = self.tranches.front() {
            if front.unlock_at > at {
                break;
            }
            matured += front.votes;
            self.tranches.pop_front();
        }
        matured
    }

    /// Votes still pending, across all tranches.
    pub fn pending(&self) -> u64 {
        self.tranches.iter().map(|t| t.votes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tranches.is_empty()
    }

    pub fn tranches(&self) -> impl Iterator<Item = &LockedTranche> {
        self.tranches.iter()
    }
}
