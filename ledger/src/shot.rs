//! Shots — the last-known snapshot of an entity's available votes.
//!
//! Exactly one live shot per entity, overwritten after every mutating
//! operation and never versioned. A shot always reflects the state AFTER the
//! most recent reward-section boundary, so it is the baseline against which
//! the next section's reward is pro-rated.

use pospool_types::{Amount, BlockNumber};
use serde::{Deserialize, Serialize};

/// Snapshot of a user's available votes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserShot {
    pub available: u64,
    pub at: BlockNumber,
}

/// Snapshot of the pool's available votes and undistributed balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolShot {
    pub available: u64,
    pub balance: Amount,
    pub at: BlockNumber,
}
