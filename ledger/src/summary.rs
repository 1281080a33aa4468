//! Pool-wide and per-user vote summaries.

use pospool_types::Amount;
use serde::{Deserialize, Serialize};

/// Pool-wide vote totals. Singleton, lives for the pool's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSummary {
    /// All votes ever staked and not yet withdrawn.
    pub total_votes: u64,
    /// Votes earning reward and eligible to be decreased.
    pub available: u64,
    /// Sum of all users' pending unlocks.
    pub locked: u64,
    /// Sum of all users' withdrawable votes.
    pub unlocked: u64,
    /// Accrued, unclaimed pool fee.
    pub interest: Amount,
}

/// Per-participant vote totals.
///
/// Created on first stake; never deleted. May decay to all-zero fields while
/// the identity persists for historical interest claims.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Total votes owned by this user.
    pub votes: u64,
    /// Votes earning reward and eligible to be decreased.
    pub available: u64,
    /// Votes mid-way through the unlock delay.
    pub locked: u64,
    /// Votes past the delay, withdrawable but not yet paid out.
    pub unlocked: u64,
}
