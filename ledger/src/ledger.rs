//! The vote ledger — exclusive owner of summaries, shots, and lock queues.
//!
//! The ledger does arithmetic and state transitions only; operation-level
//! validation order (settle first, external calls last) is the facade's job.
//! The pool keeps a mirror lock queue so pool-level maturation never
//! iterates users.

use crate::lock_queue::LockQueue;
use crate::shot::{PoolShot, UserShot};
use crate::summary::{PoolSummary, UserSummary};
use pospool_types::{Address, Amount, BlockNumber, PoolError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    pool: PoolSummary,
    pool_shot: PoolShot,
    pool_locks: LockQueue,
    users: HashMap<Address, UserSummary>,
    user_shots: HashMap<Address, UserShot>,
    user_locks: HashMap<Address, LockQueue>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from snapshot parts.
    pub fn from_parts(
        pool: PoolSummary,
        pool_shot: PoolShot,
        pool_locks: LockQueue,
        users: impl IntoIterator<Item = (Address, UserSummary, Option<UserShot>, LockQueue)>,
    ) -> Self {
        let mut ledger = Self {
            pool,
            pool_shot,
            pool_locks,
            ..Self::default()
        };
        for (who, summary, shot, locks) in users {
            if let Some(shot) = shot {
                ledger.user_shots.insert(who.clone(), shot);
            }
            if !locks.is_empty() {
                ledger.user_locks.insert(who.clone(), locks);
            }
            ledger.users.insert(who, summary);
        }
        ledger
    }

    /// Whether any stake exists. Policy setters are rejected once this is true.
    pub fn has_stake(&self) -> bool {
        self.pool.total_votes > 0
    }

    // ── Stake transitions ──────────────────────────────────────────────

    /// Credit newly staked votes to a user and the pool.
    ///
    /// Creates the user on first stake. Increments `votes` and `available`
    /// on both summaries.
    pub fn credit_stake(&mut self, who: &Address, votes: u64) -> Result<(), PoolError> {
        let user = self.users.entry(who.clone()).or_default();
        user.votes = user.votes.checked_add(votes).ok_or(PoolError::Overflow)?;
        user.available = user
            .available
            .checked_add(votes)
            .ok_or(PoolError::Overflow)?;
        self.pool.total_votes = self
            .pool
            .total_votes
            .checked_add(votes)
            .ok_or(PoolError::Overflow)?;
        self.pool.available = self
            .pool
            .available
            .checked_add(votes)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    /// Move votes from `available` into a locked tranche with its own
    /// deadline. Pool `available` drops immediately; `total_votes` is
    /// unchanged.
    pub fn lock_stake(
        &mut self,
        who: &Address,
        votes: u64,
        unlock_at: BlockNumber,
    ) -> Result<(), PoolError> {
        let user = self.users.get_mut(who).ok_or(PoolError::NotRegistered)?;
        if votes > user.available {
            return Err(PoolError::InsufficientAvailable {
                needed: votes,
                available: user.available,
            });
        }
        user.available -= votes;
        user.locked += votes;
        self.pool.available = self
            .pool
            .available
            .checked_sub(votes)
            .ok_or(PoolError::Overflow)?;
        self.pool.locked += votes;

        self.user_locks
            .entry(who.clone())
            .or_default()
            .push(votes, unlock_at);
        self.pool_locks.push(votes, unlock_at);
        Ok(())
    }

    /// Lazily mature one user's lock queue and the pool mirror queue
    /// against `at`, coalescing matured tranches into `unlocked`.
    pub fn mature(&mut self, who: &Address, at: BlockNumber) {
        if let Some(queue) = self.user_locks.get_mut(who) {
            let matured = queue.mature(at);
            if matured > 0 {
                if let Some(user) = self.users.get_mut(who) {
                    user.locked -= matured;
                    user.unlocked += matured;
                }
            }
        }
        self.mature_pool(at);
    }

    /// Mature only the pool mirror queue.
    pub fn mature_pool(&mut self, at: BlockNumber) {
        let matured = self.pool_locks.mature(at);
        self.pool.locked -= matured;
        self.pool.unlocked += matured;
    }

    /// Mature every queue against the same block. Test and debug helper —
    /// production paths mature lazily per access.
    pub fn mature_all(&mut self, at: BlockNumber) {
        let addresses: Vec<Address> = self.user_locks.keys().cloned().collect();
        for who in addresses {
            self.mature(&who, at);
        }
        self.mature_pool(at);
    }

    /// Remove matured votes from the pool entirely — the terminal
    /// `withdrawn` state. Caller must have matured the queues first.
    pub fn withdraw_stake(&mut self, who: &Address, votes: u64) -> Result<(), PoolError> {
        let user = self.users.get_mut(who).ok_or(PoolError::NotRegistered)?;
        if votes > user.unlocked {
            return Err(PoolError::InsufficientUnlocked {
                needed: votes,
                unlocked: user.unlocked,
            });
        }
        user.unlocked -= votes;
        user.votes = user.votes.checked_sub(votes).ok_or(PoolError::Overflow)?;
        self.pool.unlocked = self
            .pool
            .unlocked
            .checked_sub(votes)
            .ok_or(PoolError::Overflow)?;
        self.pool.total_votes = self
            .pool
            .total_votes
            .checked_sub(votes)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    /// Record pool fee taken from a reward section.
    pub fn add_pool_fee(&mut self, fee: Amount) -> Result<(), PoolError> {
        self.pool.interest = self
            .pool
            .interest
            .checked_add(fee)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    // ── Shots ──────────────────────────────────────────────────────────

    /// Overwrite a user's live shot with their current available votes.
    pub fn refresh_user_shot(&mut self, who: &Address, at: BlockNumber) {
        let available = self.users.get(who).map_or(0, |u| u.available);
        self.user_shots
            .insert(who.clone(), UserShot { available, at });
    }

    /// Overwrite the pool's live shot.
    pub fn refresh_pool_shot(&mut self, balance: Amount, at: BlockNumber) {
        self.pool_shot = PoolShot {
            available: self.pool.available,
            balance,
            at,
        };
    }

    pub fn user_shot(&self, who: &Address) -> Option<UserShot> {
        self.user_shots.get(who).copied()
    }

    pub fn pool_shot(&self) -> PoolShot {
        self.pool_shot
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn pool(&self) -> &PoolSummary {
        &self.pool
    }

    /// A user's summary; all-zero for an identity the pool has never seen.
    pub fn user(&self, who: &Address) -> UserSummary {
        self.users.get(who).cloned().unwrap_or_default()
    }

    pub fn contains_user(&self, who: &Address) -> bool {
        self.users.contains_key(who)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// All users, unordered.
    pub fn users(&self) -> impl Iterator<Item = (&Address, &UserSummary)> {
        self.users.iter()
    }

    pub fn user_locks(&self, who: &Address) -> Option<&LockQueue> {
        self.user_locks.get(who)
    }

    pub fn pool_locks(&self) -> &LockQueue {
        &self.pool_locks
    }

    /// Conservation check: pool aggregates equal the per-user sums.
    ///
    /// Meaningful once every queue has been matured against the same block
    /// (see [`Self::mature_all`]).
    pub fn is_balanced(&self) -> bool {
        let mut votes = 0u64;
        let mut available = 0u64;
        let mut locked = 0u64;
        let mut unlocked = 0u64;
        for user in self.users.values() {
            votes += user.votes;
            available += user.available;
            locked += user.locked;
            unlocked += user.unlocked;
        }
        self.pool.total_votes == votes
            && self.pool.available == available
            && self.pool.locked == locked
            && self.pool.unlocked == unlocked
    }
}
