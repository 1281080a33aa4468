//! The pool facade — public operation surface of the delegation pool.
//!
//! The host environment processes one state-changing call at a time to
//! completion, so the facade needs no locks; `&mut self` on every operation
//! (including reads that mature locks or settle interest) makes the
//! single-writer discipline a compile-time fact. Collaborator calls happen
//! only after all local state is committed, so a reentrant call observes a
//! consistent ledger.

use pospool_ledger::{PoolShot, PoolSummary, UserShot, UserSummary, VoteLedger};
use pospool_registry::{PosRegistrar, RegistryError, StakingVault};
use pospool_rewards::{pool_apy, RewardEngine, RewardSection};
use pospool_types::{Address, Amount, BlockNumber, NodeId, PoolError, PoolParams, ValidatorKeys};
use tracing::{debug, info};

use crate::snapshot::{PoolSnapshot, UserEntry};

/// The delegation pool.
pub struct PosPool<V: StakingVault, R: PosRegistrar> {
    params: PoolParams,
    ledger: VoteLedger,
    rewards: RewardEngine,
    /// Interest received from the registry and not yet claimed or taken as fee.
    balance: Amount,
    registered: bool,
    vault: V,
    registrar: R,
}

fn registry_err(e: RegistryError) -> PoolError {
    PoolError::Registry(e.to_string())
}

impl<V: StakingVault, R: PosRegistrar> PosPool<V, R> {
    pub fn new(params: PoolParams, vault: V, registrar: R) -> Self {
        Self {
            params,
            ledger: VoteLedger::new(),
            rewards: RewardEngine::new(),
            balance: Amount::ZERO,
            registered: false,
            vault,
            registrar,
        }
    }

    // ── Policy setters ─────────────────────────────────────────────────

    /// Change the unlock delay. Fails once any stake exists.
    pub fn set_lock_period(&mut self, blocks: u64) -> Result<(), PoolError> {
        if self.ledger.has_stake() {
            return Err(PoolError::PolicyAlreadyLocked);
        }
        self.params.lock_period = blocks;
        Ok(())
    }

    /// Change the per-vote value. Fails once any stake exists.
    pub fn set_cfx_count_of_one_vote(&mut self, count: u64) -> Result<(), PoolError> {
        if self.ledger.has_stake() {
            return Err(PoolError::PolicyAlreadyLocked);
        }
        self.params.cfx_count_of_one_vote = count;
        Ok(())
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    // ── Stake operations ───────────────────────────────────────────────

    /// One-time pool setup: stake the initial votes and forward the
    /// validator identity to the PoS registrar.
    pub fn register(
        &mut self,
        owner: &Address,
        node_id: NodeId,
        votes: u64,
        keys: &ValidatorKeys,
        payment: Amount,
        at: BlockNumber,
    ) -> Result<(), PoolError> {
        if self.registered {
            return Err(PoolError::AlreadyRegistered);
        }
        if votes == 0 {
            return Err(PoolError::ZeroVotes);
        }
        self.check_payment(votes, payment)?;
        self.ensure_in_order(at)?;

        self.rewards.track(owner);
        self.ledger.credit_stake(owner, votes)?;
        self.rewards.rotate(self.ledger.pool().available, at)?;
        self.refresh_shots(owner, at);
        self.registered = true;

        self.registrar
            .register(node_id, votes, keys)
            .map_err(registry_err)?;
        self.vault.deposit(payment).map_err(registry_err)?;

        info!(%owner, %node_id, votes, %at, "pool registered");
        Ok(())
    }

    /// Stake additional votes. Settles the user's interest first, so the new
    /// votes cannot retroactively claim prior sections.
    pub fn increase_stake(
        &mut self,
        who: &Address,
        votes: u64,
        payment: Amount,
        at: BlockNumber,
    ) -> Result<(), PoolError> {
        self.ensure_registered()?;
        if votes == 0 {
            return Err(PoolError::ZeroVotes);
        }
        self.check_payment(votes, payment)?;
        self.ensure_in_order(at)?;

        self.settle_user(who)?;
        self.ledger.credit_stake(who, votes)?;
        self.rewards.rotate(self.ledger.pool().available, at)?;
        self.refresh_shots(who, at);

        self.vault.deposit(payment).map_err(registry_err)?;

        debug!(%who, votes, pool_available = self.ledger.pool().available, %at, "stake increased");
        Ok(())
    }

    /// Move votes into the unlock pipeline. Each call creates an independent
    /// locked tranche maturing `lock_period` blocks from now; overlapping
    /// decreases never extend one another.
    pub fn decrease_stake(
        &mut self,
        who: &Address,
        votes: u64,
        at: BlockNumber,
    ) -> Result<(), PoolError> {
        self.ensure_registered()?;
        if votes == 0 {
            return Err(PoolError::ZeroVotes);
        }
        if !self.ledger.contains_user(who) {
            return Err(PoolError::NotRegistered);
        }
        self.ensure_in_order(at)?;
        self.ledger.mature(who, at);
        let available = self.ledger.user(who).available;
        if votes > available {
            return Err(PoolError::InsufficientAvailable {
                needed: votes,
                available,
            });
        }
        let amount = self.params.to_currency(votes)?;
        let unlock_at = at.saturating_add(self.params.lock_period);

        self.settle_user(who)?;
        self.ledger.lock_stake(who, votes, unlock_at)?;
        self.rewards.rotate(self.ledger.pool().available, at)?;
        self.refresh_shots(who, at);

        self.vault
            .request_unlock(amount, unlock_at)
            .map_err(registry_err)?;

        debug!(%who, votes, %unlock_at, pool_available = self.ledger.pool().available, %at, "stake decreased");
        Ok(())
    }

    /// Withdraw matured votes, releasing their currency value from the
    /// vault. Fails with `InsufficientUnlocked` until the lock period has
    /// elapsed. Does not touch `available`, so no section rotation and no
    /// settlement happens here.
    pub fn withdraw_stake(
        &mut self,
        who: &Address,
        votes: u64,
        at: BlockNumber,
    ) -> Result<Amount, PoolError> {
        if votes == 0 {
            return Err(PoolError::ZeroVotes);
        }
        self.ledger.mature(who, at);
        let amount = self.params.to_currency(votes)?;
        self.ledger.withdraw_stake(who, votes)?;
        self.refresh_shots(who, at);

        let paid = self.vault.withdraw(amount).map_err(registry_err)?;

        debug!(%who, votes, %paid, %at, "stake withdrawn");
        Ok(paid)
    }

    // ── Interest ───────────────────────────────────────────────────────

    /// Inbound notification from the staking registry: new interest earned
    /// since the last call. Closes the active reward section, takes the pool
    /// fee, and opens a new section at the current available total.
    pub fn receive_interest(&mut self, amount: Amount, at: BlockNumber) -> Result<(), PoolError> {
        let new_balance = self.balance.checked_add(amount).ok_or(PoolError::Overflow)?;
        let fee = self.rewards.record_interest(
            amount,
            self.ledger.pool().available,
            self.params.fee_rate_bps,
            at,
        )?;
        self.ledger.add_pool_fee(fee)?;
        self.balance = new_balance;
        self.ledger.refresh_pool_shot(self.balance, at);

        info!(gross = %amount, %fee, %at, "interest recorded");
        Ok(())
    }

    /// A user's claimable interest. Mutating read: settles outstanding
    /// sections into the claimable bucket first.
    pub fn user_interest(&mut self, who: &Address) -> Result<Amount, PoolError> {
        self.settle_user(who)?;
        Ok(self.rewards.claimable(who))
    }

    /// Settle and pay out a user's entire claimable interest from the pool
    /// balance. Fails with `NothingToClaim` when the bucket is empty.
    pub fn claim_all_interest(
        &mut self,
        who: &Address,
        at: BlockNumber,
    ) -> Result<Amount, PoolError> {
        self.settle_user(who)?;
        let amount = self.rewards.claimable(who);
        if amount.is_zero() {
            return Err(PoolError::NothingToClaim);
        }
        // Deduct from the balance first; the bucket survives a failed payout.
        let new_balance =
            self.balance
                .checked_sub(amount)
                .ok_or(PoolError::InsufficientBalance {
                    needed: amount.raw(),
                    available: self.balance.raw(),
                })?;
        self.rewards.take_claimable(who);
        self.balance = new_balance;
        self.ledger.refresh_pool_shot(self.balance, at);

        info!(%who, %amount, %at, "interest claimed");
        Ok(amount)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// A user's summary. Matures any eligible locked tranches first, so
    /// `unlocked` reflects the lock period lazily — there is no scheduler.
    pub fn user_summary(&mut self, who: &Address, at: BlockNumber) -> UserSummary {
        self.ledger.mature(who, at);
        self.ledger.user(who)
    }

    /// The pool-wide summary, with pool-level locks matured against `at`.
    pub fn pool_summary(&mut self, at: BlockNumber) -> PoolSummary {
        self.ledger.mature_pool(at);
        self.ledger.pool().clone()
    }

    /// Advisory annualized yield estimate over recent sections.
    pub fn pool_apy(&self, at: BlockNumber) -> u64 {
        pool_apy(
            self.rewards.log(),
            at,
            self.params.one_vote_value(),
            self.params.apy_window_blocks,
            self.params.blocks_per_year,
        )
    }

    pub fn user_shot(&self, who: &Address) -> Option<UserShot> {
        self.ledger.user_shot(who)
    }

    pub fn pool_shot(&self) -> PoolShot {
        self.ledger.pool_shot()
    }

    /// The most recently closed reward section.
    pub fn last_reward_section(&self) -> Option<RewardSection> {
        self.rewards.log().last_closed().copied()
    }

    /// Undistributed interest currently held by the pool.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    /// Conservation check after maturing every queue against `at`.
    /// Debug/test helper.
    pub fn is_balanced(&mut self, at: BlockNumber) -> bool {
        self.ledger.mature_all(at);
        self.ledger.is_balanced()
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    /// Capture the pool's full accounting state with an integrity hash.
    /// The host stores the bytes; storage mechanics stay outside the core.
    pub fn snapshot(&self, at: BlockNumber) -> PoolSnapshot {
        let mut users: Vec<UserEntry> = self
            .ledger
            .users()
            .map(|(who, summary)| UserEntry {
                address: who.clone(),
                summary: summary.clone(),
                shot: self.ledger.user_shot(who),
                locks: self.ledger.user_locks(who).cloned().unwrap_or_default(),
                checkpoint: self.rewards.checkpoint(who),
            })
            .collect();
        users.sort_by(|a, b| a.address.cmp(&b.address));

        PoolSnapshot::create(
            at,
            self.params.clone(),
            self.registered,
            self.balance,
            self.ledger.pool().clone(),
            self.ledger.pool_shot(),
            self.ledger.pool_locks().clone(),
            users,
            self.rewards.log().clone(),
        )
    }

    /// Rebuild a pool from a verified snapshot and fresh collaborator
    /// handles.
    pub fn restore(snapshot: PoolSnapshot, vault: V, registrar: R) -> Result<Self, PoolError> {
        if !snapshot.verify() {
            return Err(PoolError::Serialization(
                "snapshot hash mismatch".to_string(),
            ));
        }
        let ledger = VoteLedger::from_parts(
            snapshot.pool,
            snapshot.pool_shot,
            snapshot.pool_locks,
            snapshot
                .users
                .iter()
                .map(|u| (u.address.clone(), u.summary.clone(), u.shot, u.locks.clone())),
        );
        let rewards = RewardEngine::from_parts(
            snapshot.sections,
            snapshot
                .users
                .iter()
                .filter_map(|u| u.checkpoint.map(|c| (u.address.clone(), c))),
        );
        Ok(Self {
            params: snapshot.params,
            ledger,
            rewards,
            balance: snapshot.balance,
            registered: snapshot.registered,
            vault,
            registrar,
        })
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Rotations append to the section log, so an operation's block must not
    /// precede the active section's start. Checked before any state is
    /// touched: a rejected block leaves both ledger and vault untouched.
    fn ensure_in_order(&self, at: BlockNumber) -> Result<(), PoolError> {
        let start = self.rewards.log().active().start;
        if at < start {
            return Err(PoolError::OutOfOrderBlock {
                at: at.as_u64(),
                section_start: start.as_u64(),
            });
        }
        Ok(())
    }

    fn ensure_registered(&self) -> Result<(), PoolError> {
        if self.registered {
            Ok(())
        } else {
            Err(PoolError::NotRegistered)
        }
    }

    fn check_payment(&self, votes: u64, payment: Amount) -> Result<(), PoolError> {
        let required = self.params.to_currency(votes)?;
        if payment != required {
            return Err(PoolError::PaymentMismatch {
                required: required.raw(),
                provided: payment.raw(),
            });
        }
        Ok(())
    }

    /// Settle a user's unconsumed sections against their current shot.
    fn settle_user(&mut self, who: &Address) -> Result<Amount, PoolError> {
        let shot_available = self.ledger.user_shot(who).map_or(0, |s| s.available);
        self.rewards
            .settle(who, shot_available, self.params.fee_rate_bps)
    }

    fn refresh_shots(&mut self, who: &Address, at: BlockNumber) {
        self.ledger.refresh_user_shot(who, at);
        self.ledger.refresh_pool_shot(self.balance, at);
    }
}
