//! The staking vault — the host-chain registry that holds the pool's stake.

use crate::error::RegistryError;
use pospool_types::{Amount, BlockNumber};

/// Interface to the underlying staking registry.
///
/// The vault holds the pool's aggregated principal. The core calls it only
/// AFTER all local ledger state has been committed, so a reentrant call
/// always observes a consistent ledger.
pub trait StakingVault {
    /// Deposit newly staked currency into the pool's position.
    fn deposit(&mut self, amount: Amount) -> Result<(), RegistryError>;

    /// Schedule an unlock of part of the position, effective at `unlock_at`.
    fn request_unlock(&mut self, amount: Amount, unlock_at: BlockNumber)
        -> Result<(), RegistryError>;

    /// Release a matured unlock back to the pool, returning the amount paid.
    fn withdraw(&mut self, amount: Amount) -> Result<Amount, RegistryError>;

    /// The pool's current staked balance as reported by the registry.
    fn staking_balance(&self) -> Amount;
}
