//! Collaborator-boundary errors.

use thiserror::Error;

/// Errors reported by a staking vault or PoS registrar implementation.
///
/// The facade maps these into `PoolError::Registry` — the core never inspects
/// individual variants.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("insufficient staking balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("node is already registered")]
    DuplicateRegistration,

    #[error("no matured unlock to withdraw")]
    NothingUnlocked,

    #[error("{0}")]
    Other(String),
}
