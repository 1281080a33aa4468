//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the delegation pool.
///
/// Every variant is a local validation failure surfaced immediately to the
/// caller — nothing is retried internally and no partial mutation is ever
/// observed (operations validate before they touch any state).
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("amount {0} is not a whole multiple of the per-vote value")]
    InvalidAmount(u128),

    #[error("attached payment mismatch: required {required}, provided {provided}")]
    PaymentMismatch { required: u128, provided: u128 },

    #[error("insufficient available votes: need {needed}, have {available}")]
    InsufficientAvailable { needed: u64, available: u64 },

    #[error("insufficient unlocked votes: need {needed}, have {unlocked}")]
    InsufficientUnlocked { needed: u64, unlocked: u64 },

    #[error("pool is already registered")]
    AlreadyRegistered,

    #[error("not registered with the pool")]
    NotRegistered,

    #[error("pool policy is locked once any stake exists")]
    PolicyAlreadyLocked,

    #[error("no claimable interest")]
    NothingToClaim,

    #[error("pool balance {available} cannot cover payout of {needed}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("vote count must be non-zero")]
    ZeroVotes,

    #[error("arithmetic overflow in pool accounting")]
    Overflow,

    #[error("block {at} precedes the current section start {section_start}")]
    OutOfOrderBlock { at: u64, section_start: u64 },

    #[error("registry error: {0}")]
    Registry(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
