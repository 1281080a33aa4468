//! Vote ledger — per-user and pool-wide vote bookkeeping.
//!
//! Owns the withdrawal state machine. Every stake unit moves through
//! `available -> locked -> unlocked -> withdrawn`; no path skips a state and
//! a pending decrease cannot be cancelled.

pub mod ledger;
pub mod lock_queue;
pub mod shot;
pub mod summary;

pub use ledger::VoteLedger;
pub use lock_queue::{LockQueue, LockedTranche};
pub use shot::{PoolShot, UserShot};
pub use summary::{PoolSummary, UserSummary};
