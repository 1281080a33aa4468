//! Reward snapshot engine and interest distributor.
//!
//! Reward attribution never scans every user. The pool keeps one append-only
//! section log; each user stores only a cursor into it plus a claimable
//! bucket. Settlement replays the sections created since the user's last
//! checkpoint — O(sections since), not O(users).

pub mod apy;
pub mod engine;
pub mod section;

pub use apy::pool_apy;
pub use engine::{RewardEngine, UserCheckpoint};
pub use section::{RewardSection, SectionLog};
