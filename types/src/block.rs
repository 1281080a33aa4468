//! Block number — the pool's notion of time.
//!
//! Lock deadlines and reward-section boundaries are expressed in block
//! numbers. The host chain supplies the current block on every call; there is
//! no ambient clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chain block number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockNumber(u64);

impl BlockNumber {
    /// The genesis block.
    pub const GENESIS: Self = Self(0);

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed since this block (relative to `now`).
    pub fn elapsed_since(&self, now: BlockNumber) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this block + duration has been reached relative to `now`.
    pub fn has_elapsed(&self, duration_blocks: u64, now: BlockNumber) -> bool {
        now.0 >= self.0.saturating_add(duration_blocks)
    }

    /// This block plus a duration, saturating at the maximum block.
    pub fn saturating_add(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_since_saturates() {
        let later = BlockNumber::new(100);
        let earlier = BlockNumber::new(50);
        assert_eq!(earlier.elapsed_since(later), 50);
        assert_eq!(later.elapsed_since(earlier), 0);
    }

    #[test]
    fn has_elapsed_boundary() {
        let start = BlockNumber::new(100);
        assert!(!start.has_elapsed(600, BlockNumber::new(699)));
        assert!(start.has_elapsed(600, BlockNumber::new(700)));
    }
}
