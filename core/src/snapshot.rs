//! Pool snapshots — capture the full accounting state at a block.
//!
//! A snapshot lets the host persist and restore the pool without binding the
//! core to a storage engine. The hash is computed deterministically from the
//! accounting state (users sorted by address) so a restored snapshot can be
//! verified against tampering.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use pospool_ledger::{LockQueue, PoolShot, PoolSummary, UserShot, UserSummary};
use pospool_rewards::{SectionLog, UserCheckpoint};
use pospool_types::{Address, Amount, BlockNumber, PoolError, PoolParams};

/// The state of a single participant captured in a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserEntry {
    pub address: Address,
    pub summary: UserSummary,
    pub shot: Option<UserShot>,
    pub locks: LockQueue,
    pub checkpoint: Option<UserCheckpoint>,
}

/// A full pool snapshot with integrity hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Blake2b-256 of the serialized accounting state.
    pub hash: [u8; 32],
    /// Snapshot version for compatibility.
    pub version: u32,
    /// Block at which the snapshot was taken.
    pub at: BlockNumber,
    pub params: PoolParams,
    pub registered: bool,
    pub balance: Amount,
    pub pool: PoolSummary,
    pub pool_shot: PoolShot,
    pub pool_locks: LockQueue,
    /// Participants, sorted by address for deterministic hashing.
    pub users: Vec<UserEntry>,
    pub sections: SectionLog,
}

impl PoolSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    #[allow(clippy::too_many_arguments)]
    pub fn create(
        at: BlockNumber,
        params: PoolParams,
        registered: bool,
        balance: Amount,
        pool: PoolSummary,
        pool_shot: PoolShot,
        pool_locks: LockQueue,
        users: Vec<UserEntry>,
        sections: SectionLog,
    ) -> Self {
        let mut snap = Self {
            hash: [0u8; 32],
            version: Self::CURRENT_VERSION,
            at,
            params,
            registered,
            balance,
            pool,
            pool_shot,
            pool_locks,
            users,
            sections,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Compute the Blake2b-256 hash of the accounting state.
    fn compute_hash(&self) -> [u8; 32] {
        let payload = (
            &self.version,
            &self.at,
            &self.params,
            &self.registered,
            &self.balance,
            &self.pool,
            &self.pool_shot,
            &self.pool_locks,
            &self.users,
            &self.sections,
        );
        let bytes = bincode::serialize(&payload).expect("snapshot state serializes");

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the state.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, PoolError> {
        bincode::serialize(self).map_err(|e| PoolError::Serialization(e.to_string()))
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PoolError> {
        bincode::deserialize(bytes).map_err(|e| PoolError::Serialization(e.to_string()))
    }
}
