//! Validator identity material forwarded to the PoS registrar.
//!
//! The pool never inspects these — proof verification happens inside the
//! registration collaborator. They are carried as opaque byte strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The pool's 32-byte PoS node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub [u8; 32]);

impl NodeId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// BLS/VRF key material for validator registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorKeys {
    /// BLS public key bytes.
    pub bls_pub_key: Vec<u8>,
    /// VRF public key bytes.
    pub vrf_pub_key: Vec<u8>,
    /// Two-element possession proof for the BLS key.
    pub bls_proof: [Vec<u8>; 2],
}

impl ValidatorKeys {
    pub fn new(bls_pub_key: Vec<u8>, vrf_pub_key: Vec<u8>, bls_proof: [Vec<u8>; 2]) -> Self {
        Self {
            bls_pub_key,
            vrf_pub_key,
            bls_proof,
        }
    }
}

impl fmt::Display for ValidatorKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bls=0x{} vrf=0x{}",
            hex::encode(&self.bls_pub_key),
            hex::encode(&self.vrf_pub_key)
        )
    }
}
