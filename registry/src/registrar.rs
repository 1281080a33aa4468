//! The PoS registrar — validator identity registration.

use crate::error::RegistryError;
use pospool_types::{NodeId, ValidatorKeys};

/// Interface to the validator registration collaborator.
///
/// Called exactly once at pool setup. Proof verification happens inside the
/// implementation; the core only consumes the result.
pub trait PosRegistrar {
    fn register(
        &mut self,
        identifier: NodeId,
        vote_power: u64,
        keys: &ValidatorKeys,
    ) -> Result<(), RegistryError>;
}
