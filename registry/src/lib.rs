//! External collaborator interfaces for the delegation pool.
//!
//! The pool core never locks native value itself and never verifies a
//! validator proof — both jobs belong to the host chain. This crate pins the
//! two contracts the core consumes ([`StakingVault`] and [`PosRegistrar`])
//! and ships deterministic in-memory doubles for testing.

pub mod error;
pub mod mock;
pub mod registrar;
pub mod vault;

pub use error::RegistryError;
pub use mock::{MockPosRegistrar, MockStakingVault};
pub use registrar::PosRegistrar;
pub use vault::StakingVault;
