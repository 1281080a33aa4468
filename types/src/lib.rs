//! Fundamental types for the PoS delegation pool.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, amounts, block numbers, validator keys, pool
//! parameters, and the shared error type.

pub mod address;
pub mod amount;
pub mod block;
pub mod error;
pub mod keys;
pub mod params;

pub use address::Address;
pub use amount::{Amount, COIN};
pub use block::BlockNumber;
pub use error::PoolError;
pub use keys::{NodeId, ValidatorKeys};
pub use params::{PoolParams, RATIO_BASE};
