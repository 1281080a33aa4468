//! The delegation pool facade.
//!
//! `PosPool` is an explicitly constructed context object — no ambient global
//! state. It owns the vote ledger, the reward engine, the undistributed
//! balance, and the two host-chain collaborators, and enforces the operation
//! ordering the accounting core depends on: validate, settle, mutate, rotate,
//! refresh shots, and only then call out.

pub mod config;
pub mod logging;
pub mod pool;
pub mod snapshot;

pub use config::PoolConfig;
pub use logging::{init_logging, LogFormat};
pub use pool::PosPool;
pub use snapshot::{PoolSnapshot, UserEntry};
