//! Order Core Library
//!
//! Order model, EIP-712 hashing and the bulk order protocol: Merkle trees of
//! order hashes, per-height bulk typehashes and the packed proof signature format.

pub mod config;
pub mod error;
pub mod signing;
pub mod types;

pub use error::{Error, Result};
