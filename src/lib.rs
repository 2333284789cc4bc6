//! Seaport-style bulk order signatures.
//!
//! This is the root crate that provides benchmark and integration test access to
//! the workspace crates. For actual functionality, use the individual crates directly:
//!
//! - `order-core`: Order types, EIP-712 hashing, bulk order trees, packing and signing
//! - `signature-validator`: `isValidSignature`-style validation of plain and bulk signatures

pub use order_core as core;
pub use signature_validator as validator;
