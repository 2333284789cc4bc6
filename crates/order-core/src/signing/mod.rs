//! Signing module for bulk orders.
//!
//! This module provides EIP-712 hashing of orders, the bulk order Merkle tree,
//! per-height bulk typehashes and the packed signature format.
//!
//! # Architecture
//!
//! ```text
//! OrderComponents ── OrderHasher ──► leaf
//!                                      │
//!                                      ▼
//!                               BulkOrderTree ──► root, proofs
//!                                      │
//!       bulk_order_typehash(height) ───┤
//!                                      ▼
//!                      Eip712Domain::typed_data_hash ──► digest ──► ECDSA
//!                                                                    │
//!                     PackedBulkSignature (sig ‖ index ‖ proof) ◄────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use order_core::signing::{BulkOrderSigner, Eip712Domain, SignatureFormat};
//! use alloy_signer_local::PrivateKeySigner;
//!
//! let signer = BulkOrderSigner::new(
//!     PrivateKeySigner::from_str("0x...")?,
//!     Eip712Domain::seaport(1, seaport_address),
//! );
//!
//! let signed = signer.sign_bulk(&orders, SignatureFormat::Full).await?;
//! // signed.signatures[i] authenticates orders[i] on its own.
//! ```

pub mod domain;
pub mod merkle;
pub mod order_hash;
pub mod packing;
pub mod signer;
pub mod typehash;

pub use domain::{
    typed_data_hash, Eip712Domain, MAINNET_CHAIN_ID, SEAPORT_ADDRESS, SEAPORT_NAME,
    SEAPORT_VERSION,
};
pub use merkle::{
    pair_hash, recompute_root, recompute_root_with, tree_height, BulkOrderTree, MerkleProof,
    PairOrdering, MAX_LEAVES,
};
pub use order_hash::OrderHasher;
pub use packing::{pack, unpack, BaseSignature, PackedBulkSignature};
pub use signer::{BulkOrderSigner, SignatureFormat, SignedBulkOrder};
pub use typehash::{
    bulk_order_struct_hash, bulk_order_type_string, bulk_order_typehash, MAX_TREE_HEIGHT,
    MIN_TREE_HEIGHT, ORDER_TYPEHASH,
};
