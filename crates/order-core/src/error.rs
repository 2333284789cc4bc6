//! Error types for bulk order hashing, packing and validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed proof: {length} bytes cannot be split into signature, index and proof")]
    MalformedProof { length: usize },

    #[error("Invalid tree height: {height} (expected 1..=24)")]
    InvalidTreeHeight { height: usize },

    #[error("Order hash mismatch: recomputed digest {computed} does not match message {expected}")]
    OrderHashMismatch {
        computed: alloy_primitives::B256,
        expected: alloy_primitives::B256,
    },

    #[error("Signer recovery failed: {message}")]
    RecoveryFailure { message: String },

    #[error("Leaf index {index} out of range for {leaves} leaves")]
    LeafIndexOutOfRange { index: usize, leaves: usize },

    #[error("Cannot build a bulk order tree without orders")]
    EmptyTree,

    #[error("Invalid item type: {0}")]
    InvalidItemType(u8),

    #[error("Invalid order type: {0}")]
    InvalidOrderType(u8),

    #[error("Malformed bulk signature envelope: {message}")]
    MalformedEnvelope { message: String },

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Structural errors mean the input could not be interpreted at all; any
    /// other failure during validation is a rejection of the signature.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MalformedProof { .. }
                | Error::InvalidTreeHeight { .. }
                | Error::MalformedEnvelope { .. }
                | Error::InvalidItemType(_)
                | Error::InvalidOrderType(_)
                | Error::LeafIndexOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
