//! Packed bulk signature wire format.
//!
//! Layout, with no length prefixes:
//! - base signature: 64 bytes (`r ‖ yParityAndS`) or 65 bytes (`r ‖ s ‖ v`)
//! - leaf index: 3 bytes, big-endian
//! - proof: `height` × 32-byte sibling hashes, leaf level first
//!
//! The base signature length is recovered from the total length: after removing
//! the index, a compact signature leaves a multiple of 32 and a full one leaves
//! a multiple of 32 plus one.

use alloy_primitives::{Bytes, B256};

use super::merkle::{MerkleProof, MAX_LEAVES};
use super::typehash::{MAX_TREE_HEIGHT, MIN_TREE_HEIGHT};
use crate::{Error, Result};

/// Width of the encoded leaf index.
pub const INDEX_LENGTH: usize = 3;

/// Length of a compact (EIP-2098) signature.
pub const COMPACT_SIGNATURE_LENGTH: usize = 64;

/// Length of a full `r ‖ s ‖ v` signature.
pub const FULL_SIGNATURE_LENGTH: usize = 65;

/// The ECDSA signature over a bulk order digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSignature {
    /// `r ‖ s` with the y-parity folded into the top bit of `s`.
    Compact([u8; COMPACT_SIGNATURE_LENGTH]),
    /// `r ‖ s ‖ v`.
    Full([u8; FULL_SIGNATURE_LENGTH]),
}

impl BaseSignature {
    /// Wrap 64 or 65 raw signature bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            COMPACT_SIGNATURE_LENGTH => {
                let mut sig = [0u8; COMPACT_SIGNATURE_LENGTH];
                sig.copy_from_slice(bytes);
                Some(BaseSignature::Compact(sig))
            }
            FULL_SIGNATURE_LENGTH => {
                let mut sig = [0u8; FULL_SIGNATURE_LENGTH];
                sig.copy_from_slice(bytes);
                Some(BaseSignature::Full(sig))
            }
            _ => None,
        }
    }

    /// Raw signature bytes as they appear at the front of a packed signature.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            BaseSignature::Compact(sig) => sig,
            BaseSignature::Full(sig) => sig,
        }
    }

    /// Encoded width: 64 bytes when compact, 65 otherwise.
    pub fn encoded_len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the y-parity is folded into `s` (EIP-2098).
    pub fn is_compact(&self) -> bool {
        matches!(self, BaseSignature::Compact(_))
    }
}

/// A base signature together with the Merkle proof of one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBulkSignature {
    pub signature: BaseSignature,
    pub index: u32,
    pub proof: Vec<B256>,
}

impl PackedBulkSignature {
    pub fn new(signature: BaseSignature, proof: MerkleProof) -> Self {
        Self {
            signature,
            index: proof.index,
            proof: proof.siblings,
        }
    }

    /// Tree height implied by the proof length.
    pub fn height(&self) -> usize {
        self.proof.len()
    }

    /// Encode into the packed wire format.
    pub fn pack(&self) -> Result<Bytes> {
        pack(&self.signature, self.index, &self.proof)
    }

    /// Decode from the packed wire format.
    pub fn unpack(blob: &[u8]) -> Result<Self> {
        unpack(blob)
    }
}

/// `signature ‖ be24(index) ‖ proof[0] ‖ … ‖ proof[n-1]`.
pub fn pack(signature: &BaseSignature, index: u32, proof: &[B256]) -> Result<Bytes> {
    if index as usize >= MAX_LEAVES {
        return Err(Error::LeafIndexOutOfRange {
            index: index as usize,
            leaves: MAX_LEAVES,
        });
    }
    check_height(proof.len())?;

    let mut buf = Vec::with_capacity(signature.encoded_len() + INDEX_LENGTH + 32 * proof.len());
    buf.extend_from_slice(signature.as_bytes());
    buf.extend_from_slice(&index.to_be_bytes()[1..]);
    for sibling in proof {
        buf.extend_from_slice(sibling.as_slice());
    }

    Ok(Bytes::from(buf))
}

/// Split a packed bulk signature into base signature, leaf index and proof.
pub fn unpack(blob: &[u8]) -> Result<PackedBulkSignature> {
    let length = blob.len();
    if length < COMPACT_SIGNATURE_LENGTH + INDEX_LENGTH {
        return Err(Error::MalformedProof { length });
    }

    let signature_length = match (length - INDEX_LENGTH) % 32 {
        0 => COMPACT_SIGNATURE_LENGTH,
        1 => FULL_SIGNATURE_LENGTH,
        _ => return Err(Error::MalformedProof { length }),
    };
    let proof_start = signature_length + INDEX_LENGTH;
    check_height((length - proof_start) / 32)?;

    let (signature_bytes, rest) = blob.split_at(signature_length);
    let signature =
        BaseSignature::from_slice(signature_bytes).ok_or(Error::MalformedProof { length })?;

    let (index_bytes, proof_bytes) = rest.split_at(INDEX_LENGTH);
    let index = u32::from_be_bytes([0, index_bytes[0], index_bytes[1], index_bytes[2]]);

    let proof = proof_bytes.chunks_exact(32).map(B256::from_slice).collect();

    Ok(PackedBulkSignature {
        signature,
        index,
        proof,
    })
}

fn check_height(height: usize) -> Result<()> {
    if !(MIN_TREE_HEIGHT..=MAX_TREE_HEIGHT).contains(&height) {
        return Err(Error::InvalidTreeHeight { height });
    }
    Ok(())
}
