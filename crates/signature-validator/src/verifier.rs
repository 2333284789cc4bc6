//! `isValidSignature`-style verification of plain and bulk order signatures.
//!
//! Signatures longer than 65 bytes are bulk signature envelopes; everything else
//! is a plain signature over `message`. Structural problems with an envelope are
//! returned as errors. A digest mismatch, a failed recovery or an unauthorized
//! signer yields [`INVALID_SIGNATURE`].

use alloy_primitives::{Address, B256};
use order_core::config::Config;
use order_core::signing::{
    bulk_order_struct_hash, recompute_root, typed_data_hash, Eip712Domain, OrderHasher,
    PackedBulkSignature,
};
use order_core::{Error, Result};
use tracing::{debug, warn};

use crate::envelope::BulkSignatureEnvelope;
use crate::policy::{AllowList, AuthorizationPolicy};
use crate::recover::recover_signer;

/// Returned for an accepted signature: `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`.
pub const MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// Returned for any rejected signature.
pub const INVALID_SIGNATURE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Longest signature treated as a plain `r ‖ s ‖ v` signature.
pub const PLAIN_SIGNATURE_MAX_LENGTH: usize = 65;

/// Signature shape, decided by length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind<'a> {
    /// A signature directly over the message.
    Plain(&'a [u8]),
    /// An ABI-encoded [`BulkSignatureEnvelope`].
    Bulk(&'a [u8]),
}

impl<'a> SignatureKind<'a> {
    pub fn classify(signature: &'a [u8]) -> Self {
        if signature.len() > PLAIN_SIGNATURE_MAX_LENGTH {
            SignatureKind::Bulk(signature)
        } else {
            SignatureKind::Plain(signature)
        }
    }
}

/// Environment of the verifying contract: its own address and chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierContext {
    domain: Eip712Domain,
}

impl VerifierContext {
    /// Context for the protocol domain at `contract_address` on `chain_id`.
    pub fn new(chain_id: u64, contract_address: Address) -> Self {
        Self {
            domain: Eip712Domain::seaport(chain_id, contract_address),
        }
    }

    pub fn with_domain(domain: Eip712Domain) -> Self {
        Self { domain }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_domain(Eip712Domain::from_config(&config.domain))
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Domain separator, recomputed on each call.
    pub fn domain_separator(&self) -> B256 {
        self.domain.separator()
    }

    /// Final digest of a single order, i.e. the message a bulk envelope must match.
    pub fn order_digest(&self, order_hash: B256) -> B256 {
        typed_data_hash(self.domain_separator(), order_hash)
    }
}

/// Validates plain and bulk signatures against an authorization policy.
pub struct BulkSignatureVerifier<P> {
    context: VerifierContext,
    policy: P,
}

impl BulkSignatureVerifier<AllowList> {
    /// Verifier over the configured domain, accepting the configured signers.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            VerifierContext::from_config(config),
            AllowList::from_config(&config.validator),
        )
    }
}

impl<P: AuthorizationPolicy> BulkSignatureVerifier<P> {
    pub fn new(context: VerifierContext, policy: P) -> Self {
        Self { context, policy }
    }

    pub fn context(&self) -> &VerifierContext {
        &self.context
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Validate `signature` over `message`.
    ///
    /// Returns [`MAGIC_VALUE`] when the recovered signer is authorized and
    /// [`INVALID_SIGNATURE`] otherwise. Errors are reserved for envelopes that
    /// cannot be decoded or whose proof is malformed.
    pub fn is_valid_signature(&self, message: B256, signature: &[u8]) -> Result<[u8; 4]> {
        match SignatureKind::classify(signature) {
            SignatureKind::Plain(signature) => {
                debug!(message = %message, length = signature.len(), "Validating plain signature");
                Ok(self.authorize(message, signature))
            }
            SignatureKind::Bulk(data) => {
                debug!(message = %message, length = data.len(), "Validating bulk signature");
                let envelope = BulkSignatureEnvelope::decode(data)?;
                match self.bulk_target(message, &envelope) {
                    Ok((digest, packed)) => Ok(self.authorize(digest, packed.signature.as_bytes())),
                    Err(e) if e.is_structural() => Err(e),
                    Err(e) => {
                        warn!(error = %e, "Bulk signature rejected");
                        Ok(INVALID_SIGNATURE)
                    }
                }
            }
        }
    }

    /// Whether `signature` is accepted for `message`.
    pub fn is_valid(&self, message: B256, signature: &[u8]) -> Result<bool> {
        Ok(self.is_valid_signature(message, signature)? == MAGIC_VALUE)
    }

    /// Digest the base signature of a bulk order must have been made over.
    pub fn bulk_order_digest(&self, order_hash: B256, packed: &PackedBulkSignature) -> Result<B256> {
        let root = recompute_root(order_hash, packed.index, &packed.proof)?;
        let struct_hash = bulk_order_struct_hash(packed.height(), root)?;
        Ok(typed_data_hash(self.context.domain_separator(), struct_hash))
    }

    /// Recover the signer of a bulk order signature for a known order hash.
    pub fn recover_bulk_signer(&self, order_hash: B256, packed: &PackedBulkSignature) -> Result<Address> {
        let digest = self.bulk_order_digest(order_hash, packed)?;
        recover_signer(digest, packed.signature.as_bytes())
    }

    /// Check the envelope's order against `message`, then derive the digest to recover from.
    fn bulk_target(
        &self,
        message: B256,
        envelope: &BulkSignatureEnvelope,
    ) -> Result<(B256, PackedBulkSignature)> {
        let order_hash = OrderHasher::hash_from_parameters(&envelope.parameters, envelope.counter);

        let computed = self.context.order_digest(order_hash);
        if computed != message {
            return Err(Error::OrderHashMismatch {
                computed,
                expected: message,
            });
        }

        let packed = envelope.unpack_signature()?;
        let digest = self.bulk_order_digest(order_hash, &packed)?;

        debug!(
            order_hash = %order_hash,
            index = packed.index,
            height = packed.height(),
            "Recomputed bulk order digest"
        );

        Ok((digest, packed))
    }

    fn authorize(&self, digest: B256, signature: &[u8]) -> [u8; 4] {
        let signer = match recover_signer(digest, signature) {
            Ok(signer) => signer,
            Err(e) => {
                debug!(error = %e, "Signature rejected");
                return INVALID_SIGNATURE;
            }
        };

        if self.policy.is_authorized_signer(signer) {
            debug!(signer = %signer, "Signature accepted");
            MAGIC_VALUE
        } else {
            warn!(signer = %signer, "Signer not authorized");
            INVALID_SIGNATURE
        }
    }
}

impl<P> std::fmt::Debug for BulkSignatureVerifier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkSignatureVerifier")
            .field("context", &self.context)
            .finish()
    }
}
