//! Signature Validation
//!
//! Plain and bulk order signature validation behind an `isValidSignature`-style
//! entry point, with pluggable signer authorization.

pub mod envelope;
pub mod policy;
pub mod recover;
pub mod verifier;

pub use envelope::BulkSignatureEnvelope;
pub use policy::{AllowList, AuthorizationPolicy, SingleOwner};
pub use recover::recover_signer;
pub use verifier::{
    BulkSignatureVerifier, SignatureKind, VerifierContext, INVALID_SIGNATURE, MAGIC_VALUE,
};
