//! ECDSA signer recovery over a prehashed digest.
//!
//! Accepts 65-byte `r ‖ s ‖ v` signatures (v in {0, 1, 27, 28}) and 64-byte
//! EIP-2098 compact signatures. Anything that does not recover to a non-zero
//! address is a recovery failure, never a panic.

use alloy_primitives::{Address, Signature, B256, U256};
use order_core::signing::packing::{COMPACT_SIGNATURE_LENGTH, FULL_SIGNATURE_LENGTH};
use order_core::{Error, Result};

/// Recover the address that produced `signature` over `digest`.
pub fn recover_signer(digest: B256, signature: &[u8]) -> Result<Address> {
    let parsed = parse_signature(signature)?;

    let recovered = parsed
        .recover_address_from_prehash(&digest)
        .map_err(|e| Error::RecoveryFailure {
            message: e.to_string(),
        })?;

    if recovered == Address::ZERO {
        return Err(Error::RecoveryFailure {
            message: "signature recovers to the zero address".to_string(),
        });
    }

    Ok(recovered)
}

fn parse_signature(signature: &[u8]) -> Result<Signature> {
    match signature.len() {
        COMPACT_SIGNATURE_LENGTH => Ok(Signature::from_erc2098(signature)),
        FULL_SIGNATURE_LENGTH => {
            let r = U256::from_be_slice(&signature[0..32]);
            let s = U256::from_be_slice(&signature[32..64]);
            let y_parity = match signature[64] {
                0 | 27 => false,
                1 | 28 => true,
                v => {
                    return Err(Error::RecoveryFailure {
                        message: format!("unsupported recovery id {v}"),
                    })
                }
            };
            Ok(Signature::new(r, s, y_parity))
        }
        length => Err(Error::RecoveryFailure {
            message: format!("unsupported signature length {length}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use std::str::FromStr;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn signed_digest() -> (PrivateKeySigner, B256, Signature) {
        let signer = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
        let digest = keccak256(b"bulk order root");
        let signature = signer.sign_hash_sync(&digest).unwrap();
        (signer, digest, signature)
    }

    #[test]
    fn test_recover_full_signature() {
        let (signer, digest, signature) = signed_digest();
        let recovered = recover_signer(digest, &signature.as_bytes()).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_recover_with_raw_parity_byte() {
        let (signer, digest, signature) = signed_digest();
        let mut bytes = signature.as_bytes();
        bytes[64] -= 27;
        assert_eq!(recover_signer(digest, &bytes).unwrap(), signer.address());
    }

    #[test]
    fn test_recover_compact_signature() {
        let (signer, digest, signature) = signed_digest();
        let recovered = recover_signer(digest, &signature.as_erc2098()).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_wrong_digest_recovers_someone_else() {
        let (signer, _, signature) = signed_digest();
        let other = keccak256(b"different root");
        match recover_signer(other, &signature.as_bytes()) {
            Ok(recovered) => assert_ne!(recovered, signer.address()),
            Err(e) => assert!(matches!(e, Error::RecoveryFailure { .. })),
        }
    }

    #[test]
    fn test_invalid_shapes_fail_without_panicking() {
        let digest = keccak256(b"x");
        assert!(matches!(
            recover_signer(digest, &[0u8; 10]),
            Err(Error::RecoveryFailure { .. })
        ));
        assert!(matches!(
            recover_signer(digest, &[0u8; 65]),
            Err(Error::RecoveryFailure { .. })
        ));

        let mut bad_v = [1u8; 65];
        bad_v[64] = 29;
        assert!(matches!(
            recover_signer(digest, &bad_v),
            Err(Error::RecoveryFailure { .. })
        ));
    }
}
