//! Bulk signature envelope codec.
//!
//! A bulk signature reaches the validator ABI-encoded as
//! `(bytes packedBulkSignature, OrderParameters parameters, uint256 counter)`.
//! The caller supplies the parameters and counter; the validator never looks
//! them up itself.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;
use order_core::signing::PackedBulkSignature;
use order_core::types::{abi, OrderComponents, OrderParameters};
use order_core::{Error, Result};

type EnvelopeAbi = (Bytes, abi::OrderParameters, U256);

/// A packed bulk signature bundled with the order it claims to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSignatureEnvelope {
    /// `signature ‖ be24(index) ‖ proof`.
    pub packed_signature: Bytes,
    pub parameters: OrderParameters,
    /// The offerer's counter the order was signed with.
    pub counter: U256,
}

impl BulkSignatureEnvelope {
    pub fn new(packed_signature: Bytes, parameters: OrderParameters, counter: U256) -> Self {
        Self {
            packed_signature,
            parameters,
            counter,
        }
    }

    /// Envelope for a signed order, deriving parameters and counter from its components.
    pub fn for_order(packed_signature: Bytes, order: &OrderComponents) -> Self {
        Self::new(packed_signature, order.to_parameters(), order.counter)
    }

    /// ABI-encode the envelope as a parameter list.
    pub fn encode(&self) -> Bytes {
        let tuple: EnvelopeAbi = (
            self.packed_signature.clone(),
            abi::OrderParameters::from(&self.parameters),
            self.counter,
        );
        Bytes::from(tuple.abi_encode_params())
    }

    /// Decode an envelope from the bytes handed to the validator.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let (packed_signature, parameters, counter) = EnvelopeAbi::abi_decode_params(data)
            .map_err(|e| Error::MalformedEnvelope {
                message: e.to_string(),
            })?;

        let parameters = OrderParameters::try_from(parameters).map_err(|e| {
            Error::MalformedEnvelope {
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            packed_signature,
            parameters,
            counter,
        })
    }

    /// Split the packed signature into base signature, index and proof.
    pub fn unpack_signature(&self) -> Result<PackedBulkSignature> {
        PackedBulkSignature::unpack(&self.packed_signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use order_core::types::{ConsiderationItem, OfferItem};

    fn sample_order() -> OrderComponents {
        OrderComponents {
            offerer: Address::repeat_byte(0x01),
            offer: vec![OfferItem::erc721(Address::repeat_byte(0x02), U256::from(9u64))],
            consideration: vec![ConsiderationItem::native(
                U256::from(1_000u64),
                Address::repeat_byte(0x01),
            )],
            salt: U256::from(77u64),
            counter: U256::from(4u64),
            ..Default::default()
        }
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = BulkSignatureEnvelope::for_order(
            Bytes::from(vec![0xab; 132]),
            &sample_order(),
        );

        let encoded = envelope.encode();
        assert!(encoded.len() > 65);
        assert_eq!(BulkSignatureEnvelope::decode(&encoded).unwrap(), envelope);
    }

    #[test]
    fn test_envelope_carries_counter() {
        let envelope = BulkSignatureEnvelope::for_order(Bytes::new(), &sample_order());
        assert_eq!(envelope.counter, U256::from(4u64));
        assert_eq!(
            envelope.parameters.to_components(envelope.counter),
            sample_order()
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            BulkSignatureEnvelope::decode(&[0x01; 66]),
            Err(Error::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn test_unknown_enum_tag_is_malformed() {
        let mut params = abi::OrderParameters::from(&sample_order().to_parameters());
        params.orderType = 200;
        let tuple: EnvelopeAbi = (Bytes::new(), params, U256::ZERO);
        let encoded = tuple.abi_encode_params();

        assert!(matches!(
            BulkSignatureEnvelope::decode(&encoded),
            Err(Error::MalformedEnvelope { .. })
        ));
    }
}
