//! EIP-712 struct hashing of orders and their line items.
//!
//! Items are hashed first, each under its own typehash; the ordered item hashes
//! are then folded into one array hash per side before the order struct itself
//! is encoded.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use super::typehash::{CONSIDERATION_ITEM_TYPEHASH, OFFER_ITEM_TYPEHASH, ORDER_TYPEHASH};
use crate::types::{ConsiderationItem, OfferItem, OrderComponents, OrderParameters};

/// Computes order hashes, the leaves of bulk order trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderHasher;

impl OrderHasher {
    /// Struct hash of a single offer item.
    pub fn hash_offer_item(item: &OfferItem) -> B256 {
        let encoded = (
            OFFER_ITEM_TYPEHASH,
            U256::from(item.item_type.as_u8()),
            address_word(item.token),
            item.identifier_or_criteria,
            item.start_amount,
            item.end_amount,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }

    /// Struct hash of a single consideration item.
    pub fn hash_consideration_item(item: &ConsiderationItem) -> B256 {
        let encoded = (
            CONSIDERATION_ITEM_TYPEHASH,
            U256::from(item.item_type.as_u8()),
            address_word(item.token),
            item.identifier_or_criteria,
            item.start_amount,
            item.end_amount,
            address_word(item.recipient),
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }

    /// Order hash of signed order components.
    pub fn hash(components: &OrderComponents) -> B256 {
        let offer_hash = array_hash(components.offer.iter().map(Self::hash_offer_item));
        let consideration_hash = array_hash(
            components
                .consideration
                .iter()
                .map(Self::hash_consideration_item),
        );

        let encoded = (
            ORDER_TYPEHASH,
            address_word(components.offerer),
            address_word(components.zone),
            offer_hash,
            consideration_hash,
            U256::from(components.order_type.as_u8()),
            components.start_time,
            components.end_time,
            components.zone_hash,
            components.salt,
            components.conduit_key,
            components.counter,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }

    /// Order hash of parameters combined with the offerer's counter.
    ///
    /// Always equal to `hash(&parameters.to_components(counter))`.
    pub fn hash_from_parameters(parameters: &OrderParameters, counter: U256) -> B256 {
        Self::hash(&parameters.to_components(counter))
    }

    /// Hash of the empty order used to pad bulk order trees.
    pub fn empty_order_hash() -> B256 {
        Self::hash(&OrderComponents::default())
    }
}

/// EIP-712 array encoding: hash of the concatenated element hashes.
fn array_hash(element_hashes: impl Iterator<Item = B256>) -> B256 {
    let mut buf = Vec::new();
    for hash in element_hashes {
        buf.extend_from_slice(hash.as_slice());
    }
    keccak256(&buf)
}

fn address_word(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}
