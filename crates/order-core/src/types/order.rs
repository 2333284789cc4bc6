//! Order components and parameters.
//!
//! `OrderComponents` is what an offerer signs; its EIP-712 hash is a leaf of the
//! bulk order tree. `OrderParameters` is the shape a caller hands to the validator,
//! carrying `total_original_consideration_items` in place of the counter.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use super::item::{ConsiderationItem, OfferItem};
use crate::Error;

/// Fill and restriction mode of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// No partial fills, anyone can execute.
    #[default]
    FullOpen = 0,
    /// Partial fills supported, anyone can execute.
    PartialOpen = 1,
    /// No partial fills, only offerer or zone can execute.
    FullRestricted = 2,
    /// Partial fills supported, only offerer or zone can execute.
    PartialRestricted = 3,
    /// Contract order.
    Contract = 4,
}

impl OrderType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for OrderType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderType::FullOpen),
            1 => Ok(OrderType::PartialOpen),
            2 => Ok(OrderType::FullRestricted),
            3 => Ok(OrderType::PartialRestricted),
            4 => Ok(OrderType::Contract),
            other => Err(Error::InvalidOrderType(other)),
        }
    }
}

/// The signed form of an order.
///
/// `Default` yields the empty order whose hash pads bulk order trees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderComponents {
    pub offerer: Address,
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    pub order_type: OrderType,
    pub start_time: U256,
    pub end_time: U256,
    pub zone_hash: B256,
    pub salt: U256,
    pub conduit_key: B256,
    /// Offerer's cancellation counter at signing time.
    pub counter: U256,
}

impl OrderComponents {
    /// Convert into the parameters shape supplied alongside a bulk signature.
    pub fn to_parameters(&self) -> OrderParameters {
        OrderParameters {
            offerer: self.offerer,
            zone: self.zone,
            offer: self.offer.clone(),
            consideration: self.consideration.clone(),
            order_type: self.order_type,
            start_time: self.start_time,
            end_time: self.end_time,
            zone_hash: self.zone_hash,
            salt: self.salt,
            conduit_key: self.conduit_key,
            total_original_consideration_items: U256::from(self.consideration.len()),
        }
    }

    /// Whether this is the empty filler order.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Order parameters as presented for fulfillment or validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParameters {
    pub offerer: Address,
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    pub order_type: OrderType,
    pub start_time: U256,
    pub end_time: U256,
    pub zone_hash: B256,
    pub salt: U256,
    pub conduit_key: B256,
    pub total_original_consideration_items: U256,
}

impl OrderParameters {
    /// Rebuild the signed components using an externally supplied counter.
    pub fn to_components(&self, counter: U256) -> OrderComponents {
        OrderComponents {
            offerer: self.offerer,
            zone: self.zone,
            offer: self.offer.clone(),
            consideration: self.consideration.clone(),
            order_type: self.order_type,
            start_time: self.start_time,
            end_time: self.end_time,
            zone_hash: self.zone_hash,
            salt: self.salt,
            conduit_key: self.conduit_key,
            counter,
        }
    }
}
