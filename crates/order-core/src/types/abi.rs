//! Solidity ABI mirrors of the order model.
//!
//! Used to decode bulk signature envelopes and to cross-check the hand-rolled
//! EIP-712 hashing against `alloy-sol-types`' derived struct hashing.

use alloy_sol_types::sol;

use super::{item, order};
use crate::{Error, Result};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct OfferItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ConsiderationItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
        address recipient;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OrderComponents {
        address offerer;
        address zone;
        OfferItem[] offer;
        ConsiderationItem[] consideration;
        uint8 orderType;
        uint256 startTime;
        uint256 endTime;
        bytes32 zoneHash;
        uint256 salt;
        bytes32 conduitKey;
        uint256 counter;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OrderParameters {
        address offerer;
        address zone;
        OfferItem[] offer;
        ConsiderationItem[] consideration;
        uint8 orderType;
        uint256 startTime;
        uint256 endTime;
        bytes32 zoneHash;
        uint256 salt;
        bytes32 conduitKey;
        uint256 totalOriginalConsiderationItems;
    }
}

impl From<&item::OfferItem> for OfferItem {
    fn from(item: &item::OfferItem) -> Self {
        Self {
            itemType: item.item_type.as_u8(),
            token: item.token,
            identifierOrCriteria: item.identifier_or_criteria,
            startAmount: item.start_amount,
            endAmount: item.end_amount,
        }
    }
}

impl TryFrom<OfferItem> for item::OfferItem {
    type Error = Error;

    fn try_from(item: OfferItem) -> Result<Self> {
        Ok(Self {
            item_type: item::ItemType::try_from(item.itemType)?,
            token: item.token,
            identifier_or_criteria: item.identifierOrCriteria,
            start_amount: item.startAmount,
            end_amount: item.endAmount,
        })
    }
}

impl From<&item::ConsiderationItem> for ConsiderationItem {
    fn from(item: &item::ConsiderationItem) -> Self {
        Self {
            itemType: item.item_type.as_u8(),
            token: item.token,
            identifierOrCriteria: item.identifier_or_criteria,
            startAmount: item.start_amount,
            endAmount: item.end_amount,
            recipient: item.recipient,
        }
    }
}

impl TryFrom<ConsiderationItem> for item::ConsiderationItem {
    type Error = Error;

    fn try_from(item: ConsiderationItem) -> Result<Self> {
        Ok(Self {
            item_type: item::ItemType::try_from(item.itemType)?,
            token: item.token,
            identifier_or_criteria: item.identifierOrCriteria,
            start_amount: item.startAmount,
            end_amount: item.endAmount,
            recipient: item.recipient,
        })
    }
}

impl From<&order::OrderComponents> for OrderComponents {
    fn from(order: &order::OrderComponents) -> Self {
        Self {
            offerer: order.offerer,
            zone: order.zone,
            offer: order.offer.iter().map(OfferItem::from).collect(),
            consideration: order.consideration.iter().map(ConsiderationItem::from).collect(),
            orderType: order.order_type.as_u8(),
            startTime: order.start_time,
            endTime: order.end_time,
            zoneHash: order.zone_hash,
            salt: order.salt,
            conduitKey: order.conduit_key,
            counter: order.counter,
        }
    }
}

impl From<&order::OrderParameters> for OrderParameters {
    fn from(params: &order::OrderParameters) -> Self {
        Self {
            offerer: params.offerer,
            zone: params.zone,
            offer: params.offer.iter().map(OfferItem::from).collect(),
            consideration: params.consideration.iter().map(ConsiderationItem::from).collect(),
            orderType: params.order_type.as_u8(),
            startTime: params.start_time,
            endTime: params.end_time,
            zoneHash: params.zone_hash,
            salt: params.salt,
            conduitKey: params.conduit_key,
            totalOriginalConsiderationItems: params.total_original_consideration_items,
        }
    }
}

impl TryFrom<OrderParameters> for order::OrderParameters {
    type Error = Error;

    fn try_from(params: OrderParameters) -> Result<Self> {
        Ok(Self {
            offerer: params.offerer,
            zone: params.zone,
            offer: params
                .offer
                .into_iter()
                .map(item::OfferItem::try_from)
                .collect::<Result<Vec<_>>>()?,
            consideration: params
                .consideration
                .into_iter()
                .map(item::ConsiderationItem::try_from)
                .collect::<Result<Vec<_>>>()?,
            order_type: order::OrderType::try_from(params.orderType)?,
            start_time: params.startTime,
            end_time: params.endTime,
            zone_hash: params.zoneHash,
            salt: params.salt,
            conduit_key: params.conduitKey,
            total_original_consideration_items: params.totalOriginalConsiderationItems,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    #[test]
    fn test_parameters_conversion_round_trip() {
        let params = order::OrderParameters {
            offerer: Address::repeat_byte(0x01),
            offer: vec![item::OfferItem::erc20(Address::repeat_byte(0x02), U256::from(5u64))],
            consideration: vec![item::ConsiderationItem::native(
                U256::from(9u64),
                Address::repeat_byte(0x01),
            )],
            order_type: order::OrderType::PartialOpen,
            total_original_consideration_items: U256::from(1u64),
            ..Default::default()
        };

        let abi_params = OrderParameters::from(&params);
        assert_eq!(abi_params.orderType, 1);
        assert_eq!(order::OrderParameters::try_from(abi_params).unwrap(), params);
    }

    #[test]
    fn test_invalid_enum_tag_rejected() {
        let mut abi_params = OrderParameters::from(&order::OrderParameters::default());
        abi_params.orderType = 7;
        assert!(matches!(
            order::OrderParameters::try_from(abi_params),
            Err(Error::InvalidOrderType(7))
        ));
    }
}
