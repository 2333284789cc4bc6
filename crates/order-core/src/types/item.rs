//! Offer and consideration line items.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Asset class of a line item, including criteria-based variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Native chain currency (e.g. ether).
    #[default]
    Native = 0,
    Erc20 = 1,
    Erc721 = 2,
    Erc1155 = 3,
    /// ERC-721 item where `identifier_or_criteria` is a Merkle root of token ids.
    Erc721WithCriteria = 4,
    /// ERC-1155 item where `identifier_or_criteria` is a Merkle root of token ids.
    Erc1155WithCriteria = 5,
}

impl ItemType {
    /// Get the numeric value used in hashing and ABI encoding.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Whether the identifier field carries a criteria root instead of a token id.
    pub fn is_criteria_based(&self) -> bool {
        matches!(self, ItemType::Erc721WithCriteria | ItemType::Erc1155WithCriteria)
    }
}

impl TryFrom<u8> for ItemType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ItemType::Native),
            1 => Ok(ItemType::Erc20),
            2 => Ok(ItemType::Erc721),
            3 => Ok(ItemType::Erc1155),
            4 => Ok(ItemType::Erc721WithCriteria),
            5 => Ok(ItemType::Erc1155WithCriteria),
            other => Err(Error::InvalidItemType(other)),
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Native => write!(f, "NATIVE"),
            ItemType::Erc20 => write!(f, "ERC20"),
            ItemType::Erc721 => write!(f, "ERC721"),
            ItemType::Erc1155 => write!(f, "ERC1155"),
            ItemType::Erc721WithCriteria => write!(f, "ERC721_WITH_CRITERIA"),
            ItemType::Erc1155WithCriteria => write!(f, "ERC1155_WITH_CRITERIA"),
        }
    }
}

/// An item the offerer gives up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
    pub item_type: ItemType,
    pub token: Address,
    pub identifier_or_criteria: U256,
    pub start_amount: U256,
    pub end_amount: U256,
}

impl OfferItem {
    /// Offer of a fixed amount of an ERC-20 token.
    pub fn erc20(token: Address, amount: U256) -> Self {
        Self {
            item_type: ItemType::Erc20,
            token,
            identifier_or_criteria: U256::ZERO,
            start_amount: amount,
            end_amount: amount,
        }
    }

    /// Offer of a single ERC-721 token.
    pub fn erc721(token: Address, identifier: U256) -> Self {
        Self {
            item_type: ItemType::Erc721,
            token,
            identifier_or_criteria: identifier,
            start_amount: U256::from(1u64),
            end_amount: U256::from(1u64),
        }
    }
}

/// An item the offerer expects to be paid to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsiderationItem {
    pub item_type: ItemType,
    pub token: Address,
    pub identifier_or_criteria: U256,
    pub start_amount: U256,
    pub end_amount: U256,
    pub recipient: Address,
}

impl ConsiderationItem {
    /// Fixed payment in the native currency.
    pub fn native(amount: U256, recipient: Address) -> Self {
        Self {
            item_type: ItemType::Native,
            token: Address::ZERO,
            identifier_or_criteria: U256::ZERO,
            start_amount: amount,
            end_amount: amount,
            recipient,
        }
    }

    /// Fixed payment in an ERC-20 token.
    pub fn erc20(token: Address, amount: U256, recipient: Address) -> Self {
        Self {
            item_type: ItemType::Erc20,
            token,
            identifier_or_criteria: U256::ZERO,
            start_amount: amount,
            end_amount: amount,
            recipient,
        }
    }
}
