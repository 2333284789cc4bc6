//! EIP-712 typehashes for orders and bulk orders.
//!
//! A bulk order signs `BulkOrder(OrderComponents[2]...[2] tree)` where the array
//! nesting depth equals the tree height, so every height has its own typehash.

use alloy_primitives::{b256, keccak256, B256};

use crate::{Error, Result};

/// Largest supported bulk order tree height (2^24 leaves).
pub const MAX_TREE_HEIGHT: usize = 24;

/// Smallest bulk order tree height; a single order still pairs with one filler leaf.
pub const MIN_TREE_HEIGHT: usize = 1;

pub const OFFER_ITEM_TYPE: &str = "OfferItem(uint8 itemType,address token,uint256 identifierOrCriteria,uint256 startAmount,uint256 endAmount)";

pub const CONSIDERATION_ITEM_TYPE: &str = "ConsiderationItem(uint8 itemType,address token,uint256 identifierOrCriteria,uint256 startAmount,uint256 endAmount,address recipient)";

pub const ORDER_COMPONENTS_TYPE: &str = "OrderComponents(address offerer,address zone,OfferItem[] offer,ConsiderationItem[] consideration,uint8 orderType,uint256 startTime,uint256 endTime,bytes32 zoneHash,uint256 salt,bytes32 conduitKey,uint256 counter)";

/// keccak256(OFFER_ITEM_TYPE)
pub const OFFER_ITEM_TYPEHASH: B256 =
    b256!("a66999307ad1bb4fde44d13a5d710bd7718e0c87c1eef68a571629fbf5b93d02");

/// keccak256(CONSIDERATION_ITEM_TYPE)
pub const CONSIDERATION_ITEM_TYPEHASH: B256 =
    b256!("42d81c6929ffdc4eb27a0808e40e82516ad42296c166065de7f812492304ff6e");

/// keccak256(ORDER_COMPONENTS_TYPE ‖ CONSIDERATION_ITEM_TYPE ‖ OFFER_ITEM_TYPE)
pub const ORDER_TYPEHASH: B256 =
    b256!("fa445660b7e21515a59617fcd68910b487aa5808b8abda3d78bc85df364b2c2f");

/// Bulk order typehashes indexed by `height - 1`.
static BULK_ORDER_TYPEHASHES: [B256; MAX_TREE_HEIGHT] = [
    b256!("3ca2711d29384747a8f61d60aad3c450405f7aaff5613541dee28df2d6986d32"), // 1
    b256!("bf8e29b89f29ed9b529c154a63038ffca562f8d7cd1e2545dda53a1b582dde30"), // 2
    b256!("53c6f6856e13104584dd0797ca2b2779202dc2597c6066a42e0d8fe990b0024d"), // 3
    b256!("a02eb7ff164c884e5e2c336dc85f81c6a93329d8e9adf214b32729b894de2af1"), // 4
    b256!("39c9d33c18e050dda0aeb9a8086fb16fc12d5d64536780e1da7405a800b0b9f6"), // 5
    b256!("1c19f71958cdd8f081b4c31f7caf5c010b29d12950be2fa1c95070dc47e30b55"), // 6
    b256!("ca74fab2fece9a1d58234a274220ad05ca096a92ef6a1ca1750b9d90c948955c"), // 7
    b256!("7ff98d9d4e55d876c5cfac10b43c04039522f3ddfb0ea9bfe70c68cfb5c7cc14"), // 8
    b256!("bed7be92d41c56f9e59ac7a6272185299b815ddfabc3f25deb51fe55fe2f9e8a"), // 9
    b256!("d1d97d1ef5eaa37a4ee5fbf234e6f6d64eb511eb562221cd7edfbdde0848da05"), // 10
    b256!("896c3f349c4da741c19b37fec49ed2e44d738e775a21d9c9860a69d67a3dae53"), // 11
    b256!("bb98d87cc12922b83759626c5f07d72266da9702d19ffad6a514c73a89002f5f"), // 12
    b256!("e6ae19322608dd1f8a8d56aab48ed9c28be489b689f4b6c91268563efc85f20e"), // 13
    b256!("6b5b04cbae4fcb1a9d78e7b2dfc51a36933d023cf6e347e03d517b472a852590"), // 14
    b256!("d1eb68309202b7106b891e109739dbbd334a1817fe5d6202c939e75cf5e35ca9"), // 15
    b256!("1da3eed3ecef6ebaa6e5023c057ec2c75150693fd0dac5c90f4a142f9879fde8"), // 16
    b256!("eee9a1392aa395c7002308119a58f2582777a75e54e0c1d5d5437bd2e8bf6222"), // 17
    b256!("c3939feff011e53ab8c35ca3370aad54c5df1fc2938cd62543174fa6e7d85877"), // 18
    b256!("0efca7572ac20f5ae84db0e2940674f7eca0a4726fa1060ffc2d18cef54b203d"), // 19
    b256!("5a4f867d3d458dabecad65f6201ceeaba0096df2d0c491cc32e6ea4e64350017"), // 20
    b256!("80987079d291feebf21c2230e69add0f283cee0b8be492ca8050b4185a2ff719"), // 21
    b256!("3bd8cff538aba49a9c374c806d277181e9651624b3e31111bc0624574f8bca1d"), // 22
    b256!("5d6a3f098a0bc373f808c619b1bb4028208721b3c4f8d6bc8a874d659814eb76"), // 23
    b256!("1d51df90cba8de7637ca3e8fe1e3511d1dc2f23487d05dbdecb781860c21ac1c"), // 24
];

/// Select the bulk order typehash for a tree of the given height.
pub fn bulk_order_typehash(height: usize) -> Result<B256> {
    if !(MIN_TREE_HEIGHT..=MAX_TREE_HEIGHT).contains(&height) {
        return Err(Error::InvalidTreeHeight { height });
    }
    Ok(BULK_ORDER_TYPEHASHES[height - 1])
}

/// Render the EIP-712 type string a bulk order of `height` is signed under.
pub fn bulk_order_type_string(height: usize) -> String {
    format!(
        "BulkOrder(OrderComponents{} tree){}{}{}",
        "[2]".repeat(height),
        CONSIDERATION_ITEM_TYPE,
        OFFER_ITEM_TYPE,
        ORDER_COMPONENTS_TYPE,
    )
}

/// Struct hash of the bulk order wrapper: `keccak256(bulkTypehash ‖ root)`.
pub fn bulk_order_struct_hash(height: usize, root: B256) -> Result<B256> {
    let typehash = bulk_order_typehash(height)?;
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(typehash.as_slice());
    buf[32..].copy_from_slice(root.as_slice());
    Ok(keccak256(buf))
}
