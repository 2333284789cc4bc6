//! Order signing, single and bulk.
//!
//! A bulk signature is produced once over the tree root; each order then gets
//! its own packed signature carrying its leaf index and sibling path.

use alloy_primitives::{Address, Bytes, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use tracing::info;

use super::domain::Eip712Domain;
use super::merkle::BulkOrderTree;
use super::order_hash::OrderHasher;
use super::packing::{BaseSignature, PackedBulkSignature};
use super::typehash::bulk_order_struct_hash;
use crate::types::OrderComponents;

/// Which base signature encoding packed signatures carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureFormat {
    /// 65-byte `r ‖ s ‖ v`.
    #[default]
    Full,
    /// 64-byte EIP-2098 compact form.
    Compact,
}

/// Result of signing a batch of orders.
#[derive(Debug, Clone)]
pub struct SignedBulkOrder {
    /// Root the signer signed over.
    pub root: B256,
    /// Tree height; also the proof length of every signature.
    pub height: usize,
    /// Order hash of each input order, in input order.
    pub order_hashes: Vec<B256>,
    /// Packed bulk signature of each input order, in input order.
    pub signatures: Vec<Bytes>,
}

/// Signs orders under a fixed EIP-712 domain.
#[derive(Clone)]
pub struct BulkOrderSigner {
    signer: PrivateKeySigner,
    domain: Eip712Domain,
}

impl BulkOrderSigner {
    pub fn new(signer: PrivateKeySigner, domain: Eip712Domain) -> Self {
        Self { signer, domain }
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Sign a single order; the result is a plain 65-byte signature.
    pub async fn sign_order(&self, order: &OrderComponents) -> Result<Bytes> {
        let digest = self.domain.typed_data_hash(OrderHasher::hash(order));
        let signature = self
            .signer
            .sign_hash(&digest)
            .await
            .context("Failed to sign order")?;

        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    /// Sign a batch of orders with one signature over their bulk order tree.
    pub async fn sign_bulk(
        &self,
        orders: &[OrderComponents],
        format: SignatureFormat,
    ) -> Result<SignedBulkOrder> {
        let order_hashes: Vec<B256> = orders.iter().map(OrderHasher::hash).collect();
        let tree =
            BulkOrderTree::new(order_hashes.clone()).context("Failed to build bulk order tree")?;

        let struct_hash = bulk_order_struct_hash(tree.height(), tree.root())
            .context("Unsupported bulk order tree height")?;
        let digest = self.domain.typed_data_hash(struct_hash);

        let signature = self
            .signer
            .sign_hash(&digest)
            .await
            .context("Failed to sign bulk order root")?;

        let base = match format {
            SignatureFormat::Full => BaseSignature::Full(signature.as_bytes()),
            SignatureFormat::Compact => BaseSignature::Compact(signature.as_erc2098()),
        };

        let signatures = tree
            .proofs()
            .context("Failed to generate bulk order proofs")?
            .into_iter()
            .map(|proof| PackedBulkSignature::new(base, proof).pack())
            .collect::<crate::Result<Vec<_>>>()
            .context("Failed to pack bulk order signature")?;

        info!(
            orders = orders.len(),
            height = tree.height(),
            root = %tree.root(),
            "Signed bulk order"
        );

        Ok(SignedBulkOrder {
            root: tree.root(),
            height: tree.height(),
            order_hashes,
            signatures,
        })
    }
}

impl std::fmt::Debug for BulkOrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkOrderSigner")
            .field("address", &format!("{:?}", self.address()))
            .field("domain", &self.domain.name)
            .finish()
    }
}
