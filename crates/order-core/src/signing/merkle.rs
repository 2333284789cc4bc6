//! Bulk order Merkle trees.
//!
//! Parents are `keccak256(left ‖ right)` with the pair kept in position order.
//! Sorted-pair trees produce different roots and are only available through
//! [`PairOrdering::Sorted`] for interop with other schemes.

use alloy_primitives::{keccak256, B256};
use rayon::prelude::*;
use tracing::debug;

use super::order_hash::OrderHasher;
use super::typehash::{MAX_TREE_HEIGHT, MIN_TREE_HEIGHT};
use crate::types::OrderComponents;
use crate::{Error, Result};

/// Largest number of leaves a bulk order tree can hold.
pub const MAX_LEAVES: usize = 1 << MAX_TREE_HEIGHT;

/// How a pair of sibling nodes is arranged before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairOrdering {
    /// Left node first, as the bulk order protocol requires.
    #[default]
    Unsorted,
    /// Smaller node first.
    Sorted,
}

impl PairOrdering {
    /// Hash two sibling nodes under this ordering.
    pub fn hash_pair(&self, left: B256, right: B256) -> B256 {
        match self {
            PairOrdering::Unsorted => pair_hash(left, right),
            PairOrdering::Sorted if right < left => pair_hash(right, left),
            PairOrdering::Sorted => pair_hash(left, right),
        }
    }
}

/// `keccak256(left ‖ right)` without reordering.
pub fn pair_hash(left: B256, right: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_slice());
    buf[32..].copy_from_slice(right.as_slice());
    keccak256(buf)
}

/// Height of the tree needed for `leaf_count` leaves: `max(1, ceil(log2(n)))`.
pub fn tree_height(leaf_count: usize) -> Result<usize> {
    if leaf_count == 0 {
        return Err(Error::EmptyTree);
    }
    let height = (leaf_count.next_power_of_two().trailing_zeros() as usize).max(MIN_TREE_HEIGHT);
    if height > MAX_TREE_HEIGHT {
        return Err(Error::InvalidTreeHeight { height });
    }
    Ok(height)
}

/// Recompute a root from a leaf, its index and its sibling path.
///
/// Bit `i` of `index` places the running node on the right at level `i`.
/// Bits above the proof length are ignored; an index that does not belong to
/// the tree simply yields a root that will not match. Proofs longer than
/// [`MAX_TREE_HEIGHT`] are rejected.
pub fn recompute_root(leaf: B256, index: u32, proof: &[B256]) -> Result<B256> {
    recompute_root_with(PairOrdering::Unsorted, leaf, index, proof)
}

/// [`recompute_root`] with an explicit pair ordering.
pub fn recompute_root_with(
    ordering: PairOrdering,
    leaf: B256,
    index: u32,
    proof: &[B256],
) -> Result<B256> {
    if proof.len() > MAX_TREE_HEIGHT {
        return Err(Error::InvalidTreeHeight {
            height: proof.len(),
        });
    }

    Ok(proof
        .iter()
        .enumerate()
        .fold(leaf, |node, (level, sibling)| {
            if (index >> level) & 1 == 0 {
                ordering.hash_pair(node, *sibling)
            } else {
                ordering.hash_pair(*sibling, node)
            }
        }))
}

/// Position of a leaf in a bulk order tree and its sibling path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// Zero-based leaf index, below 2^24.
    pub index: u32,
    /// Siblings from the leaf level up to the root.
    pub siblings: Vec<B256>,
}

impl MerkleProof {
    /// Tree height this proof was produced for.
    pub fn height(&self) -> usize {
        self.siblings.len()
    }

    /// Root reached by walking `leaf` up this proof.
    pub fn compute_root(&self, leaf: B256) -> Result<B256> {
        recompute_root(leaf, self.index, &self.siblings)
    }
}

/// A fully built, padded bulk order tree.
#[derive(Debug, Clone)]
pub struct BulkOrderTree {
    /// `levels[0]` holds the padded leaves, the last level holds the root.
    levels: Vec<Vec<B256>>,
    leaf_count: usize,
    ordering: PairOrdering,
}

impl BulkOrderTree {
    /// Build a tree over order hashes, padding with the empty order hash.
    pub fn new(leaves: Vec<B256>) -> Result<Self> {
        Self::with_filler(leaves, OrderHasher::empty_order_hash(), PairOrdering::Unsorted)
    }

    /// Build a tree over the hashes of the given orders.
    pub fn from_orders(orders: &[OrderComponents]) -> Result<Self> {
        Self::new(orders.iter().map(OrderHasher::hash).collect())
    }

    /// Build a tree with an explicit filler leaf and pair ordering.
    pub fn with_filler(mut leaves: Vec<B256>, filler: B256, ordering: PairOrdering) -> Result<Self> {
        let height = tree_height(leaves.len())?;
        let leaf_count = leaves.len();
        leaves.resize(1 << height, filler);

        let mut levels = Vec::with_capacity(height + 1);
        levels.push(leaves);
        for _ in 0..height {
            let next = levels
                .last()
                .map(|level| {
                    level
                        .chunks_exact(2)
                        .map(|pair| ordering.hash_pair(pair[0], pair[1]))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            levels.push(next);
        }

        debug!(leaf_count, height, "Built bulk order tree");

        Ok(Self {
            levels,
            leaf_count,
            ordering,
        })
    }

    /// Root of the tree.
    pub fn root(&self) -> B256 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default()
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of leaves supplied by the caller, before padding.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Padded leaves, a power of two in length.
    pub fn leaves(&self) -> &[B256] {
        &self.levels[0]
    }

    /// Pair ordering used to build this tree.
    pub fn ordering(&self) -> PairOrdering {
        self.ordering
    }

    /// Sibling path for the leaf at `index` (filler leaves included).
    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        let padded = self.leaves().len();
        if index >= padded {
            return Err(Error::LeafIndexOutOfRange {
                index,
                leaves: padded,
            });
        }

        let siblings = self.levels[..self.height()]
            .iter()
            .enumerate()
            .map(|(level, nodes)| nodes[(index >> level) ^ 1])
            .collect();

        Ok(MerkleProof {
            index: index as u32,
            siblings,
        })
    }

    /// Proofs for every caller-supplied leaf, in leaf order.
    pub fn proofs(&self) -> Result<Vec<MerkleProof>> {
        (0..self.leaf_count)
            .into_par_iter()
            .map(|index| self.proof(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(count: usize) -> Vec<B256> {
        (0..count)
            .map(|i| keccak256((i as u64).to_be_bytes()))
            .collect()
    }

    #[test]
    fn test_pair_hash_is_unsorted() {
        let a = B256::repeat_byte(0x01);
        let b = B256::repeat_byte(0x02);
        assert_ne!(pair_hash(a, b), pair_hash(b, a));
        assert_eq!(
            PairOrdering::Sorted.hash_pair(b, a),
            PairOrdering::Sorted.hash_pair(a, b)
        );
        assert_eq!(PairOrdering::default(), PairOrdering::Unsorted);
    }

    #[test]
    fn test_tree_height() {
        assert!(matches!(tree_height(0), Err(Error::EmptyTree)));
        assert_eq!(tree_height(1).unwrap(), 1);
        assert_eq!(tree_height(2).unwrap(), 1);
        assert_eq!(tree_height(3).unwrap(), 2);
        assert_eq!(tree_height(4).unwrap(), 2);
        assert_eq!(tree_height(5).unwrap(), 3);
        assert_eq!(tree_height(MAX_LEAVES).unwrap(), 24);
        assert!(matches!(
            tree_height(MAX_LEAVES + 1),
            Err(Error::InvalidTreeHeight { height: 25 })
        ));
    }

    #[test]
    fn test_single_leaf_pairs_with_filler() {
        let leaf = B256::repeat_byte(0x77);
        let tree = BulkOrderTree::new(vec![leaf]).unwrap();

        assert_eq!(tree.height(), 1);
        assert_eq!(tree.leaves().len(), 2);
        assert_eq!(tree.leaves()[1], OrderHasher::empty_order_hash());
        assert_eq!(tree.root(), pair_hash(leaf, OrderHasher::empty_order_hash()));

        let proof = tree.proof(0).unwrap();
        assert_eq!(proof.siblings, vec![OrderHasher::empty_order_hash()]);
    }

    #[test]
    fn test_three_leaves_pad_to_four() {
        let tree = BulkOrderTree::new(leaves(3)).unwrap();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.leaves().len(), 4);
        assert_eq!(tree.leaves()[3], OrderHasher::empty_order_hash());
    }

    #[test]
    fn test_every_proof_reconstructs_root() {
        for count in [1usize, 2, 3, 4, 5, 7, 8, 13, 32] {
            let input = leaves(count);
            let tree = BulkOrderTree::new(input.clone()).unwrap();
            for (index, leaf) in input.iter().enumerate() {
                let proof = tree.proof(index).unwrap();
                assert_eq!(proof.height(), tree.height());
                assert_eq!(
                    recompute_root(*leaf, proof.index, &proof.siblings).unwrap(),
                    tree.root(),
                    "count {count} index {index}"
                );
            }
        }
    }

    #[test]
    fn test_proofs_cover_real_leaves_only() {
        let tree = BulkOrderTree::new(leaves(5)).unwrap();
        let proofs = tree.proofs().unwrap();
        assert_eq!(proofs.len(), 5);
        assert!(proofs.iter().enumerate().all(|(i, p)| p.index as usize == i));
    }

    #[test]
    fn test_filler_leaf_has_a_proof() {
        let tree = BulkOrderTree::new(leaves(3)).unwrap();
        let proof = tree.proof(3).unwrap();
        assert_eq!(proof.compute_root(OrderHasher::empty_order_hash()).unwrap(), tree.root());
    }

    #[test]
    fn test_proof_index_out_of_range() {
        let tree = BulkOrderTree::new(leaves(3)).unwrap();
        assert!(matches!(
            tree.proof(4),
            Err(Error::LeafIndexOutOfRange { index: 4, leaves: 4 })
        ));
    }

    #[test]
    fn test_wrong_index_fails_by_non_equality() {
        let input = leaves(4);
        let tree = BulkOrderTree::new(input.clone()).unwrap();
        let proof = tree.proof(1).unwrap();
        assert_ne!(recompute_root(input[1], 2, &proof.siblings).unwrap(), tree.root());
    }

    #[test]
    fn test_high_index_bits_are_ignored() {
        let input = leaves(4);
        let tree = BulkOrderTree::new(input.clone()).unwrap();
        let proof = tree.proof(2).unwrap();
        assert_eq!(recompute_root(input[2], 2 | (1 << 20), &proof.siblings).unwrap(),
            tree.root());
    }

    #[test]
    fn test_tampered_sibling_changes_root() {
        let input = leaves(8);
        let tree = BulkOrderTree::new(input.clone()).unwrap();
        let mut proof = tree.proof(5).unwrap();
        proof.siblings[1].0[31] ^= 0x01;
        assert_ne!(proof.compute_root(input[5]).unwrap(), tree.root());
    }

    #[test]
    fn test_sorted_ordering_round_trip() {
        let input = leaves(6);
        let tree =
            BulkOrderTree::with_filler(input.clone(), B256::ZERO, PairOrdering::Sorted).unwrap();
        let proof = tree.proof(4).unwrap();
        assert_eq!(
            recompute_root_with(PairOrdering::Sorted, input[4], proof.index, &proof.siblings).unwrap(),
            tree.root()
        );
        assert_ne!(tree.root(), BulkOrderTree::new(input).unwrap().root());
    }

    #[test]
    fn test_recompute_rejects_overlong_proofs() {
        let leaf = B256::ZERO;
        for height in [25usize, 32, 40] {
            let proof = vec![B256::repeat_byte(0x01); height];
            assert!(matches!(
                recompute_root(leaf, 0, &proof),
                Err(Error::InvalidTreeHeight { height: h }) if h == height
            ));
            assert!(matches!(
                recompute_root_with(PairOrdering::Sorted, leaf, u32::MAX, &proof),
                Err(Error::InvalidTreeHeight { .. })
            ));
        }

        let deepest = vec![B256::repeat_byte(0x01); MAX_TREE_HEIGHT];
        assert!(recompute_root(leaf, u32::MAX, &deepest).is_ok());
        assert_eq!(recompute_root(leaf, 0, &[]).unwrap(), leaf);
    }
}
