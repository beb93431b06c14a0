// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed capacity binary Merkle tree.
//!
//! Leaves are padded on the right with [`HashScheme::zero_leaf`] up to the capacity. Each level is
//! paired with `hash2` into the next one until a single root remains. When a level has an odd
//! number of nodes, its last node is duplicated and the duplicate is kept in the level, so every
//! level below the root has even length:
//!
//! ```text
//!             r
//!          /     \
//!        p0       p1
//!       /  \     /  \
//!      l0  l1   l2  l2'     <- l2' duplicate of l2 (capacity 3)
//! ```
//!
//! A duplicated node is its own sibling in proofs, so proofs always carry one sibling per level.

use crate::rstd::vec::Vec;
use crate::{Digest, Error, HashScheme, Result, ToHex, LOG_TARGET};
use log::{debug, trace};
use parity_scale_codec::{Decode, Encode};

/// Inclusion proof for a [`FixedMerkleTree`] leaf: one sibling per level, leaf level first.
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode)]
pub struct TreeProof<O> {
	/// Sibling digests from the leaf level up to the level under the root.
	pub siblings: Vec<O>,
}

impl<O> TreeProof<O> {
	/// Number of sibling digests.
	pub fn len(&self) -> usize {
		self.siblings.len()
	}

	/// Is the sibling path empty (single leaf tree)?
	pub fn is_empty(&self) -> bool {
		self.siblings.is_empty()
	}
}

/// Binary Merkle tree over a leaf sequence padded to a fixed capacity.
///
/// All levels are kept after build, so proofs are read without hashing.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct FixedMerkleTree<H: HashScheme> {
	levels: Vec<Vec<H::Out>>,
	capacity: usize,
	leaf_count: usize,
}

impl<H: HashScheme> FixedMerkleTree<H> {
	/// Build a tree over `leaves`, padded with the zero-leaf sentinel up to `capacity`.
	///
	/// `capacity` does not need to be a power of two.
	pub fn build<I>(leaves: I, capacity: usize) -> Result<Self>
	where
		I: IntoIterator<Item = H::Out>,
	{
		let mut level: Vec<H::Out> = leaves.into_iter().collect();
		let leaf_count = level.len();
		if leaf_count > capacity {
			return Err(Error::InvalidCapacity { leaves: leaf_count, capacity })
		}
		level.resize(capacity, H::zero_leaf());

		let mut levels = Vec::new();
		while level.len() > 1 {
			if level.len() % 2 != 0 {
				let last = level[level.len() - 1];
				level.push(last);
			}
			let next = level.chunks(2).map(|pair| H::hash2(&pair[0], &pair[1])).collect();
			levels.push(level);
			level = next;
		}
		levels.push(level);

		let tree = FixedMerkleTree { levels, capacity, leaf_count };
		debug!(
			target: LOG_TARGET,
			"built tree: leaves={}, capacity={}, depth={}",
			leaf_count,
			capacity,
			tree.depth(),
		);
		Ok(tree)
	}

	/// Number of leaf slots, including padding.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Number of leaves given at build time (padding excluded).
	pub fn leaf_count(&self) -> usize {
		self.leaf_count
	}

	/// Number of pairing rounds from leaves to root, which is also the proof length.
	pub fn depth(&self) -> usize {
		self.levels.len() - 1
	}

	/// All levels, leaves first. Levels below the root have even length.
	pub fn levels(&self) -> &[Vec<H::Out>] {
		&self.levels
	}

	/// Leaf at `index`, padding included.
	pub fn leaf(&self, index: usize) -> Option<&H::Out> {
		if index < self.capacity {
			self.levels[0].get(index)
		} else {
			None
		}
	}

	/// Index of the first non padding leaf equal to `leaf`.
	pub fn position_of(&self, leaf: &H::Out) -> Option<usize> {
		self.levels[0][..self.leaf_count].iter().position(|l| l == leaf)
	}

	/// Root of the tree.
	pub fn root(&self) -> Result<H::Out> {
		match self.levels.last() {
			Some(top) if top.len() == 1 => Ok(top[0]),
			_ => Err(Error::EmptyTree),
		}
	}

	/// Inclusion proof for the leaf at `index`.
	pub fn prove(&self, index: usize) -> Result<TreeProof<H::Out>> {
		if index >= self.capacity {
			return Err(Error::IndexOutOfRange { index, capacity: self.capacity })
		}
		let mut siblings = Vec::with_capacity(self.depth());
		let mut at = index;
		for level in &self.levels[..self.depth()] {
			// Levels below the root have even length, `at ^ 1` is always in range.
			siblings.push(level[at ^ 1]);
			at >>= 1;
		}
		trace!(
			target: LOG_TARGET,
			"proof for leaf {} ({:?}): {} siblings",
			index,
			ToHex(self.levels[0][index].as_ref()),
			siblings.len(),
		);
		Ok(TreeProof { siblings })
	}

	/// Check that `leaf` sits at `index` under `root`.
	///
	/// `index` must address a leaf of a tree of the proof's depth.
	pub fn verify(leaf: &H::Out, index: usize, proof: &TreeProof<H::Out>, root: &H::Out) -> bool {
		compute_root::<H>(leaf, index, &proof.siblings).map_or(false, |r| r == *root)
	}
}

/// Fold a sibling path up from `leaf`, using the parity of `index` at each level.
///
/// `None` when `index` has bits above the path length or a digest is not canonical.
pub(crate) fn compute_root<H: HashScheme>(
	leaf: &H::Out,
	index: usize,
	siblings: &[H::Out],
) -> Option<H::Out> {
	if index.checked_shr(siblings.len() as u32).unwrap_or(0) != 0 {
		return None
	}
	if !H::is_canonical(leaf) || !siblings.iter().all(H::is_canonical) {
		return None
	}
	let mut current = *leaf;
	let mut index = index;
	for sibling in siblings {
		current = if index % 2 == 0 {
			H::hash2(&current, sibling)
		} else {
			H::hash2(sibling, &current)
		};
		index >>= 1;
	}
	Some(current)
}

/// Roots of all-zero subtrees: entry `k` is the root of a subtree of `2^k` zero leaves.
///
/// Entry 0 is the zero-leaf sentinel itself.
pub fn zero_hashes<H: HashScheme>(depth: usize) -> Vec<Digest<H>> {
	let mut result = Vec::with_capacity(depth + 1);
	let mut current = H::zero_leaf();
	result.push(current);
	for _ in 0..depth {
		current = H::hash2(&current, &current);
		result.push(current);
	}
	result
}
