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

//! Merkle Mountain Range.
//!
//! The range is a forest of perfect binary trees ("peaks") with strictly decreasing heights, one
//! per set bit of the leaf count. Appending a leaf behaves like a binary counter increment: the new
//! leaf becomes a height 0 peak, then the two newest peaks are merged with `hash2(older, newer)`
//! for as long as their heights match.
//!
//! The root commits to both the peaks and the node count:
//!
//! ```text
//! bag  = hash2(p0, hash2(p1, ... hash2(p[k-2], p[k-1])))
//! root = hash2(last_pos, bag)
//! ```
//!
//! where `p0` is the oldest (highest) peak and `last_pos` is encoded with
//! [`HashScheme::from_u64`].

mod position;

pub use self::position::{leaf_position, peak_positions, pos_height};

use self::position::{is_right_child, node_count, sibling_offset};
use crate::rstd::{hash::BuildHasherDefault, vec::Vec};
use crate::{Digest, Error, HashScheme, Result, ToHex, LOG_TARGET};
use hashbrown::HashMap;
use log::{debug, trace};
use parity_scale_codec::{Decode, Encode};
use smallvec::SmallVec;

/// Peak stack entry: node position and height.
type PeakEntry = (u64, u32);

/// Inclusion proof for a [`MountainRange`] leaf.
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode)]
pub struct MmrProof<O> {
	/// Position of the proven leaf.
	pub position: u64,
	/// Sibling digests from the leaf up to, excluding, its peak.
	pub siblings: Vec<O>,
	/// Index of the peak containing the leaf, oldest peak first.
	pub peak_index: u32,
	/// All peaks but the containing one, in order.
	pub other_peaks: Vec<O>,
	/// Node count of the range when the proof was issued.
	pub last_pos: u64,
}

/// Append-only Merkle Mountain Range.
///
/// Every node is kept, indexed by position, so proofs are read without hashing.
#[derive(Clone)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct MountainRange<H: HashScheme> {
	nodes: Vec<H::Out>,
	peaks: SmallVec<[PeakEntry; 32]>,
	leaf_count: u64,
	leaf_index: HashMap<H::Out, u64, BuildHasherDefault<H::StdHasher>>,
}

impl<H: HashScheme> Default for MountainRange<H> {
	fn default() -> Self {
		MountainRange {
			nodes: Vec::new(),
			peaks: SmallVec::new(),
			leaf_count: 0,
			leaf_index: HashMap::with_hasher(Default::default()),
		}
	}
}

impl<H: HashScheme> MountainRange<H> {
	/// Empty mountain range.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of leaves appended.
	pub fn size(&self) -> u64 {
		self.leaf_count
	}

	/// Number of nodes, which is also the position of the newest node.
	pub fn last_pos(&self) -> u64 {
		self.nodes.len() as u64
	}

	/// Node at `pos`, if assigned.
	pub fn node(&self, pos: u64) -> Option<&H::Out> {
		if pos == 0 {
			return None
		}
		self.nodes.get((pos - 1) as usize)
	}

	/// Current peak digests, oldest first.
	pub fn peaks(&self) -> Vec<H::Out> {
		self.peaks.iter().map(|(pos, _)| self.nodes[(*pos - 1) as usize]).collect()
	}

	/// Current peak heights, oldest first. Strictly decreasing.
	pub fn peak_heights(&self) -> Vec<u32> {
		self.peaks.iter().map(|(_, height)| *height).collect()
	}

	/// Position of the first occurrence of `leaf`.
	pub fn position_of(&self, leaf: &H::Out) -> Option<u64> {
		self.leaf_index.get(leaf).copied()
	}

	/// Append a leaf and return its position.
	pub fn append(&mut self, leaf: H::Out) -> u64 {
		let leaf_pos = self.last_pos() + 1;
		self.nodes.push(leaf);
		self.leaf_index.entry(leaf).or_insert(leaf_pos);

		let mut pos = leaf_pos;
		let mut height = 0;
		let mut node = leaf;
		while let Some(&(older_pos, older_height)) = self.peaks.last() {
			if older_height != height {
				break
			}
			self.peaks.pop();
			node = H::hash2(&self.nodes[(older_pos - 1) as usize], &node);
			self.nodes.push(node);
			pos += 1;
			height += 1;
			trace!(
				target: LOG_TARGET,
				"merged peak at {} height {}: {:?}",
				pos,
				height,
				ToHex(node.as_ref()),
			);
		}
		self.peaks.push((pos, height));
		self.leaf_count += 1;

		debug_assert_eq!(self.peaks.len() as u32, self.leaf_count.count_ones());
		debug_assert_eq!(self.last_pos(), node_count(self.leaf_count));
		trace!(
			target: LOG_TARGET,
			"appended leaf {:?} at {}, last_pos={}",
			ToHex(leaf.as_ref()),
			leaf_pos,
			self.last_pos(),
		);
		leaf_pos
	}

	/// Append leaves in order and return their positions.
	pub fn append_batch<I>(&mut self, leaves: I) -> Vec<u64>
	where
		I: IntoIterator<Item = H::Out>,
	{
		let positions: Vec<u64> = leaves.into_iter().map(|leaf| self.append(leaf)).collect();
		debug!(
			target: LOG_TARGET,
			"appended {} leaves: size={}, last_pos={}, peaks={}",
			positions.len(),
			self.leaf_count,
			self.last_pos(),
			self.peaks.len(),
		);
		positions
	}

	/// Fold the peaks into a single digest, newest peak innermost.
	pub fn bag_peaks(&self) -> Result<H::Out> {
		bag::<H>(&self.peaks()).ok_or(Error::EmptyMountainRange)
	}

	/// Root of the range: the peak bag seeded with the node count.
	pub fn root(&self) -> Result<H::Out> {
		let bag = self.bag_peaks()?;
		Ok(H::hash2(&H::from_u64(self.last_pos()), &bag))
	}

	/// Inclusion proof for the leaf at `pos`.
	pub fn prove(&self, pos: u64) -> Result<MmrProof<H::Out>> {
		if pos == 0 || pos > self.last_pos() || pos_height(pos) != 0 {
			return Err(Error::PositionNotFound(pos))
		}
		// Peaks are ordered by position, the first one at or after `pos` contains it.
		let peak_index = self
			.peaks
			.iter()
			.position(|(peak_pos, _)| *peak_pos >= pos)
			.ok_or(Error::PositionNotFound(pos))?;
		let (peak_pos, peak_height) = self.peaks[peak_index];

		let mut siblings = Vec::with_capacity(peak_height as usize);
		let mut at = pos;
		let mut height = 0;
		while at != peak_pos {
			let offset = sibling_offset(height);
			if is_right_child(at, height) {
				siblings.push(self.nodes[(at - offset - 1) as usize]);
				at += 1;
			} else {
				siblings.push(self.nodes[(at + offset - 1) as usize]);
				at += offset + 1;
			}
			height += 1;
		}

		let other_peaks = self
			.peaks
			.iter()
			.enumerate()
			.filter(|(i, _)| *i != peak_index)
			.map(|(_, (p, _))| self.nodes[(*p - 1) as usize])
			.collect();

		trace!(
			target: LOG_TARGET,
			"proof for position {}: {} siblings, peak {} of {}",
			pos,
			siblings.len(),
			peak_index,
			self.peaks.len(),
		);
		Ok(MmrProof {
			position: pos,
			siblings,
			peak_index: peak_index as u32,
			other_peaks,
			last_pos: self.last_pos(),
		})
	}

	/// Check that `leaf` sits at `pos` under `root`.
	///
	/// Returns `false` for proofs that do not describe a valid range.
	pub fn verify(leaf: &H::Out, pos: u64, proof: &MmrProof<H::Out>, root: &H::Out) -> bool {
		if proof.position != pos {
			return false
		}
		let peak_pos = match peak_positions(proof.last_pos) {
			Some(peak_pos) => peak_pos,
			None => return false,
		};
		let peak_index = proof.peak_index as usize;
		if peak_index >= peak_pos.len() || proof.other_peaks.len() + 1 != peak_pos.len() {
			return false
		}
		if !proof.other_peaks.iter().all(H::is_canonical) {
			return false
		}
		let peak = match climb::<H>(leaf, pos, &proof.siblings, proof.last_pos) {
			Some((at, peak)) if at == peak_pos[peak_index] => peak,
			_ => return false,
		};

		let mut peaks = proof.other_peaks.clone();
		peaks.insert(peak_index, peak);
		match bag::<H>(&peaks) {
			Some(bag) => H::hash2(&H::from_u64(proof.last_pos), &bag) == *root,
			None => false,
		}
	}
}

/// Hash a leaf up its sibling path, returning the reached position and digest.
///
/// `None` when the path leaves the range, `pos` is not a leaf or a digest is not canonical.
pub(crate) fn climb<H: HashScheme>(
	leaf: &H::Out,
	pos: u64,
	siblings: &[H::Out],
	last_pos: u64,
) -> Option<(u64, H::Out)> {
	if pos == 0 || pos > last_pos || pos_height(pos) != 0 || siblings.len() >= 63 {
		return None
	}
	if !H::is_canonical(leaf) || !siblings.iter().all(H::is_canonical) {
		return None
	}
	let mut at = pos;
	let mut current = *leaf;
	for (height, sibling) in siblings.iter().enumerate() {
		let height = height as u32;
		if is_right_child(at, height) {
			current = H::hash2(sibling, &current);
			at = at.checked_add(1)?;
		} else {
			current = H::hash2(&current, sibling);
			at = at.checked_add(sibling_offset(height) + 1)?;
		}
		if at > last_pos {
			return None
		}
	}
	Some((at, current))
}

/// Peak bag: `hash2(p0, hash2(p1, ... p[k-1]))`. `None` without peaks.
pub(crate) fn bag<H: HashScheme>(peaks: &[Digest<H>]) -> Option<Digest<H>> {
	let (last, rest) = peaks.split_last()?;
	Some(rest.iter().rev().fold(*last, |acc, peak| H::hash2(peak, &acc)))
}

/// Index of the peak containing leaf `pos` in a range of `last_pos` nodes.
pub(crate) fn containing_peak(pos: u64, last_pos: u64) -> Option<usize> {
	peak_positions(last_pos)?.iter().position(|peak| *peak >= pos)
}
