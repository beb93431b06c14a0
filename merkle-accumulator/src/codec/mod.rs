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

//! Transport form of inclusion proofs.
//!
//! Both proof kinds are lowered into an [`InclusionStatement`], a flat tuple holding everything an
//! external verifier needs to recompute the root. A [`ProofCodec`] renders statements into a
//! transport form and back.

mod decimal;
mod scale;

pub use self::{decimal::DecimalCodec, scale::ScaleCodec};

use crate::fixed_tree::{compute_root, FixedMerkleTree};
use crate::mmr::{climb, containing_peak, MmrProof, MountainRange};
use crate::rstd::{vec::Vec, Error as StdError};
use crate::{Error, HashScheme, Result};
use parity_scale_codec::{Decode, Encode};

#[cfg(feature = "std")]
use crate::rstd::fmt;

/// Mountain range part of a statement.
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode)]
pub struct MmrExtra<O> {
	/// Node count of the range the proof was issued for.
	pub last_pos: u64,
	/// All peaks, oldest first, the one containing the leaf included.
	pub peaks: Vec<O>,
}

/// Inclusion proof with its leaf and root.
///
/// `index` is the leaf index for a fixed tree and the leaf position for a mountain range, the
/// latter being told apart by `mmr` being set.
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode)]
pub struct InclusionStatement<O> {
	/// Proven leaf.
	pub leaf: O,
	/// Leaf index or position.
	pub index: u64,
	/// Sibling path, leaf level first.
	pub siblings: Vec<O>,
	/// Peak bag, for mountain range proofs only.
	pub mmr: Option<MmrExtra<O>>,
	/// Root the proof recomputes.
	pub root: O,
}

impl<O: Copy + PartialEq> InclusionStatement<O> {
	/// Statement for the leaf at `index` of `tree`.
	pub fn for_tree<H>(tree: &FixedMerkleTree<H>, index: usize) -> Result<Self>
	where
		H: HashScheme<Out = O>,
	{
		let proof = tree.prove(index)?;
		let leaf = *tree
			.leaf(index)
			.ok_or(Error::IndexOutOfRange { index, capacity: tree.capacity() })?;
		Ok(InclusionStatement {
			leaf,
			index: index as u64,
			siblings: proof.siblings,
			mmr: None,
			root: tree.root()?,
		})
	}

	/// Statement for the leaf at position `pos` of `mmr`.
	pub fn for_mountain_range<H>(mmr: &MountainRange<H>, pos: u64) -> Result<Self>
	where
		H: HashScheme<Out = O>,
	{
		let proof = mmr.prove(pos)?;
		let leaf = *mmr.node(pos).ok_or(Error::PositionNotFound(pos))?;
		Ok(InclusionStatement {
			leaf,
			index: pos,
			siblings: proof.siblings,
			mmr: Some(MmrExtra { last_pos: proof.last_pos, peaks: mmr.peaks() }),
			root: mmr.root()?,
		})
	}

	/// Is this a mountain range statement?
	pub fn is_mountain_range(&self) -> bool {
		self.mmr.is_some()
	}

	/// Check the statement with the verifier matching its kind.
	pub fn verify<H>(&self) -> bool
	where
		H: HashScheme<Out = O>,
	{
		let extra = match &self.mmr {
			None => {
				return match usize::try_from(self.index) {
					Ok(index) => compute_root::<H>(&self.leaf, index, &self.siblings)
						.map_or(false, |root| root == self.root),
					Err(_) => false,
				}
			},
			Some(extra) => extra,
		};

		let peak_index = match containing_peak(self.index, extra.last_pos) {
			Some(peak_index) if peak_index < extra.peaks.len() => peak_index,
			_ => return false,
		};
		let mut other_peaks = extra.peaks.clone();
		let own_peak = other_peaks.remove(peak_index);
		let proof = MmrProof {
			position: self.index,
			siblings: self.siblings.clone(),
			peak_index: peak_index as u32,
			other_peaks,
			last_pos: extra.last_pos,
		};
		// The own peak is carried for external verifiers, it must agree with the path.
		MountainRange::<H>::verify(&self.leaf, self.index, &proof, &self.root) &&
			climb::<H>(&self.leaf, self.index, &self.siblings, extra.last_pos)
				.map(|(_, peak)| peak) ==
				Some(own_peak)
	}
}

/// Rendering of inclusion statements into a transport form.
pub trait ProofCodec<O> {
	/// Transport form.
	type Encoded;

	/// Decoding error.
	type Error: StdError;

	/// Render a statement.
	fn encode(statement: &InclusionStatement<O>) -> Self::Encoded;

	/// Read a statement back.
	fn decode(
		encoded: &Self::Encoded,
	) -> crate::rstd::result::Result<InclusionStatement<O>, Self::Error>;
}

/// Errors reading a statement from its transport form.
#[derive(Debug)]
pub enum DecodeError {
	/// Invalid binary encoding.
	Scale(parity_scale_codec::Error),
	/// Character that does not fit the grammar, at the given byte offset.
	UnexpectedToken(usize),
	/// Input ended before the statement was complete.
	UnexpectedEnd,
	/// Input continues after a complete statement.
	TrailingData,
	/// Malformed decimal number at the given byte offset.
	InvalidNumber(usize),
	/// Decimal number too wide for its field.
	Overflow,
}

impl From<parity_scale_codec::Error> for DecodeError {
	fn from(e: parity_scale_codec::Error) -> Self {
		DecodeError::Scale(e)
	}
}

#[cfg(feature = "std")]
impl fmt::Display for DecodeError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			DecodeError::Scale(e) => write!(f, "Invalid binary statement: {}", e),
			DecodeError::UnexpectedToken(at) => write!(f, "Unexpected character at offset {}", at),
			DecodeError::UnexpectedEnd => write!(f, "Statement ends early"),
			DecodeError::TrailingData => write!(f, "Data after the end of the statement"),
			DecodeError::InvalidNumber(at) => write!(f, "Invalid number at offset {}", at),
			DecodeError::Overflow => write!(f, "Number too large"),
		}
	}
}

#[cfg(feature = "std")]
impl StdError for DecodeError {}
