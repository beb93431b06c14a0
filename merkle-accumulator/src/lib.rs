// Copyright 2017, 2024 Parity Technologies
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
#![cfg_attr(not(feature = "std"), no_std)]

//! Append-only commitment accumulators.
//!
//! Two structures are provided, both generic over a [`HashScheme`]:
//!
//! - [`FixedMerkleTree`]: a binary tree over a leaf sequence padded to a fixed capacity with the
//!   zero-leaf sentinel `hash2(0, 0)`.
//! - [`MountainRange`]: a Merkle Mountain Range, a forest of perfect binary trees grown by
//!   appending leaves one at a time.
//!
//! Both produce inclusion proofs that can be checked against a root alone, and both proofs can be
//! lowered into an [`InclusionStatement`] for transport with a [`ProofCodec`].
//!
//! Access is single writer: mutation takes `&mut self`, reads take `&self`. No locking is done
//! internally.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
mod rstd {
	pub use std::{
		borrow, boxed, cmp, convert, error::Error, fmt, hash, iter, marker, mem, ops, result,
		string, vec,
	};
}

#[cfg(not(feature = "std"))]
mod rstd {
	pub use alloc::{borrow, boxed, string, vec};
	pub use core::{cmp, convert, fmt, hash, iter, marker, mem, ops, result};
	pub trait Error {}
	impl<T> Error for T {}
}

#[cfg(feature = "std")]
use self::rstd::fmt;

pub mod codec;
pub mod fixed_tree;
pub mod mmr;

pub use crate::{
	codec::{DecimalCodec, DecodeError, InclusionStatement, MmrExtra, ProofCodec, ScaleCodec},
	fixed_tree::{zero_hashes, FixedMerkleTree, TreeProof},
	mmr::{leaf_position, peak_positions, pos_height, MmrProof, MountainRange},
};
pub use hash_scheme::HashScheme;

/// Log target used by the accumulators.
pub(crate) const LOG_TARGET: &str = "accumulator";

/// Digest type of a hash scheme.
pub type Digest<H> = <H as HashScheme>::Out;

/// Accumulator errors.
///
/// All of these are precondition violations of the call that returned them; the accumulator is
/// left unchanged.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Error {
	/// More leaves than the requested tree capacity.
	InvalidCapacity {
		/// Number of leaves given.
		leaves: usize,
		/// Requested capacity.
		capacity: usize,
	},
	/// Root requested on a tree of capacity 0.
	EmptyTree,
	/// Leaf index outside of the tree capacity.
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Tree capacity.
		capacity: usize,
	},
	/// Root or bag requested on a mountain range without peaks.
	EmptyMountainRange,
	/// Position is not a leaf of the mountain range.
	PositionNotFound(u64),
}

#[cfg(feature = "std")]
impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::InvalidCapacity { leaves, capacity } =>
				write!(f, "{} leaves do not fit in a tree of capacity {}", leaves, capacity),
			Error::EmptyTree => write!(f, "Tree of capacity 0 has no root"),
			Error::IndexOutOfRange { index, capacity } =>
				write!(f, "Leaf index {} out of range for capacity {}", index, capacity),
			Error::EmptyMountainRange => write!(f, "Mountain range has no peaks"),
			Error::PositionNotFound(pos) =>
				write!(f, "Position {} is not a leaf of the mountain range", pos),
		}
	}
}

#[cfg(feature = "std")]
impl rstd::Error for Error {}

/// Accumulator result type.
pub type Result<T> = crate::rstd::result::Result<T, Error>;

/// Hex rendering of digests for log output.
pub(crate) struct ToHex<'a>(pub(crate) &'a [u8]);

#[cfg(feature = "std")]
impl<'a> fmt::Debug for ToHex<'a> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		let hex = rustc_hex::ToHexIter::new(self.0.iter());
		for b in hex {
			write!(fmt, "{}", b)?;
		}
		Ok(())
	}
}

#[cfg(not(feature = "std"))]
impl<'a> core::fmt::Debug for ToHex<'a> {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
		for b in self.0 {
			write!(fmt, "{:02x}", b)?;
		}
		Ok(())
	}
}
