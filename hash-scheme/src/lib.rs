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

//! Hash capability shared by the binary Merkle accumulators.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
use core::hash;
#[cfg(feature = "std")]
use std::fmt::Debug;
#[cfg(feature = "std")]
use std::hash;

#[cfg(feature = "std")]
pub trait MaybeDebug: Debug {}
#[cfg(feature = "std")]
impl<T: Debug> MaybeDebug for T {}
#[cfg(not(feature = "std"))]
pub trait MaybeDebug {}
#[cfg(not(feature = "std"))]
impl<T> MaybeDebug for T {}

/// Trait describing a domain hash function usable as a Merkle node combiner.
///
/// Accumulators are generic over this trait, so that the same tree and
/// mountain range code runs over any hash family. A scheme defines a one-input
/// hash `hash1` and a two-input hash `hash2`, both operating on fixed-width
/// digests of type `Out`.
pub trait HashScheme: Sync + Send {
	/// The output type of the scheme, a fixed width digest.
	type Out: AsRef<[u8]>
		+ AsMut<[u8]>
		+ Default
		+ MaybeDebug
		+ PartialEq
		+ Eq
		+ hash::Hash
		+ Send
		+ Sync
		+ Clone
		+ Copy;
	/// What to use to build `HashMap`s keyed by `Out`.
	type StdHasher: Sync + Send + Default + hash::Hasher;
	/// The length in bytes of `Out`.
	const LENGTH: usize;

	/// Hash a single digest.
	fn hash1(x: &Self::Out) -> Self::Out;

	/// Hash an ordered pair of digests. `hash2(a, b)` and `hash2(b, a)` are
	/// expected to differ.
	fn hash2(a: &Self::Out, b: &Self::Out) -> Self::Out;

	/// Is `x` the unique encoding of its value?
	///
	/// Schemes that reduce their inputs (field element digests) must reject encodings of values
	/// at or above the modulus, otherwise two digests would hash alike. Verifiers check every
	/// digest taken from a proof with this.
	fn is_canonical(_x: &Self::Out) -> bool {
		true
	}

	/// Canonical padding leaf, `hash2(0, 0)`.
	fn zero_leaf() -> Self::Out {
		let zero = Self::Out::default();
		Self::hash2(&zero, &zero)
	}

	/// Digest holding `value` as a big-endian integer in its trailing bytes.
	///
	/// This is how integers (sizes, counters) are fed into a hash, mirroring
	/// the encoding of small field elements.
	fn from_u64(value: u64) -> Self::Out {
		let mut out = Self::Out::default();
		let bytes = value.to_be_bytes();
		let buf = out.as_mut();
		let len = buf.len();
		if len >= bytes.len() {
			buf[len - bytes.len()..].copy_from_slice(&bytes[..]);
		} else {
			buf.copy_from_slice(&bytes[bytes.len() - len..]);
		}
		out
	}
}

/// Test function to use on any `HashScheme` implementation.
#[cfg(feature = "std")]
pub fn test_hash_scheme<H: HashScheme>() {
	let zero = H::Out::default();
	assert_eq!(zero.as_ref().len(), H::LENGTH);

	let one = H::from_u64(1);
	let two = H::from_u64(2);
	assert_eq!(one.as_ref()[H::LENGTH - 1], 1);
	assert!(one.as_ref()[..H::LENGTH - 1].iter().all(|b| *b == 0));
	assert_eq!(H::from_u64(0), zero);

	assert_eq!(H::hash2(&one, &two), H::hash2(&one, &two));
	assert_ne!(H::hash2(&one, &two), H::hash2(&two, &one));
	assert_eq!(H::hash1(&one), H::hash1(&one));
	assert_ne!(H::hash1(&one), H::hash1(&two));
	assert_eq!(H::zero_leaf(), H::hash2(&zero, &zero));
	assert!(H::is_canonical(&zero));
	assert!(H::is_canonical(&one));
	assert!(H::is_canonical(&H::zero_leaf()));
	assert!(H::is_canonical(&H::hash2(&one, &two)));
}
