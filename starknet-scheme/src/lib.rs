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

//! `HashScheme` implementations for the Stark field hash families.
//!
//! Digests are 32 byte big-endian encodings of field elements. Inputs at or
//! above the field modulus are reduced when converted, and are reported as not
//! canonical so verifiers can refuse them.

use hash256_std_hasher::Hash256StdHasher;
use hash_scheme::HashScheme;
use starknet_crypto::{pedersen_hash, poseidon_hash, poseidon_hash_single, Felt};

/// Digest of a Stark field element.
pub type FeltDigest = [u8; 32];

/// Convert a digest into a field element.
pub fn to_felt(digest: &FeltDigest) -> Felt {
	Felt::from_bytes_be(digest)
}

/// Is `digest` the encoding of a field element, below the modulus?
pub fn is_felt(digest: &FeltDigest) -> bool {
	from_felt(&to_felt(digest)) == *digest
}

/// Convert a field element into a digest.
pub fn from_felt(felt: &Felt) -> FeltDigest {
	felt.to_bytes_be()
}

/// Pedersen hash over the Stark curve.
///
/// `hash1(x)` is `pedersen(x, 0)`.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PedersenScheme;

impl HashScheme for PedersenScheme {
	type Out = FeltDigest;

	type StdHasher = Hash256StdHasher;

	const LENGTH: usize = 32;

	fn is_canonical(x: &Self::Out) -> bool {
		is_felt(x)
	}

	fn hash1(x: &Self::Out) -> Self::Out {
		from_felt(&pedersen_hash(&to_felt(x), &Felt::ZERO))
	}

	fn hash2(a: &Self::Out, b: &Self::Out) -> Self::Out {
		from_felt(&pedersen_hash(&to_felt(a), &to_felt(b)))
	}
}

/// Poseidon hash (Starknet parameters).
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PoseidonScheme;

impl HashScheme for PoseidonScheme {
	type Out = FeltDigest;

	type StdHasher = Hash256StdHasher;

	const LENGTH: usize = 32;

	fn is_canonical(x: &Self::Out) -> bool {
		is_felt(x)
	}

	fn hash1(x: &Self::Out) -> Self::Out {
		from_felt(&poseidon_hash_single(to_felt(x)))
	}

	fn hash2(a: &Self::Out, b: &Self::Out) -> Self::Out {
		from_felt(&poseidon_hash(to_felt(a), to_felt(b)))
	}
}
