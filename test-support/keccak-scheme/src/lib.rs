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

//! `HashScheme` implementation for the Keccak-256 hash

#![cfg_attr(not(feature = "std"), no_std)]

use hash256_std_hasher::Hash256StdHasher;
use hash_scheme::HashScheme;
use tiny_keccak::{Hasher as _, Keccak};

/// The `Keccak` digest type.
pub type KeccakDigest = [u8; 32];

/// Concrete `HashScheme` impl for the Keccak-256 hash.
///
/// `hash2` hashes the concatenation of both inputs.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct KeccakScheme;

impl HashScheme for KeccakScheme {
	type Out = KeccakDigest;

	type StdHasher = Hash256StdHasher;

	const LENGTH: usize = 32;

	fn hash1(x: &Self::Out) -> Self::Out {
		let mut keccak = Keccak::v256();
		keccak.update(x);
		let mut out = [0u8; 32];
		keccak.finalize(&mut out);
		out
	}

	fn hash2(a: &Self::Out, b: &Self::Out) -> Self::Out {
		let mut keccak = Keccak::v256();
		keccak.update(a);
		keccak.update(b);
		let mut out = [0u8; 32];
		keccak.finalize(&mut out);
		out
	}
}
