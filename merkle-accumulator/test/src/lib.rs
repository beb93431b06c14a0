// Copyright 2020, 2024 Parity Technologies
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

//! Tests for merkle-accumulator crate.

use hash_scheme::HashScheme;
use num_bigint::BigUint;
use rand::{rngs::SmallRng, RngCore, SeedableRng};

/// Apply a test method on every shipped hash scheme.
#[cfg(test)]
macro_rules! test_schemes {
	($test:ident, $test_internal:ident) => {
		#[test]
		fn $test() {
			eprintln!("Running with scheme `KeccakScheme`");
			$test_internal::<keccak_scheme::KeccakScheme>();
			eprintln!("Running with scheme `PedersenScheme`");
			$test_internal::<starknet_scheme::PedersenScheme>();
			eprintln!("Running with scheme `PoseidonScheme`");
			$test_internal::<starknet_scheme::PoseidonScheme>();
		}
	};
}

#[cfg(test)]
mod fixed_tree;

/// Commitment of a secret and a nullifier, as deposited leaves are built.
pub fn commitment<H: HashScheme>(secret: u64, nullifier: u64) -> H::Out {
	H::hash2(&H::from_u64(secret), &H::from_u64(nullifier))
}

/// `count` pseudo random commitments.
///
/// Leaves are commitments of small integers so they are valid digests for every scheme.
pub fn random_leaves<H: HashScheme>(seed: u64, count: usize) -> Vec<H::Out> {
	let mut rng = SmallRng::seed_from_u64(seed);
	(0..count).map(|_| commitment::<H>(rng.next_u64(), rng.next_u64())).collect()
}

/// Copy of `digest` with one bit flipped.
///
/// The lowest bit of the last byte is used so field element digests stay in range.
pub fn flip_bit<O: AsMut<[u8]> + Copy>(digest: &O) -> O {
	let mut flipped = *digest;
	let bytes = flipped.as_mut();
	let last = bytes.len() - 1;
	bytes[last] ^= 1;
	flipped
}

/// `digest` plus the Stark field modulus, an alias that reduces to the same field element.
pub fn add_stark_modulus(digest: &[u8; 32]) -> [u8; 32] {
	let modulus = BigUint::parse_bytes(
		b"800000000000011000000000000000000000000000000000000000000000001",
		16,
	)
	.unwrap();
	let bytes = (BigUint::from_bytes_be(digest) + modulus).to_bytes_be();
	let mut out = [0u8; 32];
	out[32 - bytes.len()..].copy_from_slice(&bytes);
	out
}

#[cfg(test)]
fn init_log() {
	let _ = env_logger::builder().is_test(true).try_init();
}
