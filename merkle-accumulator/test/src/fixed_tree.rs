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

use hash_scheme::HashScheme;
use hex_literal::hex;
use keccak_scheme::KeccakScheme;
use merkle_accumulator::{zero_hashes, Error, FixedMerkleTree};
use starknet_scheme::{PedersenScheme, PoseidonScheme};

use crate::{add_stark_modulus, commitment, flip_bit, init_log, random_leaves};

test_schemes!(single_deposit_capacity_16, single_deposit_capacity_16_internal);
fn single_deposit_capacity_16_internal<H: HashScheme>() {
	init_log();
	let leaf = commitment::<H>(10, 11);
	let tree = FixedMerkleTree::<H>::build(vec![leaf], 16).unwrap();
	assert_eq!(tree.depth(), 4);

	let root = tree.root().unwrap();
	let proof = tree.prove(0).unwrap();
	assert_eq!(proof.len(), 4);
	// Every sibling of the only deposit is an empty subtree.
	assert_eq!(proof.siblings, zero_hashes::<H>(3));
	assert!(FixedMerkleTree::<H>::verify(&leaf, 0, &proof, &root));
	assert!(!FixedMerkleTree::<H>::verify(&leaf, 1, &proof, &root));
	// 16 wraps to 0 on a four level path
	assert!(!FixedMerkleTree::<H>::verify(&leaf, 16, &proof, &root));
	assert!(!FixedMerkleTree::<H>::verify(&leaf, 16 * 3, &proof, &root));
}

#[test]
fn single_deposit_keccak_root() {
	let leaf = commitment::<KeccakScheme>(10, 11);
	assert_eq!(leaf, hex!("c47c2f4ab42fe2617dd76ca1eb9781d09fced5e5671df71824e2f8a8f694e024"));
	let tree = FixedMerkleTree::<KeccakScheme>::build(vec![leaf], 16).unwrap();
	assert_eq!(
		tree.root(),
		Ok(hex!("389bdde53ed9a6d2a12ec195b3720a80707061a826516b0bfbaccaf43fe6ef2e")),
	);
}

test_schemes!(every_index_round_trips, every_index_round_trips_internal);
fn every_index_round_trips_internal<H: HashScheme>() {
	for (capacity, leaf_count) in [(1, 1), (2, 1), (5, 5), (6, 4), (8, 8), (13, 9), (32, 20)] {
		let leaves = random_leaves::<H>(capacity as u64, leaf_count);
		let tree = FixedMerkleTree::<H>::build(leaves.clone(), capacity).unwrap();
		let root = tree.root().unwrap();
		for index in 0..capacity {
			let proof = tree.prove(index).unwrap();
			assert_eq!(proof.len(), tree.depth());
			let leaf = tree.leaf(index).unwrap();
			assert!(
				FixedMerkleTree::<H>::verify(leaf, index, &proof, &root),
				"capacity {} index {}",
				capacity,
				index,
			);
		}
		assert_eq!(
			tree.prove(capacity),
			Err(Error::IndexOutOfRange { index: capacity, capacity }),
		);
	}
}

test_schemes!(tampered_proofs_fail, tampered_proofs_fail_internal);
fn tampered_proofs_fail_internal<H: HashScheme>() {
	let leaves = random_leaves::<H>(7, 11);
	let tree = FixedMerkleTree::<H>::build(leaves.clone(), 16).unwrap();
	let root = tree.root().unwrap();
	let index = 6;
	let proof = tree.prove(index).unwrap();
	assert!(FixedMerkleTree::<H>::verify(&leaves[index], index, &proof, &root));

	for level in 0..proof.len() {
		let mut tampered = proof.clone();
		tampered.siblings[level] = flip_bit(&tampered.siblings[level]);
		assert!(!FixedMerkleTree::<H>::verify(&leaves[index], index, &tampered, &root));
	}
	assert!(!FixedMerkleTree::<H>::verify(&leaves[index + 1], index, &proof, &root));
	assert!(!FixedMerkleTree::<H>::verify(&flip_bit(&leaves[index]), index, &proof, &root));
	assert!(!FixedMerkleTree::<H>::verify(&leaves[index], index, &proof, &flip_bit(&root)));

	let mut short = proof.clone();
	short.siblings.pop();
	assert!(!FixedMerkleTree::<H>::verify(&leaves[index], index, &short, &root));
}

test_schemes!(build_is_deterministic, build_is_deterministic_internal);
fn build_is_deterministic_internal<H: HashScheme>() {
	let leaves = random_leaves::<H>(3, 10);
	let a = FixedMerkleTree::<H>::build(leaves.clone(), 10).unwrap();
	let b = FixedMerkleTree::<H>::build(leaves.clone(), 10).unwrap();
	assert_eq!(a.root(), b.root());
	assert_eq!(a.prove(9), b.prove(9));

	// padding is part of the commitment
	let wider = FixedMerkleTree::<H>::build(leaves, 16).unwrap();
	assert_ne!(a.root(), wider.root());
}

#[test]
fn failed_build_reports_sizes() {
	let leaves = random_leaves::<KeccakScheme>(1, 9);
	assert_eq!(
		FixedMerkleTree::<KeccakScheme>::build(leaves, 8).unwrap_err(),
		Error::InvalidCapacity { leaves: 9, capacity: 8 },
	);
	assert_eq!(
		FixedMerkleTree::<KeccakScheme>::build(Vec::new(), 0).unwrap().root(),
		Err(Error::EmptyTree),
	);
}

fn field_aliases_fail_internal<H: HashScheme<Out = [u8; 32]>>() {
	let leaves = random_leaves::<H>(3, 6);
	let tree = FixedMerkleTree::<H>::build(leaves.clone(), 8).unwrap();
	let root = tree.root().unwrap();
	let proof = tree.prove(2).unwrap();
	assert!(FixedMerkleTree::<H>::verify(&leaves[2], 2, &proof, &root));

	let alias = add_stark_modulus(&leaves[2]);
	assert!(!H::is_canonical(&alias));
	assert!(!FixedMerkleTree::<H>::verify(&alias, 2, &proof, &root));

	for i in 0..proof.len() {
		let mut bad = proof.clone();
		bad.siblings[i] = add_stark_modulus(&bad.siblings[i]);
		assert!(!FixedMerkleTree::<H>::verify(&leaves[2], 2, &bad, &root));
	}
}

#[test]
fn field_aliases_fail() {
	field_aliases_fail_internal::<PedersenScheme>();
	field_aliases_fail_internal::<PoseidonScheme>();
}
