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

use arbitrary::Arbitrary;
use hash_scheme::HashScheme;
use keccak_scheme::KeccakScheme;
use merkle_accumulator::{
	DecimalCodec, FixedMerkleTree, InclusionStatement, MountainRange, ProofCodec, ScaleCodec,
};

type Digest = [u8; 32];

fn leaf(seed: u64) -> Digest {
	KeccakScheme::hash2(&KeccakScheme::from_u64(seed), &KeccakScheme::from_u64(!seed))
}

/// Leaf set and capacity of a fixed tree.
#[derive(Debug, Arbitrary)]
pub struct TreeInput {
	leaves: Vec<u16>,
	extra_capacity: u8,
	index: u16,
}

pub fn fuzz_fixed_tree_proof(input: TreeInput) {
	let leaves: Vec<Digest> = input.leaves.iter().take(512).map(|l| leaf(*l as u64)).collect();
	let capacity = leaves.len() + input.extra_capacity as usize;
	let tree = FixedMerkleTree::<KeccakScheme>::build(leaves, capacity).unwrap();
	if capacity == 0 {
		assert!(tree.root().is_err());
		return
	}
	let root = tree.root().unwrap();
	let index = input.index as usize % capacity;
	let proof = tree.prove(index).unwrap();
	assert_eq!(proof.len(), tree.depth());
	let leaf = *tree.leaf(index).unwrap();
	assert!(FixedMerkleTree::<KeccakScheme>::verify(&leaf, index, &proof, &root));

	let statement = InclusionStatement::for_tree(&tree, index).unwrap();
	let text = DecimalCodec::encode(&statement);
	let decoded: InclusionStatement<Digest> = DecimalCodec::decode(&text).unwrap();
	assert!(decoded.verify::<KeccakScheme>());
}

/// Every byte is a leaf; every leaf of the resulting range must prove.
pub fn fuzz_mmr_proof(data: &[u8]) {
	let mut mmr = MountainRange::<KeccakScheme>::new();
	let positions = mmr.append_batch(data.iter().take(256).map(|b| leaf(*b as u64)));
	if positions.is_empty() {
		assert!(mmr.root().is_err());
		return
	}
	assert_eq!(mmr.peaks().len() as u32, mmr.size().count_ones());
	let root = mmr.root().unwrap();
	for (byte, pos) in data.iter().zip(positions.iter()) {
		let proof = mmr.prove(*pos).unwrap();
		assert!(MountainRange::<KeccakScheme>::verify(&leaf(*byte as u64), *pos, &proof, &root));
	}
}

/// Alteration applied to a valid mountain range proof.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum ProofMutation {
	Position(u64),
	LastPos(u64),
	PeakIndex(u32),
	Sibling(u8, u8),
	Peak(u8, u8),
	DropSibling,
	ExtraSibling,
}

/// A proof altered in any way must not verify, nor panic.
pub fn fuzz_mmr_proof_invalid(size: u16, leaf_index: u16, mutation: ProofMutation) {
	let size = size % 1024 + 1;
	let mut mmr = MountainRange::<KeccakScheme>::new();
	let positions = mmr.append_batch((0..size as u64).map(leaf));
	let root = mmr.root().unwrap();
	let at = (leaf_index % size) as usize;
	let pos = positions[at];
	let mut proof = mmr.prove(pos).unwrap();
	let original = proof.clone();

	match mutation {
		ProofMutation::Position(p) => proof.position = p,
		ProofMutation::LastPos(l) => proof.last_pos = l,
		ProofMutation::PeakIndex(i) => proof.peak_index = i,
		ProofMutation::Sibling(i, b) if !proof.siblings.is_empty() => {
			let i = i as usize % proof.siblings.len();
			proof.siblings[i][b as usize % 32] ^= 1 << (b % 8);
		},
		ProofMutation::Peak(i, b) if !proof.other_peaks.is_empty() => {
			let i = i as usize % proof.other_peaks.len();
			proof.other_peaks[i][b as usize % 32] ^= 1 << (b % 8);
		},
		ProofMutation::DropSibling => {
			proof.siblings.pop();
		},
		ProofMutation::ExtraSibling => proof.siblings.push(leaf(0)),
		_ => (),
	}

	let valid = MountainRange::<KeccakScheme>::verify(&leaf(at as u64), proof.position, &proof, &root);
	assert_eq!(valid, proof == original);
}

/// Decoders must reject or accept without panicking, and accepted input must re-encode.
pub fn fuzz_statement_decode(data: &[u8]) {
	let binary = data.to_vec();
	if let Ok(statement) = <ScaleCodec as ProofCodec<Digest>>::decode(&binary) {
		assert_eq!(<ScaleCodec as ProofCodec<Digest>>::encode(&statement), binary);
		let _ = statement.verify::<KeccakScheme>();
	}
	if let Ok(text) = std::str::from_utf8(data) {
		if let Ok(statement) = <DecimalCodec as ProofCodec<Digest>>::decode(&text.to_string()) {
			let encoded = <DecimalCodec as ProofCodec<Digest>>::encode(&statement);
			assert_eq!(<DecimalCodec as ProofCodec<Digest>>::decode(&encoded).ok(), Some(statement));
		}
	}
}
