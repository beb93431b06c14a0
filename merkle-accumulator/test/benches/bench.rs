// Copyright 2017, 2018, 2024 Parity Technologies
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

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Bencher, Criterion};

use keccak_scheme::KeccakScheme;
use merkle_accumulator::{
	DecimalCodec, FixedMerkleTree, InclusionStatement, MountainRange, ProofCodec, ScaleCodec,
};
use merkle_accumulator_test::random_leaves;
use starknet_scheme::{PedersenScheme, PoseidonScheme};

criterion_group!(
	benches,
	tree_build_keccak,
	tree_build_poseidon,
	tree_proof_verification,
	mmr_append_keccak,
	mmr_append_pedersen,
	mmr_proof_verification,
	statement_codecs,
);
criterion_main!(benches);

fn tree_build_keccak(c: &mut Criterion) {
	let leaves = random_leaves::<KeccakScheme>(29, 1000);
	c.bench_function("tree_build_keccak", move |b: &mut Bencher| {
		b.iter(|| {
			let tree = FixedMerkleTree::<KeccakScheme>::build(leaves.clone(), 1024).unwrap();
			black_box(tree.root().unwrap());
		})
	});
}

fn tree_build_poseidon(c: &mut Criterion) {
	let leaves = random_leaves::<PoseidonScheme>(29, 100);
	c.bench_function("tree_build_poseidon", move |b: &mut Bencher| {
		b.iter(|| {
			let tree = FixedMerkleTree::<PoseidonScheme>::build(leaves.clone(), 128).unwrap();
			black_box(tree.root().unwrap());
		})
	});
}

fn tree_proof_verification(c: &mut Criterion) {
	let leaves = random_leaves::<KeccakScheme>(29, 1 << 12);
	let tree = FixedMerkleTree::<KeccakScheme>::build(leaves.clone(), 1 << 12).unwrap();
	let root = tree.root().unwrap();
	let proofs: Vec<_> = (0..64).map(|i| (i * 61, tree.prove(i * 61).unwrap())).collect();

	c.bench_function("tree_proof_verification", move |b: &mut Bencher| {
		b.iter(|| {
			for (index, proof) in proofs.iter() {
				assert!(FixedMerkleTree::<KeccakScheme>::verify(
					&leaves[*index],
					*index,
					proof,
					&root
				));
			}
		})
	});
}

fn mmr_append_keccak(c: &mut Criterion) {
	let leaves = random_leaves::<KeccakScheme>(29, 10_000);
	c.bench_function("mmr_append_keccak", move |b: &mut Bencher| {
		b.iter_batched(
			|| leaves.clone(),
			|leaves| {
				let mut mmr = MountainRange::<KeccakScheme>::new();
				mmr.append_batch(leaves);
				black_box(mmr.root().unwrap());
			},
			BatchSize::SmallInput,
		)
	});
}

fn mmr_append_pedersen(c: &mut Criterion) {
	let leaves = random_leaves::<PedersenScheme>(29, 100);
	c.bench_function("mmr_append_pedersen", move |b: &mut Bencher| {
		b.iter_batched(
			|| leaves.clone(),
			|leaves| {
				let mut mmr = MountainRange::<PedersenScheme>::new();
				mmr.append_batch(leaves);
				black_box(mmr.root().unwrap());
			},
			BatchSize::SmallInput,
		)
	});
}

fn mmr_proof_verification(c: &mut Criterion) {
	let leaves = random_leaves::<KeccakScheme>(29, 5000);
	let mut mmr = MountainRange::<KeccakScheme>::new();
	let positions = mmr.append_batch(leaves.clone());
	let root = mmr.root().unwrap();
	let proofs: Vec<_> = positions
		.iter()
		.step_by(79)
		.map(|pos| mmr.prove(*pos).unwrap())
		.collect();
	let items: Vec<_> = leaves.iter().step_by(79).copied().collect();

	c.bench_function("mmr_proof_verification", move |b: &mut Bencher| {
		b.iter(|| {
			for (leaf, proof) in items.iter().zip(proofs.iter()) {
				assert!(MountainRange::<KeccakScheme>::verify(leaf, proof.position, proof, &root));
			}
		})
	});
}

fn statement_codecs(c: &mut Criterion) {
	let mut mmr = MountainRange::<KeccakScheme>::new();
	mmr.append_batch(random_leaves::<KeccakScheme>(29, 1000));
	let statement = InclusionStatement::for_mountain_range(&mmr, 1).unwrap();
	let binary = ScaleCodec::encode(&statement);
	let text = DecimalCodec::encode(&statement);

	c.bench_function("statement_scale_decode", |b: &mut Bencher| {
		b.iter(|| {
			let decoded: InclusionStatement<[u8; 32]> = ScaleCodec::decode(&binary).unwrap();
			black_box(decoded);
		})
	});
	c.bench_function("statement_decimal_decode", |b: &mut Bencher| {
		b.iter(|| {
			let decoded: InclusionStatement<[u8; 32]> = DecimalCodec::decode(&text).unwrap();
			black_box(decoded);
		})
	});
	c.bench_function("statement_decimal_encode", |b: &mut Bencher| {
		b.iter(|| black_box(DecimalCodec::encode(&statement)))
	});
}
