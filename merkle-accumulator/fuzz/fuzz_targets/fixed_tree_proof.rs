#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_accumulator_fuzz::{fuzz_fixed_tree_proof, TreeInput};

fuzz_target!(|input: TreeInput| {
	fuzz_fixed_tree_proof(input);
});
