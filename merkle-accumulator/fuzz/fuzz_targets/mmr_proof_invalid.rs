#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_accumulator_fuzz::{fuzz_mmr_proof_invalid, ProofMutation};

fuzz_target!(|input: (u16, u16, ProofMutation)| {
	fuzz_mmr_proof_invalid(input.0, input.1, input.2);
});
