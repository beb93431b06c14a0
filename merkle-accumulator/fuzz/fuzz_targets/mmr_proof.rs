#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_accumulator_fuzz::fuzz_mmr_proof;

fuzz_target!(|data: &[u8]| {
	fuzz_mmr_proof(data);
});
