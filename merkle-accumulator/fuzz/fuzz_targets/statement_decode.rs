#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_accumulator_fuzz::fuzz_statement_decode;

fuzz_target!(|data: &[u8]| {
	fuzz_statement_decode(data);
});
