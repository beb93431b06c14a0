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

//! SCALE binary rendering of statements.

use super::{DecodeError, InclusionStatement, ProofCodec};
use crate::rstd::{result::Result, vec::Vec};
use parity_scale_codec::{Decode, DecodeAll, Encode};

/// SCALE encoding of an [`InclusionStatement`].
///
/// Fixed size digests are written as is, sequences carry a compact length prefix and the mountain
/// range part is an option (one tag byte).
pub struct ScaleCodec;

impl<O: Encode + Decode> ProofCodec<O> for ScaleCodec {
	type Encoded = Vec<u8>;
	type Error = DecodeError;

	fn encode(statement: &InclusionStatement<O>) -> Vec<u8> {
		statement.encode()
	}

	fn decode(encoded: &Vec<u8>) -> Result<InclusionStatement<O>, DecodeError> {
		Ok(InclusionStatement::decode_all(&mut &encoded[..])?)
	}
}
