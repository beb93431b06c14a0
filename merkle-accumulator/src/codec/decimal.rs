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

//! Decimal text rendering of statements.
//!
//! Digests are read as big-endian unsigned integers and written in base 10, which for field element
//! digests is the usual way verifier calldata is written by hand:
//!
//! ```text
//! tree: [leaf, root, index, [s0, s1, ...]]
//! mmr:  [leaf, root, position, last_pos, [p0, p1, ...], [s0, s1, ...]]
//! ```
//!
//! The fourth element picks the statement kind: a number is the node count of a mountain range,
//! a list is the sibling path of a fixed tree.

use super::{DecodeError, InclusionStatement, MmrExtra, ProofCodec};
use crate::rstd::{result::Result, string::String, vec::Vec};
use num_bigint::BigUint;

/// Decimal list encoding of an [`InclusionStatement`].
pub struct DecimalCodec;

impl<O> ProofCodec<O> for DecimalCodec
where
	O: AsRef<[u8]> + AsMut<[u8]> + Default,
{
	type Encoded = String;
	type Error = DecodeError;

	fn encode(statement: &InclusionStatement<O>) -> String {
		let mut out = String::new();
		out.push('[');
		push_bytes(&mut out, statement.leaf.as_ref());
		out.push_str(", ");
		push_bytes(&mut out, statement.root.as_ref());
		out.push_str(", ");
		push_bytes(&mut out, &statement.index.to_be_bytes());
		out.push_str(", ");
		if let Some(extra) = &statement.mmr {
			push_bytes(&mut out, &extra.last_pos.to_be_bytes());
			out.push_str(", ");
			push_list(&mut out, &extra.peaks);
			out.push_str(", ");
		}
		push_list(&mut out, &statement.siblings);
		out.push(']');
		out
	}

	fn decode(encoded: &String) -> Result<InclusionStatement<O>, DecodeError> {
		let mut parser = Parser { input: encoded.as_bytes(), at: 0 };
		parser.expect(b'[')?;
		let leaf = parser.digest()?;
		parser.expect(b',')?;
		let root = parser.digest()?;
		parser.expect(b',')?;
		let index = parser.integer()?;
		parser.expect(b',')?;
		let mmr = if parser.peek() == Some(b'[') {
			None
		} else {
			let last_pos = parser.integer()?;
			parser.expect(b',')?;
			let peaks = parser.list()?;
			parser.expect(b',')?;
			Some(MmrExtra { last_pos, peaks })
		};
		let siblings = parser.list()?;
		parser.expect(b']')?;
		parser.finish()?;
		Ok(InclusionStatement { leaf, index, siblings, mmr, root })
	}
}

fn push_list<O: AsRef<[u8]>>(out: &mut String, items: &[O]) {
	out.push('[');
	for (i, item) in items.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		push_bytes(out, item.as_ref());
	}
	out.push(']');
}

/// Write a big-endian unsigned integer in base 10.
fn push_bytes(out: &mut String, bytes: &[u8]) {
	out.push_str(&BigUint::from_bytes_be(bytes).to_str_radix(10));
}

/// Read base 10 `digits`, found at offset `at`, into the big-endian integer `out`.
fn read_bytes(digits: &[u8], at: usize, out: &mut [u8]) -> Result<(), DecodeError> {
	let value = BigUint::parse_bytes(digits, 10).ok_or(DecodeError::InvalidNumber(at))?;
	let bytes = value.to_bytes_be();
	if bytes.len() > out.len() {
		return Err(DecodeError::Overflow)
	}
	let (high, low) = out.split_at_mut(out.len() - bytes.len());
	high.iter_mut().for_each(|byte| *byte = 0);
	low.copy_from_slice(&bytes);
	Ok(())
}

struct Parser<'a> {
	input: &'a [u8],
	at: usize,
}

impl<'a> Parser<'a> {
	fn peek(&mut self) -> Option<u8> {
		while self.input.get(self.at).map_or(false, |c| c.is_ascii_whitespace()) {
			self.at += 1;
		}
		self.input.get(self.at).copied()
	}

	fn expect(&mut self, token: u8) -> Result<(), DecodeError> {
		match self.peek() {
			Some(c) if c == token => {
				self.at += 1;
				Ok(())
			},
			Some(_) => Err(DecodeError::UnexpectedToken(self.at)),
			None => Err(DecodeError::UnexpectedEnd),
		}
	}

	fn number(&mut self) -> Result<(&'a [u8], usize), DecodeError> {
		let start = match self.peek() {
			Some(c) if c.is_ascii_digit() => self.at,
			Some(c) if c.is_ascii_alphanumeric() => return Err(DecodeError::InvalidNumber(self.at)),
			Some(_) => return Err(DecodeError::UnexpectedToken(self.at)),
			None => return Err(DecodeError::UnexpectedEnd),
		};
		while self.input.get(self.at).map_or(false, |c| c.is_ascii_digit()) {
			self.at += 1;
		}
		if self.input.get(self.at).map_or(false, |c| c.is_ascii_alphanumeric()) {
			return Err(DecodeError::InvalidNumber(start))
		}
		Ok((&self.input[start..self.at], start))
	}

	fn digest<O: AsMut<[u8]> + Default>(&mut self) -> Result<O, DecodeError> {
		let (digits, at) = self.number()?;
		let mut out = O::default();
		read_bytes(digits, at, out.as_mut())?;
		Ok(out)
	}

	fn integer(&mut self) -> Result<u64, DecodeError> {
		let bytes: [u8; 8] = self.digest()?;
		Ok(u64::from_be_bytes(bytes))
	}

	fn list<O: AsMut<[u8]> + Default>(&mut self) -> Result<Vec<O>, DecodeError> {
		self.expect(b'[')?;
		let mut items = Vec::new();
		if self.peek() == Some(b']') {
			self.at += 1;
			return Ok(items)
		}
		loop {
			items.push(self.digest()?);
			match self.peek() {
				Some(b',') => self.at += 1,
				Some(b']') => {
					self.at += 1;
					return Ok(items)
				},
				Some(_) => return Err(DecodeError::UnexpectedToken(self.at)),
				None => return Err(DecodeError::UnexpectedEnd),
			}
		}
	}

	fn finish(&mut self) -> Result<(), DecodeError> {
		match self.peek() {
			Some(_) => Err(DecodeError::TrailingData),
			None => Ok(()),
		}
	}
}
