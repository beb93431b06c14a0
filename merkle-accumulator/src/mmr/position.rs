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

//! Node position arithmetic.
//!
//! Positions are 1-based and follow post-order inside each mountain:
//!
//! ```text
//! Height 2:        7
//!                /   \
//! Height 1:     3     6
//!              / \   / \
//! Height 0:   1   2 4   5   8
//! ```

use crate::rstd::vec::Vec;

fn bit_length(value: u64) -> u32 {
	u64::BITS - value.leading_zeros()
}

fn all_ones(value: u64) -> bool {
	value != 0 && value & (value + 1) == 0
}

/// Height of the node at `pos`, leaves are at height 0.
///
/// `pos` must be non zero.
pub fn pos_height(pos: u64) -> u32 {
	debug_assert!(pos > 0);
	let mut pos = pos;
	// Jump to the leftmost node at the same height, which sits on the left edge of a perfect
	// tree and has an all ones position.
	while !all_ones(pos) {
		pos -= (1u64 << (bit_length(pos) - 1)) - 1;
	}
	bit_length(pos) - 1
}

/// Distance between a node at `height` and its sibling.
pub(crate) fn sibling_offset(height: u32) -> u64 {
	(1u64 << (height + 1)) - 1
}

/// Is the node at `pos`, of height `height`, a right child?
pub(crate) fn is_right_child(pos: u64, height: u32) -> bool {
	pos_height(pos + 1) > height
}

/// Positions of the peaks of a mountain range with `last_pos` nodes, oldest first.
///
/// Returns `None` when no mountain range has exactly `last_pos` nodes.
pub fn peak_positions(last_pos: u64) -> Option<Vec<u64>> {
	let mut peaks = Vec::new();
	let mut remaining = last_pos;
	let mut offset = 0u64;
	let mut previous_size = u64::MAX;
	while remaining > 0 {
		// Largest perfect tree (2^k - 1 nodes) fitting in `remaining`.
		let mut size = u64::MAX >> remaining.leading_zeros();
		if size > remaining {
			size >>= 1;
		}
		if size >= previous_size {
			return None
		}
		offset += size;
		peaks.push(offset);
		remaining -= size;
		previous_size = size;
	}
	Some(peaks)
}

/// Position of the leaf with 0-based insertion index `leaf_index`.
pub fn leaf_position(leaf_index: u64) -> u64 {
	2 * leaf_index - leaf_index.count_ones() as u64 + 1
}

/// Number of nodes in a mountain range holding `leaf_count` leaves.
pub(crate) fn node_count(leaf_count: u64) -> u64 {
	2 * leaf_count - leaf_count.count_ones() as u64
}
