// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Info-request sub-protocol helpers.

/// Blob info item tags understood by the engine.
pub mod blob_info {
	/// Total length of the blob, in bytes.
	pub const TOTAL_LENGTH: u8 = 6;
}

/// Read a portable-encoded integer: byte-wise little-endian accumulation,
/// independent of host order. `length` must be at most 8.
pub fn portable_integer(buf: &[u8], length: usize) -> u64 {
	debug_assert!(length <= 8);
	let mut value = 0u64;
	for (index, byte) in buf.iter().take(length).enumerate() {
		value |= (*byte as u64) << (index * 8);
	}
	value
}
