// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Multi-byte read/write primitives for row buffers.
//!
//! Row buffers arrive little-endian from the transport. The order is
//! resolved once at startup with [`ByteOrder::host`] and passed explicitly
//! into codec construction; it selects which raw primitives the codecs use
//! internally, never where the data comes from.

/// Byte order used to interpret multi-byte fields of a row buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteOrder {
	Little,
	Big,
}

impl ByteOrder {
	/// The byte order of the running host, resolved from the target.
	pub fn host() -> Self {
		if cfg!(target_endian = "little") {
			ByteOrder::Little
		} else {
			ByteOrder::Big
		}
	}

	pub fn read_i16(&self, buf: &[u8], offset: usize) -> i16 {
		let bytes = [buf[offset], buf[offset + 1]];
		match self {
			ByteOrder::Little => i16::from_le_bytes(bytes),
			ByteOrder::Big => i16::from_be_bytes(bytes),
		}
	}

	pub fn read_u16(&self, buf: &[u8], offset: usize) -> u16 {
		let bytes = [buf[offset], buf[offset + 1]];
		match self {
			ByteOrder::Little => u16::from_le_bytes(bytes),
			ByteOrder::Big => u16::from_be_bytes(bytes),
		}
	}

	pub fn read_i32(&self, buf: &[u8], offset: usize) -> i32 {
		let mut bytes = [0u8; 4];
		bytes.copy_from_slice(&buf[offset..offset + 4]);
		match self {
			ByteOrder::Little => i32::from_le_bytes(bytes),
			ByteOrder::Big => i32::from_be_bytes(bytes),
		}
	}

	pub fn read_u32(&self, buf: &[u8], offset: usize) -> u32 {
		let mut bytes = [0u8; 4];
		bytes.copy_from_slice(&buf[offset..offset + 4]);
		match self {
			ByteOrder::Little => u32::from_le_bytes(bytes),
			ByteOrder::Big => u32::from_be_bytes(bytes),
		}
	}

	pub fn read_f64(&self, buf: &[u8], offset: usize) -> f64 {
		let mut bytes = [0u8; 8];
		bytes.copy_from_slice(&buf[offset..offset + 8]);
		match self {
			ByteOrder::Little => f64::from_le_bytes(bytes),
			ByteOrder::Big => f64::from_be_bytes(bytes),
		}
	}

	pub fn write_i16(&self, buf: &mut [u8], offset: usize, value: i16) {
		let bytes = match self {
			ByteOrder::Little => value.to_le_bytes(),
			ByteOrder::Big => value.to_be_bytes(),
		};
		buf[offset..offset + 2].copy_from_slice(&bytes);
	}

	pub fn write_u16(&self, buf: &mut [u8], offset: usize, value: u16) {
		let bytes = match self {
			ByteOrder::Little => value.to_le_bytes(),
			ByteOrder::Big => value.to_be_bytes(),
		};
		buf[offset..offset + 2].copy_from_slice(&bytes);
	}

	pub fn write_i32(&self, buf: &mut [u8], offset: usize, value: i32) {
		let bytes = match self {
			ByteOrder::Little => value.to_le_bytes(),
			ByteOrder::Big => value.to_be_bytes(),
		};
		buf[offset..offset + 4].copy_from_slice(&bytes);
	}

	pub fn write_u32(&self, buf: &mut [u8], offset: usize, value: u32) {
		let bytes = match self {
			ByteOrder::Little => value.to_le_bytes(),
			ByteOrder::Big => value.to_be_bytes(),
		};
		buf[offset..offset + 4].copy_from_slice(&bytes);
	}

	pub fn write_f64(&self, buf: &mut [u8], offset: usize, value: f64) {
		let bytes = match self {
			ByteOrder::Little => value.to_le_bytes(),
			ByteOrder::Big => value.to_be_bytes(),
		};
		buf[offset..offset + 8].copy_from_slice(&bytes);
	}
}
