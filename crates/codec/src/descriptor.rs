// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use crate::sql_type::SqlType;

/// Per-column metadata, read once from statement metadata at prepare time.
///
/// Immutable for the statement's lifetime; the normalizer and the codec
/// compilers only ever borrow it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
	pub sql_type: SqlType,
	/// Byte offset of the value region inside the row buffer.
	pub offset: usize,
	/// Declared byte length of the value region.
	pub length: usize,
	/// Decimal scale. Forced to zero by normalization for numeric columns.
	pub scale: i32,
	/// Byte offset of the 2-byte signed null indicator.
	pub null_offset: usize,
}

/// An 8-byte opaque reference to out-of-line blob data.
///
/// This is what actually sits at a blob column's offset in the row buffer;
/// the data itself is reached through a [`BlobStream`](crate::BlobStream).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlobId(pub [u8; 8]);

impl BlobId {
	pub const SIZE: usize = 8;

	pub fn from_slice(bytes: &[u8]) -> Self {
		let mut id = [0u8; Self::SIZE];
		id.copy_from_slice(&bytes[..Self::SIZE]);
		Self(id)
	}

	pub fn as_bytes(&self) -> &[u8; 8] {
		&self.0
	}
}
