// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// An owned byte string, the materialized form of an out-of-line blob.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes(Vec<u8>);

impl Bytes {
	pub fn new(data: Vec<u8>) -> Self {
		Self(data)
	}

	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Display for Bytes {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("0x")?;
		for byte in &self.0 {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(data: Vec<u8>) -> Self {
		Self(data)
	}
}

impl From<&[u8]> for Bytes {
	fn from(data: &[u8]) -> Self {
		Self(data.to_vec())
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accessors() {
		let bytes = Bytes::new(vec![1, 2, 3]);
		assert_eq!(bytes.as_bytes(), &[1, 2, 3]);
		assert_eq!(bytes.len(), 3);
		assert!(!bytes.is_empty());
		assert!(Bytes::empty().is_empty());
	}

	#[test]
	fn test_display_hex() {
		assert_eq!(Bytes::new(vec![0xDE, 0xAD, 0x01]).to_string(), "0xdead01");
		assert_eq!(Bytes::empty().to_string(), "0x");
	}

	#[test]
	fn test_into_vec() {
		let bytes = Bytes::from(&[9u8, 8][..]);
		assert_eq!(bytes.into_vec(), vec![9, 8]);
	}
}
