// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod bytes;
mod timestamp;

pub use bytes::Bytes;
pub use timestamp::Timestamp;

/// A marshaled column value, represented as a native Rust type.
///
/// The variant space is closed by design: metadata normalization collapses
/// the engine's wire types into exactly what is representable here before
/// any codec is compiled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// SQL NULL.
	Null,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte floating point. All numeric columns normalize to this.
	Number(f64),
	/// A UTF-8 encoded text.
	Text(String),
	/// A calendar date with time of day, millisecond precision.
	Timestamp(Timestamp),
	/// Out-of-line binary data, fully materialized.
	Bytes(Bytes),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn boolean(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn number(v: impl Into<f64>) -> Self {
		Value::Number(v.into())
	}

	pub fn text(v: impl Into<String>) -> Self {
		Value::Text(v.into())
	}

	pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
		Value::Bytes(Bytes::new(v.into()))
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Name of the variant, as used in mismatch diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Boolean(_) => "boolean",
			Value::Number(_) => "number",
			Value::Text(_) => "text",
			Value::Timestamp(_) => "timestamp",
			Value::Bytes(_) => "bytes",
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Boolean(v) => write!(f, "{}", v),
			Value::Number(v) => write!(f, "{}", v),
			Value::Text(v) => f.write_str(v),
			Value::Timestamp(v) => write!(f, "{}", v),
			Value::Bytes(v) => write!(f, "{}", v),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Number(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Text(v)
	}
}

impl From<Timestamp> for Value {
	fn from(v: Timestamp) -> Self {
		Value::Timestamp(v)
	}
}

impl From<Bytes> for Value {
	fn from(v: Bytes) -> Self {
		Value::Bytes(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(Bytes::new(v))
	}
}
