// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::fmt::{Display, Formatter};

/// Wire type tags carried in column descriptors.
///
/// The first group survives metadata normalization and is what the row
/// codecs dispatch on; the second group only appears in raw descriptors and
/// is rewritten away before any codec is compiled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SqlType {
	/// Variable-length text with a 2-byte length prefix.
	Varying,
	/// 8-byte IEEE-754 floating point.
	Double,
	/// 4-byte packed time of day.
	TypeTime,
	/// 4-byte packed calendar date.
	TypeDate,
	/// Packed date and time halves, 8 bytes.
	Timestamp,
	/// Single byte, nonzero = true.
	Boolean,
	/// 8-byte reference to out-of-line data.
	Blob,
	/// Column is always NULL.
	Null,

	// Pre-normalization only.
	/// Fixed-length text; normalized to `Varying`.
	Text,
	/// 2-byte signed integer; normalized to `Double`.
	Short,
	/// 4-byte signed integer; normalized to `Double`.
	Long,
	/// 8-byte signed integer; normalized to `Double`.
	Int64,
	/// 4-byte floating point; normalized to `Double`.
	Float,
}

impl SqlType {
	/// The engine's numeric type code for this tag.
	pub fn code(&self) -> u16 {
		match self {
			SqlType::Varying => 448,
			SqlType::Text => 452,
			SqlType::Double => 480,
			SqlType::Float => 482,
			SqlType::Long => 496,
			SqlType::Short => 500,
			SqlType::Timestamp => 510,
			SqlType::Blob => 520,
			SqlType::TypeTime => 560,
			SqlType::TypeDate => 570,
			SqlType::Int64 => 580,
			SqlType::Boolean => 32764,
			SqlType::Null => 32766,
		}
	}

	pub fn from_code(code: u16) -> Option<SqlType> {
		match code {
			448 => Some(SqlType::Varying),
			452 => Some(SqlType::Text),
			480 => Some(SqlType::Double),
			482 => Some(SqlType::Float),
			496 => Some(SqlType::Long),
			500 => Some(SqlType::Short),
			510 => Some(SqlType::Timestamp),
			520 => Some(SqlType::Blob),
			560 => Some(SqlType::TypeTime),
			570 => Some(SqlType::TypeDate),
			580 => Some(SqlType::Int64),
			32764 => Some(SqlType::Boolean),
			32766 => Some(SqlType::Null),
			_ => None,
		}
	}

	/// Whether this tag can still appear after metadata normalization.
	pub fn is_normalized(&self) -> bool {
		!matches!(self, SqlType::Text | SqlType::Short | SqlType::Long | SqlType::Int64 | SqlType::Float)
	}
}

impl Display for SqlType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SqlType::Varying => f.write_str("VARCHAR"),
			SqlType::Text => f.write_str("CHAR"),
			SqlType::Double => f.write_str("DOUBLE PRECISION"),
			SqlType::Float => f.write_str("FLOAT"),
			SqlType::Long => f.write_str("INTEGER"),
			SqlType::Short => f.write_str("SMALLINT"),
			SqlType::Timestamp => f.write_str("TIMESTAMP"),
			SqlType::Blob => f.write_str("BLOB"),
			SqlType::TypeTime => f.write_str("TIME"),
			SqlType::TypeDate => f.write_str("DATE"),
			SqlType::Int64 => f.write_str("BIGINT"),
			SqlType::Boolean => f.write_str("BOOLEAN"),
			SqlType::Null => f.write_str("NULL"),
		}
	}
}
