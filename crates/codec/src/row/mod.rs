// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Compiled row codecs.
//!
//! A codec is compiled once per prepared statement from its (normalized)
//! descriptor collection: one conversion record per column, each bound to
//! that column's offset, length, scale and null-indicator offset. The
//! compiled codec is then applied to every row buffer under that statement.
//! A codec compiled from descriptor set D is valid only for buffers laid
//! out exactly as D specifies.

mod decoder;
mod encoder;

pub use decoder::RowDecoder;
pub use encoder::RowEncoder;

use crate::{descriptor::ColumnDescriptor, sql_type::SqlType};

/// Wire value of the 2-byte null indicator when the column is NULL.
const NULL_INDICATOR: i16 = -1;

/// One column's conversion record, bound at compile time.
///
/// Dispatch happens on `sql_type` at application time; compilation itself
/// never fails, so a tag that normalization should have rewritten away
/// surfaces as an error from the first decode or encode that touches it.
#[derive(Copy, Clone, Debug)]
struct ColumnCodec {
	sql_type: SqlType,
	offset: usize,
	length: usize,
	#[allow(dead_code)]
	scale: i32,
	null_offset: usize,
}

impl ColumnCodec {
	fn bind(descriptor: &ColumnDescriptor) -> Self {
		Self {
			sql_type: descriptor.sql_type,
			offset: descriptor.offset,
			length: descriptor.length,
			scale: descriptor.scale,
			null_offset: descriptor.null_offset,
		}
	}
}

fn bind_columns(descriptors: &[ColumnDescriptor]) -> Vec<ColumnCodec> {
	descriptors.iter().map(ColumnCodec::bind).collect()
}
