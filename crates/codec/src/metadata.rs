// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Descriptor normalization.
//!
//! Rewrites a raw descriptor collection into the canonical type space the
//! row codecs are compiled against: fixed-length text becomes
//! variable-length text, and every narrow numeric type becomes
//! double-precision floating point with scale zero. The trade is precision
//! and storage compactness for a small, uniform codec surface.

use emberwire_type::Result;
use tracing::debug;

use crate::{
	engine::{MetadataBuilder, StatementMetadata},
	sql_type::SqlType,
};

/// Rewrite `metadata` into the normalized type space.
///
/// Consumes the original collection; after this returns, only the rebuilt
/// collection is live. Any engine error during the rebuild aborts statement
/// preparation and is not retried.
pub fn normalize_metadata<M: StatementMetadata>(metadata: M) -> Result<M> {
	let mut builder = metadata.builder()?;

	for index in (0..metadata.column_count()).rev() {
		match metadata.column(index).sql_type {
			SqlType::Text => {
				builder.set_type(index, SqlType::Varying)?;
			}
			SqlType::Short | SqlType::Long | SqlType::Int64 | SqlType::Float => {
				builder.set_type(index, SqlType::Double)?;
				builder.set_length(index, 8)?;
				builder.set_scale(index, 0)?;
			}
			_ => {}
		}
	}

	let rebuilt = builder.build()?;
	debug!(columns = rebuilt.column_count(), "normalized statement metadata");
	Ok(rebuilt)
}
