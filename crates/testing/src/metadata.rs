// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use emberwire_codec::{ColumnDescriptor, MetadataBuilder, SqlType, StatementMetadata};
use emberwire_type::{Error, Result};

/// Shared flag proving a metadata collection was released (dropped).
#[derive(Clone, Debug, Default)]
pub struct ReleaseFlag(Arc<AtomicBool>);

impl ReleaseFlag {
	pub fn get(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}

	fn set(&self) {
		self.0.store(true, Ordering::Relaxed);
	}
}

#[derive(Copy, Clone, Debug)]
struct ColumnSpec {
	sql_type: SqlType,
	length: usize,
	scale: i32,
}

/// In-memory statement metadata with the engine's rebuild semantics:
/// offsets are recomputed from the column specs on every build.
#[derive(Debug)]
pub struct MockMetadata {
	specs: Vec<ColumnSpec>,
	columns: Vec<ColumnDescriptor>,
	released: ReleaseFlag,
}

impl MockMetadata {
	/// Build from `(sql_type, length, scale)` triples.
	pub fn new(specs: &[(SqlType, usize, i32)]) -> Self {
		let specs: Vec<ColumnSpec> = specs
			.iter()
			.map(|(sql_type, length, scale)| ColumnSpec {
				sql_type: *sql_type,
				length: *length,
				scale: *scale,
			})
			.collect();
		Self::from_specs(specs)
	}

	fn from_specs(specs: Vec<ColumnSpec>) -> Self {
		let columns = Self::layout(&specs);
		Self {
			specs,
			columns,
			released: ReleaseFlag::default(),
		}
	}

	/// Total row buffer size for this layout.
	pub fn row_size(&self) -> usize {
		match (self.specs.last(), self.columns.last()) {
			(Some(spec), Some(column)) => column.offset + Self::value_size(spec),
			_ => 0,
		}
	}

	pub fn release_flag(&self) -> ReleaseFlag {
		self.released.clone()
	}

	// Per column: 2-byte null indicator, then the value region.
	fn layout(specs: &[ColumnSpec]) -> Vec<ColumnDescriptor> {
		let mut offset = 0;
		specs.iter()
			.map(|spec| {
				let null_offset = offset;
				let value_offset = offset + 2;
				offset = value_offset + Self::value_size(spec);
				ColumnDescriptor {
					sql_type: spec.sql_type,
					offset: value_offset,
					length: spec.length,
					scale: spec.scale,
					null_offset,
				}
			})
			.collect()
	}

	fn value_size(spec: &ColumnSpec) -> usize {
		match spec.sql_type {
			// Declared length plus the 2-byte length prefix.
			SqlType::Varying => spec.length + 2,
			SqlType::Text => spec.length,
			SqlType::Double | SqlType::Int64 | SqlType::Timestamp | SqlType::Blob => 8,
			SqlType::TypeTime | SqlType::TypeDate | SqlType::Long | SqlType::Float => 4,
			SqlType::Short => 2,
			SqlType::Boolean => 1,
			SqlType::Null => 0,
		}
	}
}

impl Drop for MockMetadata {
	fn drop(&mut self) {
		self.released.set();
	}
}

impl StatementMetadata for MockMetadata {
	type Builder = MockMetadataBuilder;

	fn column_count(&self) -> usize {
		self.columns.len()
	}

	fn column(&self, index: usize) -> ColumnDescriptor {
		self.columns[index]
	}

	fn builder(&self) -> Result<MockMetadataBuilder> {
		Ok(MockMetadataBuilder {
			specs: self.specs.clone(),
		})
	}
}

/// Rebuild surface over [`MockMetadata`].
#[derive(Debug)]
pub struct MockMetadataBuilder {
	specs: Vec<ColumnSpec>,
}

impl MockMetadataBuilder {
	fn spec_mut(&mut self, index: usize) -> Result<&mut ColumnSpec> {
		let count = self.specs.len();
		self.specs.get_mut(index).ok_or_else(|| {
			Error::Engine(format!("column index {} out of range for {} columns", index, count))
		})
	}
}

impl MetadataBuilder for MockMetadataBuilder {
	type Metadata = MockMetadata;

	fn set_type(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
		self.spec_mut(index)?.sql_type = sql_type;
		Ok(())
	}

	fn set_length(&mut self, index: usize, length: usize) -> Result<()> {
		self.spec_mut(index)?.length = length;
		Ok(())
	}

	fn set_scale(&mut self, index: usize, scale: i32) -> Result<()> {
		self.spec_mut(index)?.scale = scale;
		Ok(())
	}

	fn build(self) -> Result<MockMetadata> {
		Ok(MockMetadata::from_specs(self.specs))
	}
}

#[cfg(test)]
mod tests {
	use emberwire_codec::{MetadataBuilder, SqlType, StatementMetadata};

	use super::MockMetadata;

	#[test]
	fn test_layout_interleaves_null_indicators() {
		let metadata = MockMetadata::new(&[(SqlType::Varying, 10, 0), (SqlType::Boolean, 1, 0)]);

		let first = metadata.column(0);
		assert_eq!(first.null_offset, 0);
		assert_eq!(first.offset, 2);

		let second = metadata.column(1);
		assert_eq!(second.null_offset, 14); // 2 + (10 + 2)
		assert_eq!(second.offset, 16);

		assert_eq!(metadata.row_size(), 17);
	}

	#[test]
	fn test_rebuild_recomputes_offsets() {
		let metadata = MockMetadata::new(&[(SqlType::Short, 2, 0), (SqlType::Boolean, 1, 0)]);
		assert_eq!(metadata.column(1).offset, 6);

		let mut builder = metadata.builder().unwrap();
		builder.set_type(0, SqlType::Double).unwrap();
		builder.set_length(0, 8).unwrap();
		let rebuilt = builder.build().unwrap();

		assert_eq!(rebuilt.column(1).offset, 12);
	}

	#[test]
	fn test_builder_rejects_out_of_range_index() {
		let metadata = MockMetadata::new(&[(SqlType::Boolean, 1, 0)]);
		let mut builder = metadata.builder().unwrap();
		assert!(builder.set_type(5, SqlType::Double).is_err());
	}

	#[test]
	fn test_release_flag_set_on_drop() {
		let metadata = MockMetadata::new(&[(SqlType::Boolean, 1, 0)]);
		let flag = metadata.release_flag();
		assert!(!flag.get());
		drop(metadata);
		assert!(flag.get());
	}
}
