// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use emberwire_type::{Error, Result, Timestamp, Value};
use tracing::debug;

use crate::{
	blob::BlobStream,
	byte_order::ByteOrder,
	descriptor::{BlobId, ColumnDescriptor},
	engine::{DateParts, Engine, TimeParts},
	row::{ColumnCodec, NULL_INDICATOR, bind_columns},
	sql_type::SqlType,
};

/// The values-to-buffer half of a compiled row codec.
pub struct RowEncoder {
	columns: Vec<ColumnCodec>,
	order: ByteOrder,
}

impl RowEncoder {
	/// Bind one conversion record per column of `descriptors`.
	pub fn compile(descriptors: &[ColumnDescriptor], order: ByteOrder) -> Self {
		debug!(columns = descriptors.len(), "compiling row encoder");
		Self {
			columns: bind_columns(descriptors),
			order,
		}
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// Write `values` into `buffer`, in ascending column order.
	///
	/// An arity mismatch fails before any column is processed. The null
	/// indicator is written only for null values; callers hand over zeroed
	/// buffers, so non-null columns keep the zero indicator.
	pub async fn encode<E: Engine>(
		&self,
		engine: &E,
		transaction: &E::Transaction,
		buffer: &mut [u8],
		values: &[Value],
	) -> Result<()> {
		if values.len() != self.columns.len() {
			return Err(Error::IncorrectParameterCount {
				expected: self.columns.len(),
				received: values.len(),
			});
		}

		for (index, (column, value)) in self.columns.iter().zip(values).enumerate() {
			self.encode_column(engine, transaction, buffer, index, column, value).await?;
		}
		Ok(())
	}

	async fn encode_column<E: Engine>(
		&self,
		engine: &E,
		transaction: &E::Transaction,
		buffer: &mut [u8],
		index: usize,
		column: &ColumnCodec,
		value: &Value,
	) -> Result<()> {
		let order = self.order;

		if value.is_null() {
			order.write_i16(buffer, column.null_offset, NULL_INDICATOR);
			return Ok(());
		}

		match column.sql_type {
			SqlType::Varying => {
				let Value::Text(text) = value else {
					return Err(mismatch(index, "text"));
				};
				let bytes = text.as_bytes();
				if bytes.len() > column.length {
					return Err(Error::OversizedValue {
						length: bytes.len(),
						max: column.length,
					});
				}
				order.write_u16(buffer, column.offset, bytes.len() as u16);
				buffer[column.offset + 2..column.offset + 2 + bytes.len()].copy_from_slice(bytes);
				Ok(())
			}
			SqlType::Double => {
				let Value::Number(number) = value else {
					return Err(mismatch(index, "number"));
				};
				order.write_f64(buffer, column.offset, *number);
				Ok(())
			}
			SqlType::TypeTime => {
				let Value::Timestamp(ts) = value else {
					return Err(mismatch(index, "timestamp"));
				};
				order.write_u32(buffer, column.offset, engine.encode_time(time_parts(ts)));
				Ok(())
			}
			SqlType::TypeDate => {
				let Value::Timestamp(ts) = value else {
					return Err(mismatch(index, "timestamp"));
				};
				order.write_i32(buffer, column.offset, engine.encode_date(date_parts(ts)));
				Ok(())
			}
			SqlType::Timestamp => {
				let Value::Timestamp(ts) = value else {
					return Err(mismatch(index, "timestamp"));
				};
				order.write_i32(buffer, column.offset, engine.encode_date(date_parts(ts)));
				order.write_u32(buffer, column.offset + 4, engine.encode_time(time_parts(ts)));
				Ok(())
			}
			SqlType::Boolean => {
				let Value::Boolean(flag) = value else {
					return Err(mismatch(index, "boolean"));
				};
				buffer[column.offset] = if *flag {
					1
				} else {
					0
				};
				Ok(())
			}
			SqlType::Blob => {
				let Value::Bytes(bytes) = value else {
					return Err(mismatch(index, "bytes"));
				};
				let mut stream = BlobStream::create(engine, transaction).await?;
				buffer[column.offset..column.offset + BlobId::SIZE].copy_from_slice(stream.id().as_bytes());

				// Whole value as one segment; close on every exit path,
				// with the write error winning over the close result.
				let written = stream.write(engine, bytes.as_bytes()).await;
				let closed = stream.close(engine).await;
				written?;
				closed?;
				Ok(())
			}
			SqlType::Null => Ok(()),
			other => Err(Error::UnrecognizedType {
				code: other.code(),
			}),
		}
	}
}

fn time_parts(ts: &Timestamp) -> TimeParts {
	TimeParts {
		hours: ts.hour(),
		minutes: ts.minute(),
		seconds: ts.second(),
		// Engine fractions are ten-thousandths of a second.
		fractions: ts.millisecond() * 10,
	}
}

fn date_parts(ts: &Timestamp) -> DateParts {
	DateParts {
		year: ts.year(),
		// The wire carries 1-based months.
		month: ts.month0() + 1,
		day: ts.day(),
	}
}

fn mismatch(column: usize, expected: &'static str) -> Error {
	Error::ValueTypeMismatch {
		column,
		expected,
	}
}
