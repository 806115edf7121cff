// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use emberwire_type::{Bytes, Error, Result, Timestamp, Value};
use tracing::{debug, trace};

use crate::{
	blob::BlobStream,
	byte_order::ByteOrder,
	descriptor::{BlobId, ColumnDescriptor},
	engine::Engine,
	row::{ColumnCodec, NULL_INDICATOR, bind_columns},
	sql_type::SqlType,
};

/// The buffer-to-values half of a compiled row codec.
pub struct RowDecoder {
	columns: Vec<ColumnCodec>,
	order: ByteOrder,
}

impl RowDecoder {
	/// Bind one conversion record per column of `descriptors`.
	pub fn compile(descriptors: &[ColumnDescriptor], order: ByteOrder) -> Self {
		debug!(columns = descriptors.len(), "compiling row decoder");
		Self {
			columns: bind_columns(descriptors),
			order,
		}
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// Convert one row buffer into values, in ascending column order.
	///
	/// Blob columns suspend on engine fetches; a blob column's whole
	/// segment loop, including the stream close, completes before the next
	/// column converts, and result order always matches column order.
	pub async fn decode<E: Engine>(
		&self,
		engine: &E,
		transaction: &E::Transaction,
		buffer: &[u8],
	) -> Result<Vec<Value>> {
		let mut values = Vec::with_capacity(self.columns.len());
		for column in &self.columns {
			values.push(self.decode_column(engine, transaction, buffer, column).await?);
		}
		Ok(values)
	}

	async fn decode_column<E: Engine>(
		&self,
		engine: &E,
		transaction: &E::Transaction,
		buffer: &[u8],
		column: &ColumnCodec,
	) -> Result<Value> {
		let order = self.order;

		if order.read_i16(buffer, column.null_offset) == NULL_INDICATOR {
			return Ok(Value::Null);
		}

		match column.sql_type {
			// Text never reaches here: normalization rewrites it to Varying.
			SqlType::Varying => {
				let len = order.read_u16(buffer, column.offset) as usize;
				let bytes = &buffer[column.offset + 2..column.offset + 2 + len];
				Ok(Value::Text(String::from_utf8_lossy(bytes).into_owned()))
			}
			SqlType::Double => Ok(Value::Number(order.read_f64(buffer, column.offset))),
			SqlType::TypeTime => {
				let time = engine.decode_time(order.read_u32(buffer, column.offset));
				Timestamp::today_at(time.hours, time.minutes, time.seconds, time.fractions / 10)
					.map(Value::Timestamp)
					.ok_or_else(|| Error::Engine("packed time decoded out of range".to_string()))
			}
			SqlType::TypeDate => {
				let date = engine.decode_date(order.read_i32(buffer, column.offset));
				Timestamp::from_ymd(date.year, date.month.wrapping_sub(1), date.day)
					.map(Value::Timestamp)
					.ok_or_else(|| Error::Engine("packed date decoded out of range".to_string()))
			}
			SqlType::Timestamp => {
				let date = engine.decode_date(order.read_i32(buffer, column.offset));
				let time = engine.decode_time(order.read_u32(buffer, column.offset + 4));
				Timestamp::new(
					date.year,
					date.month.wrapping_sub(1),
					date.day,
					time.hours,
					time.minutes,
					time.seconds,
					time.fractions / 10,
				)
				.map(Value::Timestamp)
				.ok_or_else(|| Error::Engine("packed timestamp decoded out of range".to_string()))
			}
			SqlType::Boolean => Ok(Value::Boolean(buffer[column.offset] != 0)),
			SqlType::Blob => {
				let id = BlobId::from_slice(&buffer[column.offset..column.offset + BlobId::SIZE]);
				let mut stream = BlobStream::open(engine, transaction, id).await?;

				// The stream is closed on every exit path; the transfer
				// error, if any, wins over the close result.
				let transferred = read_blob(engine, &mut stream).await;
				let closed = stream.close(engine).await;
				let data = transferred?;
				closed?;

				Ok(Value::Bytes(Bytes::new(data)))
			}
			SqlType::Null => Ok(Value::Null),
			other => Err(Error::UnrecognizedType {
				code: other.code(),
			}),
		}
	}
}

/// Segment loop for one blob column: query total length, read segments at
/// increasing cursor positions, verify the cumulative count.
async fn read_blob<E: Engine>(engine: &E, stream: &mut BlobStream<E>) -> Result<Vec<u8>> {
	let length = stream.length(engine).await? as usize;
	let mut data = vec![0u8; length];
	let mut pos = 0;

	while pos < length {
		match stream.read(engine, &mut data[pos..]).await? {
			Some(read) => pos += read,
			None => break,
		}
	}

	if pos != length {
		return Err(Error::IncompleteBlob {
			read: pos,
			expected: length,
		});
	}

	trace!(bytes = length, "blob column materialized");
	Ok(data)
}
