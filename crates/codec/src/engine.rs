// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Collaborator traits for the opaque engine services.
//!
//! Connection establishment, transaction lifecycle, statement execution and
//! the transport behind all of them live outside this crate; the marshaling
//! core reaches them only through these traits. Async methods are the
//! suspension points of the cooperative model: a row decode or encode yields
//! while an engine call is in flight and resumes with its result.

use emberwire_type::Result;

use crate::{
	descriptor::{BlobId, ColumnDescriptor},
	sql_type::SqlType,
};

/// Outcome of a single blob segment fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentRead {
	/// `len` bytes were written into the caller's buffer; `last` is set
	/// when the engine reports that no further data follows.
	Data {
		len: usize,
		last: bool,
	},
	/// End of stream, nothing was written.
	NoData,
}

/// Time of day decomposed by the engine's packed-time codec.
///
/// `fractions` counts ten-thousandths of a second; the marshaling core
/// truncates it to milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeParts {
	pub hours: u32,
	pub minutes: u32,
	pub seconds: u32,
	pub fractions: u32,
}

/// Calendar date decomposed by the engine's packed-date codec.
/// `month` is 1-based on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateParts {
	pub year: i32,
	pub month: u32,
	pub day: u32,
}

/// Opaque engine services the marshaling core depends on.
///
/// The transaction handle is borrowed, never owned; blob handles are owned
/// by the [`BlobStream`](crate::BlobStream) that opened or created them and
/// given back to the engine on close or cancel. The packed date/time codec
/// calls are in-process and synchronous in every known engine.
#[allow(async_fn_in_trait)]
pub trait Engine {
	type Transaction;
	type BlobHandle;

	/// Open the existing blob `id` under `transaction`.
	async fn open_blob(&self, transaction: &Self::Transaction, id: BlobId) -> Result<Self::BlobHandle>;

	/// Allocate a new blob under `transaction`, returning its reference.
	async fn create_blob(&self, transaction: &Self::Transaction) -> Result<(Self::BlobHandle, BlobId)>;

	/// Fetch the next segment into `buf`.
	async fn get_segment(&self, handle: &mut Self::BlobHandle, buf: &mut [u8]) -> Result<SegmentRead>;

	/// Append one segment.
	async fn put_segment(&self, handle: &mut Self::BlobHandle, data: &[u8]) -> Result<()>;

	/// Issue an info request against an open blob, filling `response`.
	async fn blob_info(&self, handle: &mut Self::BlobHandle, request: &[u8], response: &mut [u8]) -> Result<()>;

	/// Release the handle, keeping the blob.
	async fn close_blob(&self, handle: Self::BlobHandle) -> Result<()>;

	/// Release the handle, discarding a blob under construction.
	async fn cancel_blob(&self, handle: Self::BlobHandle) -> Result<()>;

	fn decode_time(&self, packed: u32) -> TimeParts;

	fn encode_time(&self, parts: TimeParts) -> u32;

	fn decode_date(&self, packed: i32) -> DateParts;

	fn encode_date(&self, parts: DateParts) -> i32;
}

/// A statement's column-descriptor collection.
///
/// Owned by the statement; the normalizer consumes and rebuilds it, the
/// codec compilers only read it.
pub trait StatementMetadata: Sized {
	type Builder: MetadataBuilder<Metadata = Self>;

	fn column_count(&self) -> usize;

	fn column(&self, index: usize) -> ColumnDescriptor;

	/// All descriptors, in column order.
	fn columns(&self) -> Vec<ColumnDescriptor> {
		(0..self.column_count()).map(|index| self.column(index)).collect()
	}

	/// Start a rebuild of this collection.
	fn builder(&self) -> Result<Self::Builder>;
}

/// The engine's metadata rebuild surface.
///
/// Setting a type or length does not move offsets immediately; the engine
/// recomputes the whole layout in [`build`](MetadataBuilder::build).
pub trait MetadataBuilder {
	type Metadata: StatementMetadata;

	fn set_type(&mut self, index: usize, sql_type: SqlType) -> Result<()>;

	fn set_length(&mut self, index: usize, length: usize) -> Result<()>;

	fn set_scale(&mut self, index: usize, scale: i32) -> Result<()>;

	/// Recompute the layout and produce the rebuilt collection.
	fn build(self) -> Result<Self::Metadata>;
}
