// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Resumable byte stream over one out-of-line blob.

use emberwire_type::{Error, Result};
use tracing::trace;

use crate::{
	descriptor::BlobId,
	engine::{Engine, SegmentRead},
	portable::{blob_info, portable_integer},
};

/// A sequential segment stream bound to one blob handle under one open
/// transaction.
///
/// Lifecycle: `create`/`open` → reads or writes → `close` or `cancel`.
/// The terminal operations release the handle back to the engine and clear
/// it; any operation afterwards fails fast with [`Error::StreamClosed`], so
/// a double close or use-after-close is a detectable programming error
/// rather than silent engine traffic.
pub struct BlobStream<E: Engine> {
	handle: Option<E::BlobHandle>,
	id: BlobId,
}

impl<E: Engine> BlobStream<E> {
	/// Allocate a new blob under `transaction`, ready for writing.
	pub async fn create(engine: &E, transaction: &E::Transaction) -> Result<Self> {
		let (handle, id) = engine.create_blob(transaction).await?;
		Ok(Self {
			handle: Some(handle),
			id,
		})
	}

	/// Open the existing blob `id` under `transaction`, ready for reading.
	pub async fn open(engine: &E, transaction: &E::Transaction, id: BlobId) -> Result<Self> {
		let handle = engine.open_blob(transaction, id).await?;
		Ok(Self {
			handle: Some(handle),
			id,
		})
	}

	/// The blob reference this stream operates on.
	pub fn id(&self) -> BlobId {
		self.id
	}

	/// Whether a terminal close or cancel already ran.
	pub fn is_closed(&self) -> bool {
		self.handle.is_none()
	}

	fn handle_mut(&mut self) -> Result<&mut E::BlobHandle> {
		self.handle.as_mut().ok_or(Error::StreamClosed)
	}

	/// Total blob length in bytes, queried through an info request.
	///
	/// The response header must carry the expected
	/// (tag, length-of-length, reserved) triple; anything else is a
	/// protocol-integrity failure, not a retryable condition.
	pub async fn length(&mut self, engine: &E) -> Result<u64> {
		let request = [blob_info::TOTAL_LENGTH];
		let mut response = [0u8; 20];
		engine.blob_info(self.handle_mut()?, &request, &mut response).await?;

		if response[0] != blob_info::TOTAL_LENGTH || response[1] != 4 || response[2] != 0 {
			return Err(Error::UnrecognizedBlobInfo);
		}

		Ok(portable_integer(&response[3..], 4))
	}

	/// Fetch the next segment into `buf`.
	///
	/// Returns the number of bytes written, or `None` once the stream is
	/// exhausted. One underlying segment fetch per call.
	pub async fn read(&mut self, engine: &E, buf: &mut [u8]) -> Result<Option<usize>> {
		match engine.get_segment(self.handle_mut()?, buf).await? {
			SegmentRead::Data {
				len,
				..
			} => Ok(Some(len)),
			SegmentRead::NoData => Ok(None),
		}
	}

	/// Append one segment. Segment boundaries are the caller's to choose;
	/// no implicit chunking happens here.
	pub async fn write(&mut self, engine: &E, data: &[u8]) -> Result<()> {
		engine.put_segment(self.handle_mut()?, data).await
	}

	/// Release the handle, keeping the written data.
	pub async fn close(&mut self, engine: &E) -> Result<()> {
		let handle = self.handle.take().ok_or(Error::StreamClosed)?;
		trace!("closing blob stream");
		engine.close_blob(handle).await
	}

	/// Release the handle, discarding the blob under construction.
	pub async fn cancel(&mut self, engine: &E) -> Result<()> {
		let handle = self.handle.take().ok_or(Error::StreamClosed)?;
		trace!("cancelling blob stream");
		engine.cancel_blob(handle).await
	}
}

#[cfg(test)]
mod tests {
	use emberwire_testing::{HandleState, MockEngine, MockTransaction};
	use emberwire_type::Error;

	// Imports go through the external crate name so the mock engine's trait
	// impls (built against the non-test lib) unify with the tested types.
	use emberwire_codec::BlobStream;

	#[tokio::test]
	async fn test_open_read_close() {
		let engine = MockEngine::new();
		let transaction = MockTransaction;
		let id = engine.insert_blob(b"hello blob".to_vec());

		let mut stream = BlobStream::open(&engine, &transaction, id).await.unwrap();
		assert_eq!(stream.length(&engine).await.unwrap(), 10);

		let mut buf = [0u8; 32];
		let read = stream.read(&engine, &mut buf).await.unwrap().unwrap();
		assert_eq!(&buf[..read], b"hello blob");
		assert_eq!(stream.read(&engine, &mut buf).await.unwrap(), None);

		stream.close(&engine).await.unwrap();
		assert!(stream.is_closed());
		assert_eq!(engine.handle_states(), vec![HandleState::Closed]);
	}

	#[tokio::test]
	async fn test_segmented_read_respects_limit() {
		let engine = MockEngine::new();
		engine.set_segment_limit(3);
		let transaction = MockTransaction;
		let id = engine.insert_blob(b"abcdefgh".to_vec());

		let mut stream = BlobStream::open(&engine, &transaction, id).await.unwrap();
		let mut collected = Vec::new();
		let mut buf = [0u8; 8];
		while let Some(read) = stream.read(&engine, &mut buf).await.unwrap() {
			collected.extend_from_slice(&buf[..read]);
		}
		assert_eq!(collected, b"abcdefgh");

		stream.close(&engine).await.unwrap();
	}

	#[tokio::test]
	async fn test_create_write_roundtrip() {
		let engine = MockEngine::new();
		let transaction = MockTransaction;

		let mut stream = BlobStream::create(&engine, &transaction).await.unwrap();
		let id = stream.id();
		stream.write(&engine, b"first ").await.unwrap();
		stream.write(&engine, b"second").await.unwrap();
		stream.close(&engine).await.unwrap();

		assert_eq!(engine.blob_contents(id).unwrap(), b"first second");
	}

	#[tokio::test]
	async fn test_length_rejects_corrupt_info_header() {
		let engine = MockEngine::new();
		engine.corrupt_blob_info();
		let transaction = MockTransaction;
		let id = engine.insert_blob(vec![1, 2, 3]);

		let mut stream = BlobStream::open(&engine, &transaction, id).await.unwrap();
		let result = stream.length(&engine).await;
		assert!(matches!(result, Err(Error::UnrecognizedBlobInfo)));

		stream.close(&engine).await.unwrap();
	}

	#[tokio::test]
	async fn test_double_close_fails_fast() {
		let engine = MockEngine::new();
		let transaction = MockTransaction;
		let id = engine.insert_blob(vec![0]);

		let mut stream = BlobStream::open(&engine, &transaction, id).await.unwrap();
		stream.close(&engine).await.unwrap();
		assert!(matches!(stream.close(&engine).await, Err(Error::StreamClosed)));
		assert!(matches!(stream.cancel(&engine).await, Err(Error::StreamClosed)));

		let mut buf = [0u8; 1];
		assert!(matches!(stream.read(&engine, &mut buf).await, Err(Error::StreamClosed)));
		assert!(matches!(stream.write(&engine, &[1]).await, Err(Error::StreamClosed)));
		assert!(matches!(stream.length(&engine).await, Err(Error::StreamClosed)));
	}

	#[tokio::test]
	async fn test_cancel_is_terminal() {
		let engine = MockEngine::new();
		let transaction = MockTransaction;

		let mut stream = BlobStream::create(&engine, &transaction).await.unwrap();
		stream.cancel(&engine).await.unwrap();
		assert!(stream.is_closed());
		assert_eq!(engine.handle_states(), vec![HandleState::Cancelled]);
	}

	#[tokio::test]
	async fn test_open_unknown_blob_fails() {
		let engine = MockEngine::new();
		let transaction = MockTransaction;

		let result = BlobStream::open(&engine, &transaction, emberwire_codec::BlobId([9; 8])).await;
		assert!(matches!(result, Err(Error::Engine(_))));
	}
}
