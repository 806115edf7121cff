// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::collections::HashMap;

use emberwire_codec::{
	BlobId, Engine, SegmentRead,
	engine::{DateParts, TimeParts},
	portable::blob_info,
};
use emberwire_type::{Error, Result, Timestamp};
use parking_lot::Mutex;

/// Days between the engine's packed-date epoch (a Modified Julian Day
/// number) and the Unix epoch.
const PACKED_DATE_UNIX_OFFSET: i64 = 40_587;

/// Marker transaction handle. The mock keys nothing on it; it only proves
/// the borrow plumbing.
#[derive(Debug, Default)]
pub struct MockTransaction;

/// Observable lifecycle of a mock blob handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandleState {
	Open,
	Closed,
	Cancelled,
}

/// A live handle into the mock blob store.
#[derive(Debug)]
pub struct MockBlobHandle {
	id: BlobId,
	index: usize,
	cursor: usize,
}

#[derive(Default)]
struct Inner {
	blobs: HashMap<BlobId, Vec<u8>>,
	next_id: u64,
	handles: Vec<HandleState>,
	segment_limit: usize,
	reported_length: Option<u64>,
	corrupt_info: bool,
	put_segment_calls: usize,
}

/// In-memory stand-in for the engine's blob and packed date/time services.
pub struct MockEngine {
	inner: Mutex<Inner>,
}

impl Default for MockEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl MockEngine {
	pub fn new() -> Self {
		Self {
			inner: Mutex::new(Inner {
				segment_limit: usize::MAX,
				..Inner::default()
			}),
		}
	}

	/// Cap the number of bytes served per segment fetch, forcing
	/// multi-segment reads.
	pub fn set_segment_limit(&self, limit: usize) {
		self.inner.lock().segment_limit = limit;
	}

	/// Preload a blob, returning its reference.
	pub fn insert_blob(&self, data: Vec<u8>) -> BlobId {
		let mut inner = self.inner.lock();
		let id = Self::allocate_id(&mut inner);
		inner.blobs.insert(id, data);
		id
	}

	pub fn blob_contents(&self, id: BlobId) -> Option<Vec<u8>> {
		self.inner.lock().blobs.get(&id).cloned()
	}

	/// Make every total-length query report `length` instead of the stored
	/// size, to provoke short-read failures.
	pub fn misreport_length(&self, length: u64) {
		self.inner.lock().reported_length = Some(length);
	}

	/// Corrupt the blob info response header.
	pub fn corrupt_blob_info(&self) {
		self.inner.lock().corrupt_info = true;
	}

	/// Lifecycle of every handle ever opened or created, in order.
	pub fn handle_states(&self) -> Vec<HandleState> {
		self.inner.lock().handles.clone()
	}

	pub fn put_segment_calls(&self) -> usize {
		self.inner.lock().put_segment_calls
	}

	fn allocate_id(inner: &mut Inner) -> BlobId {
		inner.next_id += 1;
		BlobId(inner.next_id.to_le_bytes())
	}

	fn register_handle(inner: &mut Inner) -> usize {
		inner.handles.push(HandleState::Open);
		inner.handles.len() - 1
	}
}

impl Engine for MockEngine {
	type Transaction = MockTransaction;
	type BlobHandle = MockBlobHandle;

	async fn open_blob(&self, _transaction: &MockTransaction, id: BlobId) -> Result<MockBlobHandle> {
		let mut inner = self.inner.lock();
		if !inner.blobs.contains_key(&id) {
			return Err(Error::Engine(format!("unknown blob {:?}", id)));
		}
		let index = Self::register_handle(&mut inner);
		Ok(MockBlobHandle {
			id,
			index,
			cursor: 0,
		})
	}

	async fn create_blob(&self, _transaction: &MockTransaction) -> Result<(MockBlobHandle, BlobId)> {
		let mut inner = self.inner.lock();
		let id = Self::allocate_id(&mut inner);
		inner.blobs.insert(id, Vec::new());
		let index = Self::register_handle(&mut inner);
		Ok((
			MockBlobHandle {
				id,
				index,
				cursor: 0,
			},
			id,
		))
	}

	async fn get_segment(&self, handle: &mut MockBlobHandle, buf: &mut [u8]) -> Result<SegmentRead> {
		let inner = self.inner.lock();
		let data = inner.blobs.get(&handle.id).ok_or_else(|| Error::Engine("blob vanished".to_string()))?;

		if handle.cursor >= data.len() {
			return Ok(SegmentRead::NoData);
		}
		let take = buf.len().min(inner.segment_limit).min(data.len() - handle.cursor);
		if take == 0 {
			return Ok(SegmentRead::NoData);
		}

		buf[..take].copy_from_slice(&data[handle.cursor..handle.cursor + take]);
		handle.cursor += take;
		Ok(SegmentRead::Data {
			len: take,
			last: handle.cursor >= data.len(),
		})
	}

	async fn put_segment(&self, handle: &mut MockBlobHandle, data: &[u8]) -> Result<()> {
		let mut inner = self.inner.lock();
		inner.put_segment_calls += 1;
		inner.blobs
			.get_mut(&handle.id)
			.ok_or_else(|| Error::Engine("blob vanished".to_string()))?
			.extend_from_slice(data);
		Ok(())
	}

	async fn blob_info(&self, handle: &mut MockBlobHandle, request: &[u8], response: &mut [u8]) -> Result<()> {
		let inner = self.inner.lock();
		if request.first() != Some(&blob_info::TOTAL_LENGTH) {
			return Err(Error::Engine("unsupported info request".to_string()));
		}

		if inner.corrupt_info {
			response[0] = 0xFF;
			return Ok(());
		}

		let length = inner
			.reported_length
			.unwrap_or_else(|| inner.blobs.get(&handle.id).map(|data| data.len() as u64).unwrap_or(0));

		response[0] = blob_info::TOTAL_LENGTH;
		response[1] = 4;
		response[2] = 0;
		response[3..7].copy_from_slice(&(length as u32).to_le_bytes());
		Ok(())
	}

	async fn close_blob(&self, handle: MockBlobHandle) -> Result<()> {
		self.inner.lock().handles[handle.index] = HandleState::Closed;
		Ok(())
	}

	async fn cancel_blob(&self, handle: MockBlobHandle) -> Result<()> {
		let mut inner = self.inner.lock();
		inner.handles[handle.index] = HandleState::Cancelled;
		inner.blobs.remove(&handle.id);
		Ok(())
	}

	// Packed time: ten-thousandths of a second since midnight.
	fn decode_time(&self, packed: u32) -> TimeParts {
		let fractions = packed % 10_000;
		let seconds_total = packed / 10_000;
		TimeParts {
			hours: seconds_total / 3600,
			minutes: (seconds_total / 60) % 60,
			seconds: seconds_total % 60,
			fractions,
		}
	}

	fn encode_time(&self, parts: TimeParts) -> u32 {
		(parts.hours * 3600 + parts.minutes * 60 + parts.seconds) * 10_000 + parts.fractions
	}

	// Packed date: Modified Julian Day number.
	fn decode_date(&self, packed: i32) -> DateParts {
		let timestamp = Timestamp::from_days_since_epoch(packed as i64 - PACKED_DATE_UNIX_OFFSET)
			.expect("mock packed date in range");
		DateParts {
			year: timestamp.year(),
			month: timestamp.month0() + 1,
			day: timestamp.day(),
		}
	}

	fn encode_date(&self, parts: DateParts) -> i32 {
		let timestamp =
			Timestamp::from_ymd(parts.year, parts.month - 1, parts.day).expect("mock date parts valid");
		(timestamp.to_days_since_epoch() + PACKED_DATE_UNIX_OFFSET) as i32
	}
}

#[cfg(test)]
mod tests {
	use emberwire_codec::engine::{DateParts, Engine, TimeParts};

	use super::MockEngine;

	#[test]
	fn test_packed_time_roundtrip() {
		let engine = MockEngine::new();
		let parts = TimeParts {
			hours: 13,
			minutes: 45,
			seconds: 10,
			fractions: 2500,
		};
		assert_eq!(engine.decode_time(engine.encode_time(parts)), parts);
	}

	#[test]
	fn test_packed_date_epochs() {
		let engine = MockEngine::new();
		// Unix epoch is MJD 40587.
		let parts = engine.decode_date(40_587);
		assert_eq!((parts.year, parts.month, parts.day), (1970, 1, 1));

		let packed = engine.encode_date(DateParts {
			year: 2026,
			month: 8,
			day: 26,
		});
		let recovered = engine.decode_date(packed);
		assert_eq!((recovered.year, recovered.month, recovered.day), (2026, 8, 26));
	}
}
