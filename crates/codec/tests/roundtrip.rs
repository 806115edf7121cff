// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! End-to-end marshaling: raw statement metadata through normalization,
//! codec compilation, encode and decode against the in-memory engine.

use emberwire_codec::{ByteOrder, RowDecoder, RowEncoder, SqlType, StatementMetadata, normalize_metadata};
use emberwire_testing::{MockEngine, MockMetadata, MockTransaction};
use emberwire_type::{Timestamp, Value};

struct Fixture {
	engine: MockEngine,
	decoder: RowDecoder,
	encoder: RowEncoder,
	buffer: Vec<u8>,
}

fn fixture(specs: &[(SqlType, usize, i32)]) -> Fixture {
	let metadata = normalize_metadata(MockMetadata::new(specs)).unwrap();
	let columns = metadata.columns();
	Fixture {
		engine: MockEngine::new(),
		decoder: RowDecoder::compile(&columns, ByteOrder::host()),
		encoder: RowEncoder::compile(&columns, ByteOrder::host()),
		buffer: vec![0u8; metadata.row_size()],
	}
}

async fn roundtrip(fixture: &mut Fixture, values: &[Value]) -> Vec<Value> {
	fixture.buffer.fill(0);
	fixture.encoder.encode(&fixture.engine, &MockTransaction, &mut fixture.buffer, values).await.unwrap();
	fixture.decoder.decode(&fixture.engine, &MockTransaction, &fixture.buffer).await.unwrap()
}

#[tokio::test]
async fn test_roundtrip_all_normalized_types() {
	let mut fixture = fixture(&[
		(SqlType::Varying, 20, 0),
		(SqlType::Double, 8, 0),
		(SqlType::TypeDate, 4, 0),
		(SqlType::Timestamp, 8, 0),
		(SqlType::Boolean, 1, 0),
		(SqlType::Blob, 8, 0),
	]);

	let values = vec![
		Value::text("héllo wörld"),
		Value::number(-12345.6789),
		Value::Timestamp(Timestamp::from_ymd(1985, 9, 26).unwrap()),
		Value::Timestamp(Timestamp::new(2015, 9, 21, 16, 29, 0, 500).unwrap()),
		Value::boolean(true),
		Value::bytes(vec![0xCA, 0xFE, 0xBA, 0xBE]),
	];

	assert_eq!(roundtrip(&mut fixture, &values).await, values);
}

#[tokio::test]
async fn test_roundtrip_normalized_numerics() {
	// Raw Short/Long/Int64/Float columns all marshal as numbers after
	// normalization.
	let mut fixture = fixture(&[
		(SqlType::Short, 2, 0),
		(SqlType::Long, 4, -2),
		(SqlType::Int64, 8, 0),
		(SqlType::Float, 4, 0),
	]);

	let values = vec![Value::number(1.0), Value::number(-2.5), Value::number(9e15), Value::number(0.125)];
	assert_eq!(roundtrip(&mut fixture, &values).await, values);
}

#[tokio::test]
async fn test_roundtrip_fixed_text_as_varying() {
	let mut fixture = fixture(&[(SqlType::Text, 10, 0)]);
	let values = vec![Value::text("fixed")];
	assert_eq!(roundtrip(&mut fixture, &values).await, values);
}

#[tokio::test]
async fn test_null_roundtrip_every_type() {
	for spec in [
		(SqlType::Varying, 10, 0),
		(SqlType::Double, 8, 0),
		(SqlType::TypeTime, 4, 0),
		(SqlType::TypeDate, 4, 0),
		(SqlType::Timestamp, 8, 0),
		(SqlType::Boolean, 1, 0),
		(SqlType::Blob, 8, 0),
		(SqlType::Null, 0, 0),
	] {
		let mut fixture = fixture(&[spec]);
		let decoded = roundtrip(&mut fixture, &[Value::Null]).await;
		assert_eq!(decoded, vec![Value::Null], "type {:?}", spec.0);
	}
}

#[tokio::test]
async fn test_time_of_day_anchors_to_current_date() {
	let mut fixture = fixture(&[(SqlType::TypeTime, 4, 0)]);

	let input = Timestamp::today_at(14, 30, 45, 123).unwrap();
	let decoded = roundtrip(&mut fixture, &[Value::Timestamp(input)]).await;
	assert_eq!(decoded, vec![Value::Timestamp(input)]);
}

#[tokio::test]
async fn test_time_fractions_truncate_to_milliseconds_and_stay_stable() {
	let specs = [(SqlType::TypeTime, 4, 0)];
	let metadata = normalize_metadata(MockMetadata::new(&specs)).unwrap();
	let columns = metadata.columns();
	let engine = MockEngine::new();
	let decoder = RowDecoder::compile(&columns, ByteOrder::host());
	let encoder = RowEncoder::compile(&columns, ByteOrder::host());

	// Hand-pack a time with 9999 ten-thousandths: beyond-millisecond
	// precision is dropped on decode, by design.
	use emberwire_codec::engine::{Engine, TimeParts};
	let packed = engine.encode_time(TimeParts {
		hours: 1,
		minutes: 2,
		seconds: 3,
		fractions: 9_999,
	});
	let mut buffer = vec![0u8; metadata.row_size()];
	ByteOrder::host().write_u32(&mut buffer, columns[0].offset, packed);

	let first = decoder.decode(&engine, &MockTransaction, &buffer).await.unwrap();
	let Value::Timestamp(ts) = &first[0] else {
		panic!("expected timestamp");
	};
	assert_eq!(ts.millisecond(), 999);

	// A second trip through encode/decode is lossless.
	let mut buffer = vec![0u8; metadata.row_size()];
	encoder.encode(&engine, &MockTransaction, &mut buffer, &first).await.unwrap();
	let second = decoder.decode(&engine, &MockTransaction, &buffer).await.unwrap();
	assert_eq!(first, second);
}

#[tokio::test]
async fn test_blob_roundtrip_across_segment_sizes() {
	let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

	for limit in [1usize, 3, 17, 256, usize::MAX] {
		let mut fixture = fixture(&[(SqlType::Blob, 8, 0)]);
		fixture.engine.set_segment_limit(limit);

		let decoded = roundtrip(&mut fixture, &[Value::bytes(payload.clone())]).await;
		assert_eq!(decoded, vec![Value::bytes(payload.clone())], "segment limit {limit}");
	}
}

#[tokio::test]
async fn test_empty_blob_roundtrip() {
	let mut fixture = fixture(&[(SqlType::Blob, 8, 0)]);
	let decoded = roundtrip(&mut fixture, &[Value::bytes(vec![])]).await;
	assert_eq!(decoded, vec![Value::bytes(vec![])]);
}

#[tokio::test]
async fn test_example_scenario_bytes_and_decode() {
	// Descriptor: VARYING, offset 2, length 10, null indicator at 0.
	let specs = [(SqlType::Varying, 10, 0)];
	let metadata = MockMetadata::new(&specs);
	let columns = metadata.columns();
	assert_eq!(columns[0].offset, 2);
	assert_eq!(columns[0].null_offset, 0);

	let engine = MockEngine::new();
	let encoder = RowEncoder::compile(&columns, ByteOrder::host());
	let decoder = RowDecoder::compile(&columns, ByteOrder::host());

	let mut buffer = vec![0u8; metadata.row_size()];
	encoder.encode(&engine, &MockTransaction, &mut buffer, &[Value::text("hello")]).await.unwrap();

	assert_eq!(&buffer[0..2], &[0x00, 0x00]);
	assert_eq!(&buffer[2..4], &[5, 0]);
	assert_eq!(&buffer[4..9], b"hello");

	let decoded = decoder.decode(&engine, &MockTransaction, &buffer).await.unwrap();
	assert_eq!(decoded, vec![Value::text("hello")]);
}

#[tokio::test]
async fn test_second_roundtrip_is_identity() {
	let mut fixture = fixture(&[(SqlType::Varying, 30, 0), (SqlType::Double, 8, 0), (SqlType::Blob, 8, 0)]);

	let values = vec![Value::text("stability"), Value::number(0.1 + 0.2), Value::bytes(vec![1, 2, 3])];
	let first = roundtrip(&mut fixture, &values).await;
	let second = roundtrip(&mut fixture, &first).await;
	assert_eq!(first, second);
}
