// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Failure taxonomy of the marshaling core.
//!
//! Nothing here is retried internally: every failure is surfaced to the
//! immediate caller of decode/encode or of a blob stream operation, who
//! decides whether to retry the whole statement or row.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A type tag survived into codec application that normalization should
	/// have rewritten away. Indicates a descriptor/codec mismatch bug.
	#[error("unrecognized engine type number {code}")]
	UnrecognizedType {
		code: u16,
	},

	/// The blob info response header did not carry the expected
	/// (tag, length-of-length, reserved) triple.
	#[error("unrecognized response from blob info request")]
	UnrecognizedBlobInfo,

	/// An encoded text value does not fit the column's declared byte length.
	/// Surfaced before the column's region of the buffer is touched.
	#[error("length in bytes of string ({length}) is greater than maximum expected length {max}")]
	OversizedValue {
		length: usize,
		max: usize,
	},

	/// The value sequence handed to the encoder does not match the compiled
	/// column count. Surfaced before any column is processed.
	#[error("incorrect number of parameters: expected {expected}, received {received}")]
	IncorrectParameterCount {
		expected: usize,
		received: usize,
	},

	/// The blob segment loop ended with fewer bytes than the engine's
	/// total-length query reported.
	#[error("cannot retrieve full blob: read {read} of {expected} bytes")]
	IncompleteBlob {
		read: usize,
		expected: usize,
	},

	/// Operation on a blob stream whose handle was already released by
	/// close or cancel.
	#[error("blob stream handle is already released")]
	StreamClosed,

	/// The value variant does not match the column's wire type.
	#[error("column {column} expects a {expected} value")]
	ValueTypeMismatch {
		column: usize,
		expected: &'static str,
	},

	/// A failure reported by the underlying engine collaborator.
	#[error("engine error: {0}")]
	Engine(String),
}
