// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Marshaling core between the engine's fixed-offset binary row format and
//! dynamic [`Value`](emberwire_type::Value)s, plus a resumable stream over
//! out-of-line blob data.
//!
//! The central contract is compile-once/apply-many: for each prepared
//! statement, [`normalize_metadata`] rewrites the raw descriptor collection
//! into a small type space, [`RowDecoder::compile`] and
//! [`RowEncoder::compile`] bind one conversion record per column, and the
//! compiled codec is applied to every row buffer scanned or bound under
//! that statement without re-reading descriptors.
//!
//! Everything engine-side (attachments, transactions, statement execution,
//! transport) is out of scope and reached through the [`Engine`] and
//! [`StatementMetadata`] collaborator traits.

pub mod blob;
pub mod byte_order;
pub mod descriptor;
pub mod engine;
pub mod metadata;
pub mod portable;
pub mod row;
pub mod sql_type;

pub use blob::BlobStream;
pub use byte_order::ByteOrder;
pub use descriptor::{BlobId, ColumnDescriptor};
pub use engine::{Engine, MetadataBuilder, SegmentRead, StatementMetadata};
pub use metadata::normalize_metadata;
pub use row::{RowDecoder, RowEncoder};
pub use sql_type::SqlType;
