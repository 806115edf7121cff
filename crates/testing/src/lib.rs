// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! In-memory engine doubles.
//!
//! [`MockEngine`] stands in for the blob and packed date/time services of a
//! real engine; [`MockMetadata`] stands in for a statement's descriptor
//! collection and its rebuild surface. Both expose enough state inspection
//! (handle lifecycles, release flags, call counters) for tests to assert
//! resource discipline, plus fault knobs for the failure paths.

pub mod engine;
pub mod metadata;

pub use engine::{HandleState, MockEngine, MockTransaction};
pub use metadata::{MockMetadata, MockMetadataBuilder, ReleaseFlag};
