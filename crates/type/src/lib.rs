// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

//! Dynamic value representation shared by the Emberwire marshaling core.
//!
//! The engine's wire types are collapsed by metadata normalization into a
//! small, closed space; [`Value`] is that space as a native Rust union.

pub mod error;
pub mod value;

pub use error::{Error, Result};
pub use value::{Bytes, Timestamp, Value};
