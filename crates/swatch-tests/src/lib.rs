//! # swatch-tests
//!
//! Test support and integration tests for swatch-core.
//!
//! This crate provides:
//! - An ASE fixture encoder ([`fixture::AseBuilder`]) for well-formed and
//!   deliberately malformed files
//! - Deterministic random color records ([`patterns::random_records`])
//!
//! ## Test Categories
//!
//! 1. **Round trip**: encode records, decode, compare bit-exactly
//! 2. **Malformed input**: every error in the decode taxonomy
//! 3. **Batch**: parallel decode, partial results, failure reporting
//! 4. **Interchange**: JSON and YAML renderings of a catalog agree

pub mod fixture;
pub mod patterns;

pub use fixture::{AseBuilder, encode_records, fire_red};
pub use patterns::random_records;
