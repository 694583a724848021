//! markbook-common — Shared error types used across all Markbook crates.

pub mod error;

pub use error::{ApiError, Result};
