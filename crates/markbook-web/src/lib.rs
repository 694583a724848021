//! markbook-web — HTTP API for Markbook.
//! Exposes the gradebook workflow over axum:
//!   - CSV upload into an in-memory session
//!   - session fetch / delete with inactivity expiry
//!   - grade calculation against user-defined categories
//!   - CSV export of computed grades

pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
