//! markbook-ingestion — Canvas gradebook CSV parsing.
//!
//! Turns an exported gradebook into the roster and points-possible map the
//! calculation engine consumes, plus the column metadata the frontend needs
//! to let instructors build categories.

pub mod models;
pub mod parser;

pub use models::{AssignmentInfo, ParsedGradebook};
pub use parser::{parse_gradebook, IngestError};
