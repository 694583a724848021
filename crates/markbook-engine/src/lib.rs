//! markbook-engine — Grade calculation engine for Canvas gradebook exports.
//!
//! A pure, synchronous computation from (roster, categories, grading scale,
//! replacement rules, points-possible map) to per-student results and a
//! grade-distribution summary, plus a CSV exporter for the results. The
//! engine performs no I/O and holds no state; callers fetch the roster from
//! wherever it lives and pass it in by reference.

pub mod calculate;
pub mod error;
pub mod export;
pub mod models;
pub mod replacement;
pub mod resolve;

pub use calculate::calculate;
pub use error::{EngineError, Result};
pub use export::export_csv;
pub use models::{
    default_grading_scale, CalculationOutput, GradeCategory, GradingScale, PointsPossible,
    ReplacementDetail, ReplacementRule, StudentRecord, StudentResult, Summary,
};
