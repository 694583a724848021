//! Parsed gradebook payload, as stored per session and returned on upload.

use std::collections::BTreeMap;

use markbook_engine::{PointsPossible, StudentRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInfo {
    pub name: String,
    pub points_possible: Option<f64>,
    /// True for Canvas summary columns (Current Score etc.) that must not be
    /// used in calculations.
    #[serde(default)]
    pub is_read_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedGradebook {
    pub headers: Vec<String>,
    pub students: Vec<StudentRecord>,
    pub assignment_columns: Vec<String>,
    #[serde(default)]
    pub read_only_columns: Vec<String>,
    pub assignment_info: BTreeMap<String, AssignmentInfo>,
    pub metadata_columns: Vec<String>,
    pub sections: Vec<String>,
    pub points_possible: PointsPossible,
    pub row_count: usize,
    #[serde(default)]
    pub original_filename: String,
}
