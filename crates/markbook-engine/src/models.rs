//! Engine input and output types.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the parsed gradebook: column name → raw cell value.
/// Cells are strings, numbers, or the empty-string sentinel meaning
/// "no score". Metadata columns (`Student`, `ID`, `SIS User ID`) live in the
/// same map as assignment scores.
pub type StudentRecord = serde_json::Map<String, Value>;

/// Assignment name → maximum achievable raw score. `None` or a non-positive
/// value means the assignment cannot be scored as a percentage.
pub type PointsPossible = HashMap<String, Option<f64>>;

/// Letter label → inclusive minimum percentage. A `BTreeMap` keeps tie
/// resolution between equal floors deterministic (label order).
pub type GradingScale = BTreeMap<String, f64>;

/// A named, weighted bucket of assignments averaged together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeCategory {
    pub name: String,
    /// Percentage points, 0–100. All categories in a request must sum to 100.
    pub weight: f64,
    /// Discard this many lowest scores before averaging, but only when the
    /// resolvable score count strictly exceeds it.
    #[serde(default)]
    pub drop_lowest: usize,
    #[serde(default)]
    pub assignments: Vec<String>,
}

/// One assignment's score may substitute for a lower score on another,
/// student by student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// The assignment whose score can replace others.
    pub replacer: String,
    /// The assignments it may substitute for, in priority order.
    pub targets: Vec<String>,
}

/// Record of one applied substitution, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementDetail {
    pub replacer: String,
    pub replaced: String,
    pub original_score: f64,
    pub new_score: f64,
    pub improvement: f64,
    /// Category owning the replaced assignment; `None` when the target is in
    /// no category.
    pub category: Option<String>,
}

/// Computed grades for one student. Identity fields serialize with the
/// Canvas column names the frontend expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResult {
    #[serde(rename = "Student")]
    pub student: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "SIS User ID")]
    pub sis_user_id: String,
    /// Category name → average percentage, rounded to 2 decimals for display.
    pub category_scores: BTreeMap<String, f64>,
    pub final_percentage: f64,
    pub letter_grade: String,
    /// Applied replacements in rule order; `None` when no rule fired.
    pub replacement_info: Option<Vec<ReplacementDetail>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_students: usize,
    pub grade_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationOutput {
    pub results: Vec<StudentResult>,
    pub summary: Summary,
}

/// The standard grading scale instructors start from.
pub fn default_grading_scale() -> GradingScale {
    BTreeMap::from([
        ("A".to_string(), 90.0),
        ("A-".to_string(), 87.0),
        ("B+".to_string(), 84.0),
        ("B".to_string(), 80.0),
        ("B-".to_string(), 77.0),
        ("C+".to_string(), 74.0),
        ("C".to_string(), 70.0),
        ("C-".to_string(), 67.0),
        ("D+".to_string(), 64.0),
        ("D".to_string(), 61.0),
        ("D-".to_string(), 57.0),
        ("F".to_string(), 0.0),
    ])
}
