//! Raw cell value → percentage score resolution.

use serde_json::Value;

use crate::models::{PointsPossible, StudentRecord};

/// Resolve one assignment cell into a percentage, or `None` when the value is
/// unscoreable. Missing cells, blanks, non-numeric text, and assignments with
/// no positive points-possible all resolve to `None` — excluded from
/// aggregation, never an error.
pub fn assignment_percentage(
    student: &StudentRecord,
    assignment: &str,
    points_possible: &PointsPossible,
) -> Option<f64> {
    let max = match points_possible.get(assignment) {
        Some(Some(p)) if *p > 0.0 => *p,
        _ => return None,
    };

    let score = match student.get(assignment)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    Some(score / max * 100.0)
}

/// Read a metadata cell as display text. Numbers render without quoting;
/// anything else missing or non-scalar becomes the empty string.
pub fn cell_text(student: &StudentRecord, field: &str) -> String {
    match student.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Round to 2 decimal places for stored display values.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
