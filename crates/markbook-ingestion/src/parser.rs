//! Canvas gradebook CSV parser.
//!
//! Canvas exports put two non-student rows directly under the header: a
//! posting-status row, then the points-possible row. Everything after those
//! is one student per row.

use std::collections::BTreeMap;

use markbook_engine::{PointsPossible, StudentRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{AssignmentInfo, ParsedGradebook};

/// Columns carrying student identity rather than scores.
const METADATA_COLS: [&str; 6] = [
    "Student",
    "ID",
    "SIS User ID",
    "SIS Login ID",
    "Root Account",
    "Section",
];

/// Name fragments marking Canvas summary columns, which are reported but
/// never scored.
const READ_ONLY_PATTERNS: [&str; 5] = [
    "Current Score",
    "Final Score",
    "Unposted",
    "Current Points",
    "Final Points",
];

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV file is empty")]
    Empty,

    #[error("Error parsing CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub fn is_read_only_column(name: &str) -> bool {
    READ_ONLY_PATTERNS
        .iter()
        .any(|pattern| name.contains(pattern))
}

/// Parse raw CSV bytes into the session payload.
pub fn parse_gradebook(bytes: &[u8], original_filename: &str) -> Result<ParsedGradebook> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(IngestError::Empty);
    }

    let records: Vec<csv::StringRecord> =
        reader.records().collect::<std::result::Result<_, _>>()?;

    let metadata_columns: Vec<String> = METADATA_COLS
        .iter()
        .filter(|col| headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();

    let mut assignment_columns = Vec::new();
    let mut read_only_columns = Vec::new();
    for header in &headers {
        if METADATA_COLS.contains(&header.as_str()) {
            continue;
        }
        if is_read_only_column(header) {
            read_only_columns.push(header.clone());
        } else {
            assignment_columns.push(header.clone());
        }
    }

    // Row 0 is posting status, row 1 is points possible, the rest are
    // students.
    let points_possible = match records.get(1) {
        Some(points_row) => extract_points(&headers, &assignment_columns, points_row),
        None => PointsPossible::new(),
    };
    let students: Vec<StudentRecord> = records
        .iter()
        .skip(2)
        .map(|record| student_record(&headers, record))
        .collect();

    let sections = collect_sections(&headers, &students);

    let mut assignment_info = BTreeMap::new();
    for col in &assignment_columns {
        assignment_info.insert(
            col.clone(),
            AssignmentInfo {
                name: col.clone(),
                points_possible: points_possible.get(col).copied().flatten(),
                is_read_only: false,
            },
        );
    }
    for col in &read_only_columns {
        assignment_info.insert(
            col.clone(),
            AssignmentInfo {
                name: col.clone(),
                points_possible: None,
                is_read_only: true,
            },
        );
    }

    debug!(
        students = students.len(),
        assignments = assignment_columns.len(),
        read_only = read_only_columns.len(),
        "gradebook parsed"
    );

    Ok(ParsedGradebook {
        headers,
        row_count: students.len(),
        students,
        assignment_columns,
        read_only_columns,
        assignment_info,
        metadata_columns,
        sections,
        points_possible,
        original_filename: original_filename.to_string(),
    })
}

/// Points-possible row: thousands separators stripped, unparsable or blank
/// entries recorded as `None` so the engine treats those columns as
/// unscoreable.
fn extract_points(
    headers: &[String],
    assignment_columns: &[String],
    points_row: &csv::StringRecord,
) -> PointsPossible {
    let mut points = PointsPossible::new();
    for col in assignment_columns {
        let value = headers
            .iter()
            .position(|h| h == col)
            .and_then(|idx| points_row.get(idx))
            .and_then(|raw| raw.trim().replace(',', "").parse::<f64>().ok());
        points.insert(col.clone(), value);
    }
    points
}

/// One roster row. Numeric cells become JSON numbers (matching what a JSON
/// round-trip of the original export produces); everything else stays text,
/// with blank meaning "no score".
fn student_record(headers: &[String], record: &csv::StringRecord) -> StudentRecord {
    let mut student = StudentRecord::new();
    for (idx, header) in headers.iter().enumerate() {
        let raw = record.get(idx).unwrap_or("").trim();
        student.insert(header.clone(), cell_value(raw));
    }
    student
}

fn cell_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}

/// Unique non-blank section names, in first-seen roster order.
fn collect_sections(headers: &[String], students: &[StudentRecord]) -> Vec<String> {
    if !headers.iter().any(|h| h == "Section") {
        return Vec::new();
    }
    let mut sections = Vec::new();
    for student in students {
        if let Some(Value::String(section)) = student.get("Section") {
            let section = section.trim();
            if !section.is_empty() && !sections.iter().any(|s| s == section) {
                sections.push(section.to_string());
            }
        }
    }
    sections
}
