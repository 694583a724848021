//! CSV serialization of calculated results.

use std::fmt::Write;

use crate::models::{GradeCategory, StudentResult};

/// Render results as CSV text: `Student,ID,SIS User ID`, one column per
/// category in request order, then `Final %` and `Letter Grade`. One row per
/// student in roster order. Only the student name is quoted; names containing
/// double quotes are a documented caller limitation.
pub fn export_csv(results: &[StudentResult], categories: &[GradeCategory]) -> String {
    let mut out = String::new();

    let mut header: Vec<&str> = vec!["Student", "ID", "SIS User ID"];
    header.extend(categories.iter().map(|cat| cat.name.as_str()));
    header.push("Final %");
    header.push("Letter Grade");
    let _ = writeln!(out, "{}", header.join(","));

    for result in results {
        let mut row: Vec<String> = vec![
            format!("\"{}\"", result.student),
            result.id.clone(),
            result.sis_user_id.clone(),
        ];
        for category in categories {
            let score = result
                .category_scores
                .get(&category.name)
                .copied()
                .unwrap_or(0.0);
            row.push(format_score(score));
        }
        row.push(format_score(result.final_percentage));
        row.push(result.letter_grade.clone());
        let _ = writeln!(out, "{}", row.join(","));
    }

    out
}

fn format_score(value: f64) -> String {
    // Values are pre-rounded to 2 decimals; plain Display drops the
    // trailing zeros without scientific notation.
    format!("{value}")
}
