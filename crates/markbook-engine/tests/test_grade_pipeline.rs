//! End-to-end engine checks: calculate then export on a small roster with
//! weighting, drop-lowest, and a replacement rule all in play.

use std::collections::HashMap;

use markbook_engine::{
    calculate, default_grading_scale, export_csv, GradeCategory, PointsPossible,
    ReplacementRule, StudentRecord,
};
use serde_json::json;

fn student(pairs: &[(&str, serde_json::Value)]) -> StudentRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn fixture_roster() -> Vec<StudentRecord> {
    vec![
        student(&[
            ("Student", json!("Lee, Avery")),
            ("ID", json!(101)),
            ("SIS User ID", json!("s101")),
            ("hw1", json!("8")),
            ("hw2", json!("6")),
            ("hw3", json!("10")),
            ("quiz1", json!("9")),
            ("final", json!("85")),
        ]),
        student(&[
            ("Student", json!("Moreno, Jules")),
            ("ID", json!(102)),
            ("SIS User ID", json!("s102")),
            ("hw1", json!("")),
            ("hw2", json!("7")),
            ("hw3", json!("N/A")),
            ("quiz1", json!("4")),
            ("final", json!("70")),
        ]),
    ]
}

fn fixture_points() -> PointsPossible {
    HashMap::from([
        ("hw1".to_string(), Some(10.0)),
        ("hw2".to_string(), Some(10.0)),
        ("hw3".to_string(), Some(10.0)),
        ("quiz1".to_string(), Some(10.0)),
        ("final".to_string(), Some(100.0)),
    ])
}

fn fixture_categories() -> Vec<GradeCategory> {
    vec![
        GradeCategory {
            name: "Homework".to_string(),
            weight: 40.0,
            drop_lowest: 1,
            assignments: vec!["hw1".into(), "hw2".into(), "hw3".into()],
        },
        GradeCategory {
            name: "Quizzes".to_string(),
            weight: 20.0,
            drop_lowest: 0,
            assignments: vec!["quiz1".into()],
        },
        GradeCategory {
            name: "Final".to_string(),
            weight: 40.0,
            drop_lowest: 0,
            assignments: vec!["final".into()],
        },
    ]
}

#[test]
fn test_full_pipeline_with_drop_and_replacement() {
    let roster = fixture_roster();
    let rules = [ReplacementRule {
        replacer: "final".to_string(),
        targets: vec!["quiz1".to_string()],
    }];

    let out = calculate(
        &roster,
        &fixture_points(),
        &fixture_categories(),
        &default_grading_scale(),
        &rules,
    )
    .unwrap();

    // Avery: hw 80/60/100, drop 60 → 90; quiz 90 (85 would not improve it);
    // final 85. Final % = 90*.4 + 90*.2 + 85*.4 = 88.0 → B+.
    let avery = &out.results[0];
    assert_eq!(avery.student, "Lee, Avery");
    assert_eq!(avery.category_scores["Homework"], 90.0);
    assert_eq!(avery.category_scores["Quizzes"], 90.0);
    assert_eq!(avery.final_percentage, 88.0);
    assert_eq!(avery.letter_grade, "B+");
    assert!(avery.replacement_info.is_none());

    // Jules: hw1 blank and hw3 non-numeric leave only hw2 (70); drop_lowest 1
    // has no surplus, so 70 stays. quiz 40 replaced by final 70.
    // Final % = 70*.4 + 70*.2 + 70*.4 = 70.0 → C.
    let jules = &out.results[1];
    assert_eq!(jules.category_scores["Homework"], 70.0);
    assert_eq!(jules.category_scores["Quizzes"], 70.0);
    assert_eq!(jules.final_percentage, 70.0);
    assert_eq!(jules.letter_grade, "C");
    let info = jules.replacement_info.as_ref().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].replaced, "quiz1");
    assert_eq!(info[0].improvement, 30.0);
    assert_eq!(info[0].category.as_deref(), Some("Quizzes"));

    assert_eq!(out.summary.total_students, 2);
    assert_eq!(
        out.summary.grade_distribution.values().sum::<usize>(),
        out.results.len()
    );

    let csv = export_csv(&out.results, &fixture_categories());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Student,ID,SIS User ID,Homework,Quizzes,Final,Final %,Letter Grade"
    );
    assert_eq!(lines[1], "\"Lee, Avery\",101,s101,90,90,85,88,B+");
    assert_eq!(lines[2], "\"Moreno, Jules\",102,s102,70,70,70,70,C");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_weight_mismatch_rejects_whole_request() {
    let mut categories = fixture_categories();
    categories[0].weight = 50.0; // 110 total

    let err = calculate(
        &fixture_roster(),
        &fixture_points(),
        &categories,
        &default_grading_scale(),
        &[],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Category weights must sum to 100% (currently 110.0%)"
    );
}

#[test]
fn test_single_full_weight_category_matches_raw_average() {
    let roster = vec![student(&[
        ("Student", json!("Solo")),
        ("a1", json!("7")),
        ("a2", json!("8")),
        ("a3", json!("8")),
    ])];
    let points: PointsPossible = ["a1", "a2", "a3"]
        .iter()
        .map(|a| (a.to_string(), Some(9.0)))
        .collect();
    let categories = vec![GradeCategory {
        name: "All".to_string(),
        weight: 100.0,
        drop_lowest: 0,
        assignments: vec!["a1".into(), "a2".into(), "a3".into()],
    }];

    let out = calculate(&roster, &points, &categories, &default_grading_scale(), &[]).unwrap();
    let expected: f64 = (7.0 / 9.0 + 8.0 / 9.0 + 8.0 / 9.0) / 3.0 * 100.0;
    let expected_rounded = (expected * 100.0).round() / 100.0;
    assert_eq!(out.results[0].final_percentage, expected_rounded);
}
