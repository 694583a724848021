//! Category aggregation, final score, letter assignment, and the
//! distribution summary.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::models::{
    CalculationOutput, GradeCategory, GradingScale, PointsPossible, ReplacementRule,
    StudentRecord, StudentResult, Summary,
};
use crate::replacement::apply_replacement_rules;
use crate::resolve::{assignment_percentage, cell_text, round2};

/// Weight-sum validation tolerance, in percentage points.
const WEIGHT_TOLERANCE: f64 = 0.01;

/// Letter assigned when no scale floor qualifies.
const FALLBACK_GRADE: &str = "F";

/// Compute grades for every student in the roster.
///
/// Fails as a whole when category weights do not sum to 100 ± 0.01; every
/// other irregularity (missing scores, malformed cells, unknown replacement
/// targets) degrades gracefully per student.
pub fn calculate(
    roster: &[StudentRecord],
    points_possible: &PointsPossible,
    categories: &[GradeCategory],
    grading_scale: &GradingScale,
    replacement_rules: &[ReplacementRule],
) -> Result<CalculationOutput> {
    let total_weight: f64 = categories.iter().map(|cat| cat.weight).sum();
    if (total_weight - 100.0).abs() > WEIGHT_TOLERANCE {
        return Err(EngineError::WeightSum {
            total: total_weight,
        });
    }

    let mut results = Vec::with_capacity(roster.len());

    for student in roster {
        let replacements =
            apply_replacement_rules(student, points_possible, replacement_rules, categories);

        let mut category_scores = BTreeMap::new();
        let mut final_score = 0.0;

        for category in categories {
            // A category with no assignments contributes nothing and is
            // absent from the per-category breakdown.
            if category.assignments.is_empty() {
                continue;
            }

            let mut scores = Vec::with_capacity(category.assignments.len());
            for assignment in &category.assignments {
                if let Some(&replaced) = replacements.replaced_scores.get(assignment) {
                    scores.push(replaced);
                } else if let Some(pct) =
                    assignment_percentage(student, assignment, points_possible)
                {
                    scores.push(pct);
                }
            }

            let average = category_average(scores, category.drop_lowest);
            category_scores.insert(category.name.clone(), round2(average));

            // The running total takes the full-precision average; the rounded
            // value above is display-only.
            final_score += average * category.weight / 100.0;
        }

        let letter_grade = letter_for(grading_scale, final_score);

        results.push(StudentResult {
            student: cell_text(student, "Student"),
            id: cell_text(student, "ID"),
            sis_user_id: cell_text(student, "SIS User ID"),
            category_scores,
            final_percentage: round2(final_score),
            letter_grade,
            replacement_info: (!replacements.details.is_empty()).then_some(replacements.details),
        });
    }

    let summary = Summary {
        total_students: results.len(),
        grade_distribution: distribution(&results),
    };

    Ok(CalculationOutput { results, summary })
}

/// Mean of the surviving scores after the drop-lowest policy.
///
/// Dropping applies only when there is a strict surplus of scores over
/// `drop_lowest`; otherwise every score is averaged. Zero scores average to
/// exactly 0.0.
fn category_average(mut scores: Vec<f64>, drop_lowest: usize) -> f64 {
    if drop_lowest > 0 && scores.len() > drop_lowest {
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        scores.truncate(scores.len() - drop_lowest);
    }

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// First scale entry, floors descending, whose floor is at or below the
/// unrounded final score. Falls back to "F" when every floor exceeds it.
fn letter_for(scale: &GradingScale, final_score: f64) -> String {
    let mut entries: Vec<(&String, f64)> = scale.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    for (label, floor) in entries {
        if final_score >= floor {
            return label.clone();
        }
    }

    FALLBACK_GRADE.to_string()
}

/// Letter grade histogram across all results. Order-independent.
fn distribution(results: &[StudentResult]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.letter_grade.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_grading_scale;
    use serde_json::json;

    fn student(pairs: &[(&str, &str)]) -> StudentRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn points(names: &[&str], max: f64) -> PointsPossible {
        names.iter().map(|n| (n.to_string(), Some(max))).collect()
    }

    fn category(name: &str, weight: f64, drop: usize, assignments: &[&str]) -> GradeCategory {
        GradeCategory {
            name: name.to_string(),
            weight,
            drop_lowest: drop,
            assignments: assignments.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_weight_sum_validation() {
        let cats = [category("HW", 60.0, 0, &["hw1"])];
        let err = calculate(&[], &points(&["hw1"], 10.0), &cats, &default_grading_scale(), &[])
            .unwrap_err();
        // Whole totals keep their decimal point, as the frontend shows them.
        assert_eq!(
            err.to_string(),
            "Category weights must sum to 100% (currently 60.0%)"
        );

        let cats = [category("HW", 60.5, 0, &["hw1"])];
        let err = calculate(&[], &points(&["hw1"], 10.0), &cats, &default_grading_scale(), &[])
            .unwrap_err();
        assert!(err.to_string().contains("60.5%"));

        let cats = [
            category("HW", 60.0, 0, &["hw1"]),
            category("Quiz", 40.005, 0, &["q1"]),
        ];
        assert!(calculate(
            &[],
            &points(&["hw1", "q1"], 10.0),
            &cats,
            &default_grading_scale(),
            &[]
        )
        .is_ok());
    }

    #[test]
    fn test_drop_lowest_with_surplus() {
        // hw1 = 80%, hw2 = 100%, drop 1 leaves only the 100.
        let roster = vec![student(&[("Student", "A"), ("hw1", "8"), ("hw2", "10")])];
        let cats = [category("HW", 100.0, 1, &["hw1", "hw2"])];
        let out = calculate(
            &roster,
            &points(&["hw1", "hw2"], 10.0),
            &cats,
            &default_grading_scale(),
            &[],
        )
        .unwrap();

        let result = &out.results[0];
        assert_eq!(result.category_scores["HW"], 100.0);
        assert_eq!(result.final_percentage, 100.0);
        assert_eq!(result.letter_grade, "A");
    }

    #[test]
    fn test_drop_lowest_without_surplus_averages_everything() {
        let roster = vec![student(&[("hw1", "8"), ("hw2", "10")])];
        let cats = [category("HW", 100.0, 2, &["hw1", "hw2"])];
        let out = calculate(
            &roster,
            &points(&["hw1", "hw2"], 10.0),
            &cats,
            &default_grading_scale(),
            &[],
        )
        .unwrap();
        assert_eq!(out.results[0].category_scores["HW"], 90.0);
    }

    #[test]
    fn test_category_with_no_resolvable_scores_contributes_zero() {
        let roster = vec![student(&[("hw1", "")])];
        let cats = [
            category("HW", 50.0, 0, &["hw1"]),
            category("Quiz", 50.0, 0, &["q1"]),
        ];
        let pts = points(&["hw1", "q1"], 10.0);
        let out =
            calculate(&roster, &pts, &cats, &default_grading_scale(), &[]).unwrap();
        assert_eq!(out.results[0].category_scores["HW"], 0.0);
        assert_eq!(out.results[0].final_percentage, 0.0);
        assert_eq!(out.results[0].letter_grade, "F");
    }

    #[test]
    fn test_empty_assignment_list_skips_category() {
        let roster = vec![student(&[("hw1", "9")])];
        let cats = [
            category("HW", 100.0, 0, &["hw1"]),
            category("Empty", 0.0, 0, &[]),
        ];
        let out = calculate(
            &roster,
            &points(&["hw1"], 10.0),
            &cats,
            &default_grading_scale(),
            &[],
        )
        .unwrap();
        assert!(!out.results[0].category_scores.contains_key("Empty"));
    }

    #[test]
    fn test_final_uses_unrounded_category_averages() {
        // Three scores of 1/3 each → average 33.333…%, rounded display 33.33.
        // Two categories at weight 50 give a final of 33.333…, not 33.33.
        let roster = vec![student(&[("a1", "1"), ("a2", "1"), ("a3", "1")])];
        let pts = points(&["a1", "a2", "a3"], 3.0);
        let cats = [
            category("C1", 50.0, 0, &["a1", "a2", "a3"]),
            category("C2", 50.0, 0, &["a1", "a2", "a3"]),
        ];
        let out =
            calculate(&roster, &pts, &cats, &default_grading_scale(), &[]).unwrap();
        let result = &out.results[0];
        assert_eq!(result.category_scores["C1"], 33.33);
        // Summing the rounded display values would also give 33.33 here, so
        // pick a scale floor sitting between the two to observe the letter.
        let mut scale = GradingScale::new();
        scale.insert("Pass".to_string(), 100.0 / 3.0);
        scale.insert("Fail".to_string(), 0.0);
        let out = calculate(&roster, &pts, &cats, &scale, &[]).unwrap();
        assert_eq!(out.results[0].letter_grade, "Pass");
        assert_eq!(out.results[0].final_percentage, 33.33);
    }

    #[test]
    fn test_replacement_lifts_category_average() {
        let roster = vec![student(&[("Student", "B"), ("hw1", "6"), ("quiz1", "9")])];
        let pts = points(&["hw1", "quiz1"], 10.0);
        let cats = [
            category("HW", 50.0, 0, &["hw1"]),
            category("Quiz", 50.0, 0, &["quiz1"]),
        ];
        let rules = [ReplacementRule {
            replacer: "quiz1".to_string(),
            targets: vec!["hw1".to_string()],
        }];

        let out =
            calculate(&roster, &pts, &cats, &default_grading_scale(), &rules).unwrap();
        let result = &out.results[0];
        assert_eq!(result.category_scores["HW"], 90.0);
        let info = result.replacement_info.as_ref().unwrap();
        assert_eq!(info[0].original_score, 60.0);
        assert_eq!(info[0].new_score, 90.0);
        assert_eq!(info[0].improvement, 30.0);
        assert_eq!(info[0].category.as_deref(), Some("HW"));
    }

    #[test]
    fn test_letter_assignment_monotonic() {
        let scale = default_grading_scale();
        let mut order: Vec<(&String, f64)> = scale.iter().map(|(k, v)| (k, *v)).collect();
        order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let mut previous_rank = 0usize;
        for pct in (0..=100).map(f64::from) {
            let letter = letter_for(&scale, pct);
            let rank = order.iter().position(|(label, _)| **label == letter).unwrap();
            assert!(rank >= previous_rank, "letter dropped at {pct}%");
            previous_rank = rank;
        }
    }

    #[test]
    fn test_fallback_when_scale_has_no_zero_floor() {
        let mut scale = GradingScale::new();
        scale.insert("A".to_string(), 90.0);
        assert_eq!(letter_for(&scale, 50.0), "F");
    }

    #[test]
    fn test_distribution_counts_match_roster() {
        let roster = vec![
            student(&[("Student", "A"), ("hw1", "10")]),
            student(&[("Student", "B"), ("hw1", "8")]),
            student(&[("Student", "C"), ("hw1", "")]),
        ];
        let cats = [category("HW", 100.0, 0, &["hw1"])];
        let out = calculate(
            &roster,
            &points(&["hw1"], 10.0),
            &cats,
            &default_grading_scale(),
            &[],
        )
        .unwrap();
        assert_eq!(out.summary.total_students, 3);
        let counted: usize = out.summary.grade_distribution.values().sum();
        assert_eq!(counted, 3);
        assert_eq!(out.summary.grade_distribution["A"], 1);
        assert_eq!(out.summary.grade_distribution["B"], 1);
        assert_eq!(out.summary.grade_distribution["F"], 1);
    }
}
