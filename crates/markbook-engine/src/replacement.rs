//! Cross-assignment score replacement, applied per student before category
//! aggregation.

use std::collections::HashMap;

use crate::models::{GradeCategory, PointsPossible, ReplacementDetail, ReplacementRule, StudentRecord};
use crate::resolve::{assignment_percentage, round2};

/// Substitutions for one student: target assignment → replacement score,
/// plus the display records in rule-application order.
#[derive(Debug, Default)]
pub struct ReplacementOutcome {
    pub replaced_scores: HashMap<String, f64>,
    pub details: Vec<ReplacementDetail>,
}

/// Apply every rule, in request order, for one student.
///
/// A rule is a no-op when its replacer is unscoreable. Otherwise the target
/// with the lowest resolvable score strictly below the replacer's is
/// substituted (first-encountered target wins ties). When two rules select
/// the same target, the later rule's score overwrites the earlier one in the
/// aggregation map — last write wins, by policy — while both rules' records
/// are kept.
pub fn apply_replacement_rules(
    student: &StudentRecord,
    points_possible: &PointsPossible,
    rules: &[ReplacementRule],
    categories: &[GradeCategory],
) -> ReplacementOutcome {
    let mut outcome = ReplacementOutcome::default();

    for rule in rules {
        let Some(replacer_score) = assignment_percentage(student, &rule.replacer, points_possible)
        else {
            continue;
        };

        let mut lowest: Option<(&str, f64)> = None;
        for target in &rule.targets {
            let Some(target_score) = assignment_percentage(student, target, points_possible)
            else {
                continue;
            };
            // Strictly lower only: an equal score gains nothing.
            if target_score < replacer_score
                && lowest.is_none_or(|(_, score)| target_score < score)
            {
                lowest = Some((target, target_score));
            }
        }

        if let Some((target, original)) = lowest {
            outcome
                .replaced_scores
                .insert(target.to_string(), replacer_score);

            let category = categories
                .iter()
                .find(|cat| cat.assignments.iter().any(|a| a == target))
                .map(|cat| cat.name.clone());

            tracing::debug!(
                replacer = %rule.replacer,
                replaced = %target,
                original,
                new = replacer_score,
                "replacement applied"
            );

            outcome.details.push(ReplacementDetail {
                replacer: rule.replacer.clone(),
                replaced: target.to_string(),
                original_score: round2(original),
                new_score: round2(replacer_score),
                improvement: round2(replacer_score - original),
                category,
            });
        }
    }

    outcome
}
