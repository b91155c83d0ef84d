use crate::error::Result;
use crate::flatten::flatten_fields;
use crate::schema::{AccuracyIssue, AccuracyResult, IssueKind, Severity};
use crate::utils::parse_object;
use log::{debug, warn};

/// Compares the field shape of the harmonized document against the canonical example.
///
/// Only canonical paths are checked; extra harmonized fields are never
/// penalized. An empty canonical shape scores 0.
pub fn score_structure(canonical_schema: &str, harmonized: &str) -> AccuracyResult {
    match compare_structure(canonical_schema, harmonized) {
        Ok(result) => result,
        Err(e) => {
            warn!("Structural validation failed: {}", e);
            AccuracyResult {
                issues: vec![AccuracyIssue::new(
                    IssueKind::Structural,
                    Severity::Critical,
                    format!("Structural validation failed: {}", e),
                )],
                ..AccuracyResult::default()
            }
        }
    }
}

fn compare_structure(canonical_schema: &str, harmonized: &str) -> Result<AccuracyResult> {
    let canonical_fields = flatten_fields(&parse_object(canonical_schema, "canonical schema")?);
    let harmonized_fields = flatten_fields(&parse_object(harmonized, "harmonized")?);

    let mut result = AccuracyResult::default();
    let mut matched = 0usize;

    for (path, expected) in &canonical_fields {
        match harmonized_fields.get(path) {
            Some(actual) if actual == expected => {
                matched += 1;
                result.successful_mappings.push(format!(
                    "Field '{}' correctly mapped with type {}",
                    path, expected
                ));
            }
            Some(actual) => {
                result.issues.push(
                    AccuracyIssue::new(
                        IssueKind::TypeMismatch,
                        Severity::Medium,
                        format!("Type mismatch for field '{}'", path),
                    )
                    .with_field(path.as_str())
                    .with_expected(expected.as_str())
                    .with_actual(actual.as_str()),
                );
            }
            None => {
                result.issues.push(
                    AccuracyIssue::new(
                        IssueKind::Structural,
                        Severity::High,
                        format!("Missing required field '{}' in harmonized data", path),
                    )
                    .with_field(path.as_str()),
                );
            }
        }
    }

    let total = canonical_fields.len();
    result.structural_accuracy = if total > 0 {
        matched as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    debug!(
        "Structural comparison: {} of {} canonical fields matched",
        matched, total
    );

    result.record_metric("canonical_fields", total);
    result.record_metric("matched_fields", matched);

    Ok(result)
}
