use crate::equivalence::{ParsedValue, ValueIndex};
use crate::error::Result;
use crate::extract::extract_values;
use crate::schema::{AccuracyIssue, AccuracyResult, IssueKind, Severity};
use crate::utils::parse_document;
use log::{debug, warn};

/// Measures how many scalar values of the original survive in the harmonized document.
///
/// Matching is existential: one harmonized value may account for any number
/// of original values. An original without values scores 100.
pub fn score_completeness(original: &str, harmonized: &str) -> AccuracyResult {
    match compare_values(original, harmonized) {
        Ok(result) => result,
        Err(e) => {
            warn!("Data completeness validation failed: {}", e);
            AccuracyResult {
                issues: vec![AccuracyIssue::new(
                    IssueKind::DataLoss,
                    Severity::Critical,
                    format!("Data completeness validation failed: {}", e),
                )],
                ..AccuracyResult::default()
            }
        }
    }
}

fn compare_values(original: &str, harmonized: &str) -> Result<AccuracyResult> {
    let original_values = extract_values(&parse_document(original)?);
    let harmonized_values = extract_values(&parse_document(harmonized)?);
    let index = ValueIndex::new(harmonized_values.iter().map(String::as_str));

    let mut result = AccuracyResult::default();
    let mut preserved = 0usize;

    for value in &original_values {
        if index.contains_equivalent(&ParsedValue::new(value)) {
            preserved += 1;
            result
                .successful_mappings
                .push(format!("Value '{}' preserved in harmonization", value));
        } else {
            result.issues.push(
                AccuracyIssue::new(
                    IssueKind::DataLoss,
                    Severity::Medium,
                    format!("Original value '{}' not found in harmonized data", value),
                )
                .with_expected(value.as_str()),
            );
        }
    }

    let total = original_values.len();
    result.data_completeness = if total > 0 {
        preserved as f64 / total as f64 * 100.0
    } else {
        100.0
    };

    debug!(
        "Completeness comparison: {} of {} original values preserved",
        preserved, total
    );

    result.record_metric("original_values", total);
    result.record_metric("preserved_values", preserved);

    Ok(result)
}
