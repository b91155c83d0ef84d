use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::schema::{AccuracyIssue, AccuracyResult, IssueKind, Severity};
use crate::utils::parse_document;
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Checks that renamed fields stay within their semantic category.
///
/// Each distinct leaf field name of the original is assigned the first
/// matching synonym category. The score is the share of those names whose
/// category is still represented by some field name in the harmonized
/// document. Names without a category are left out; when none is left the
/// score is 100.
pub fn score_field_mapping(
    canonical_schema: &str,
    original: &str,
    harmonized: &str,
    config: &ValidatorConfig,
) -> AccuracyResult {
    match compare_field_names(canonical_schema, original, harmonized, config) {
        Ok(result) => result,
        Err(e) => {
            warn!("Field mapping validation failed: {}", e);
            AccuracyResult {
                issues: vec![AccuracyIssue::new(
                    IssueKind::FieldMapping,
                    Severity::Critical,
                    format!("Field mapping validation failed: {}", e),
                )],
                ..AccuracyResult::default()
            }
        }
    }
}

fn compare_field_names(
    canonical_schema: &str,
    original: &str,
    harmonized: &str,
    config: &ValidatorConfig,
) -> Result<AccuracyResult> {
    let original = parse_document(original)?;
    let harmonized = parse_document(harmonized)?;
    // Only checked for syntax; shape conformance is the structural scorer's job
    parse_document(canonical_schema)?;

    let table = &config.synonym_table;

    let harmonized_names = collect_field_names(&harmonized, false);
    let harmonized_categories: HashSet<&str> = harmonized_names
        .iter()
        .flat_map(|name| table.categories_of(name))
        .collect();

    let mut categorized = 0usize;
    let mut unmapped = Vec::new();

    for name in collect_field_names(&original, true) {
        let Some(category) = table.category_of(&name) else {
            continue;
        };

        categorized += 1;
        if !harmonized_categories.contains(category) {
            unmapped.push(format!("{} ({})", name, category));
        }
    }

    let mapped = categorized - unmapped.len();
    let score = if categorized > 0 {
        mapped as f64 / categorized as f64 * 100.0
    } else {
        100.0
    };

    debug!(
        "Field mapping comparison: {} of {} categorized fields kept their category",
        mapped, categorized
    );

    let mut result = AccuracyResult {
        field_mapping_accuracy: score,
        ..AccuracyResult::default()
    };

    if score >= config.mapping_threshold {
        result
            .successful_mappings
            .push("Field mapping patterns follow expected conventions".to_string());
    } else {
        result.issues.push(
            AccuracyIssue::new(
                IssueKind::FieldMapping,
                Severity::Medium,
                format!(
                    "Field mapping accuracy below expected threshold; unmapped fields: {}",
                    unmapped.join(", ")
                ),
            )
            .with_expected(format!("{:.1}", config.mapping_threshold))
            .with_actual(format!("{:.1}", score)),
        );
    }

    result.record_metric("categorized_fields", categorized);
    result.record_metric("mapped_fields", mapped);

    Ok(result)
}

/// Distinct property names in first-seen order, from objects at any depth,
/// including objects held in arrays.
///
/// With `leaves_only`, names whose value is an object, or an array holding
/// objects, are skipped (the names inside them are still collected).
fn collect_field_names(root: &Value, leaves_only: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut stack = vec![root];

    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                for (name, child) in map {
                    let is_branch = match child {
                        Value::Object(_) => true,
                        Value::Array(items) => items.iter().any(Value::is_object),
                        _ => false,
                    };

                    if !(leaves_only && is_branch) && seen.insert(name.as_str()) {
                        names.push(name.clone());
                    }
                }
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    names
}
