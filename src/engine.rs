use crate::completeness::score_completeness;
use crate::config::ValidatorConfig;
use crate::error::{AccuracyError, Result};
use crate::field_mapping::score_field_mapping;
use crate::schema::{AccuracyIssue, AccuracyResult, IssueKind, Severity};
use crate::structural::score_structure;
use log::{debug, error, info};

pub const STRUCTURAL_WEIGHT: f64 = 0.4;
pub const COMPLETENESS_WEIGHT: f64 = 0.3;
pub const FIELD_MAPPING_WEIGHT: f64 = 0.3;

/// Runs the three scorers and folds their partial results into one report.
///
/// Holds only read-only configuration, so one validator can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct AccuracyValidator {
    config: ValidatorConfig,
}

impl AccuracyValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Full validation. Never fails: an orchestration error becomes a result
    /// carrying a single critical `validation_error` issue and zero scores.
    pub fn validate(
        &self,
        canonical_schema: &str,
        original: &str,
        harmonized: &str,
    ) -> AccuracyResult {
        info!("Starting harmonization accuracy validation");

        match self.try_validate(canonical_schema, original, harmonized) {
            Ok(result) => {
                info!(
                    "Accuracy validation completed. Overall accuracy: {:.1}%",
                    result.overall_accuracy_percentage
                );
                result
            }
            Err(e) => {
                error!("Error during accuracy validation: {}", e);
                let mut result = AccuracyResult {
                    issues: vec![AccuracyIssue::new(
                        IssueKind::ValidationError,
                        Severity::Critical,
                        format!("Accuracy validation failed: {}", e),
                    )],
                    ..AccuracyResult::default()
                };
                record_summary_metrics(&mut result);
                result
            }
        }
    }

    /// Full validation, surfacing orchestration errors instead of folding them
    /// into the result. Parse failures inside a scorer are never errors here.
    pub fn try_validate(
        &self,
        canonical_schema: &str,
        original: &str,
        harmonized: &str,
    ) -> Result<AccuracyResult> {
        self.config.validate()?;

        let structural = self.validate_structure(canonical_schema, harmonized);
        let completeness = self.validate_completeness(original, harmonized);
        let field_mapping = self.validate_field_mapping(canonical_schema, original, harmonized);

        let mut result = AccuracyResult {
            structural_accuracy: checked_percentage("structural", structural.structural_accuracy)?,
            data_completeness: checked_percentage(
                "data completeness",
                completeness.data_completeness,
            )?,
            field_mapping_accuracy: checked_percentage(
                "field mapping",
                field_mapping.field_mapping_accuracy,
            )?,
            ..AccuracyResult::default()
        };

        for partial in [structural, completeness, field_mapping] {
            result.issues.extend(partial.issues);
            result.successful_mappings.extend(partial.successful_mappings);
            result.metrics.extend(partial.metrics);
        }

        result.overall_accuracy_percentage = weighted_overall(
            result.structural_accuracy,
            result.data_completeness,
            result.field_mapping_accuracy,
        )?;

        record_summary_metrics(&mut result);

        debug!(
            "Scores: structural {:.1}%, completeness {:.1}%, field mapping {:.1}% ({} issues, {} successful mappings)",
            result.structural_accuracy,
            result.data_completeness,
            result.field_mapping_accuracy,
            result.issues.len(),
            result.successful_mappings.len()
        );

        Ok(result)
    }

    pub fn validate_structure(&self, canonical_schema: &str, harmonized: &str) -> AccuracyResult {
        score_structure(canonical_schema, harmonized)
    }

    pub fn validate_completeness(&self, original: &str, harmonized: &str) -> AccuracyResult {
        score_completeness(original, harmonized)
    }

    pub fn validate_field_mapping(
        &self,
        canonical_schema: &str,
        original: &str,
        harmonized: &str,
    ) -> AccuracyResult {
        score_field_mapping(canonical_schema, original, harmonized, &self.config)
    }
}

/// `0.4 * structural + 0.3 * completeness + 0.3 * field mapping`, kept within `[0, 100]`.
pub fn weighted_overall(structural: f64, completeness: f64, field_mapping: f64) -> Result<f64> {
    let overall = structural * STRUCTURAL_WEIGHT
        + completeness * COMPLETENESS_WEIGHT
        + field_mapping * FIELD_MAPPING_WEIGHT;

    checked_percentage("overall", overall)
}

fn checked_percentage(component: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(AccuracyError::NonFiniteScore {
            component: component.to_string(),
        });
    }
    Ok(value.clamp(0.0, 100.0))
}

fn record_summary_metrics(result: &mut AccuracyResult) {
    let total = result.issues.len();
    let critical = result.critical_issues().count();
    let successful = result.successful_mappings.len();

    result.record_metric("total_issues", total);
    result.record_metric("critical_issues", critical);
    result.record_metric("successful_mappings", successful);
}
