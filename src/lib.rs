//! # Harmonization Accuracy
//!
//! Scores how faithfully a harmonized JSON document reproduces the shape of a
//! canonical example document and the content of the original document it
//! was derived from.
//!
//! ## Core Concepts
//!
//! - **Canonical schema**: an example document whose field structure is the target shape
//! - **Original data**: the non-canonical source document
//! - **Harmonized data**: the candidate output being scored against both
//! - **Structural accuracy**: share of canonical field paths present with the same JSON kind
//! - **Data completeness**: share of original scalar values found again in the output
//! - **Field mapping accuracy**: share of categorizable field names (dates, identifiers,
//!   names, ...) whose category survives the renaming
//!
//! The overall score is `0.4 * structural + 0.3 * completeness + 0.3 * field mapping`.
//! A malformed document only degrades the scorers that read it; validation
//! never fails outright and always returns a complete [`AccuracyResult`].
//!
//! ## Example
//!
//! ```rust
//! use harmonization_accuracy::*;
//!
//! let canonical = r#"{"wellId": "W-000", "depth": 1000}"#;
//! let original = r#"{"WELL_ID": "Alpha-1", "TD": 8500}"#;
//! let harmonized = r#"{"wellId": "Alpha-1", "depth": 8500}"#;
//!
//! let result = validate_harmonization(canonical, original, harmonized);
//! assert_eq!(result.structural_accuracy, 100.0);
//! assert_eq!(result.data_completeness, 100.0);
//! println!("{}", result.to_markdown());
//! ```

pub mod completeness;
pub mod config;
pub mod engine;
pub mod equivalence;
pub mod error;
pub mod extract;
pub mod field_mapping;
pub mod flatten;
pub mod report;
pub mod schema;
pub mod structural;
pub mod utils;

pub use completeness::score_completeness;
pub use config::{SynonymGroup, SynonymTable, ValidatorConfig, DEFAULT_MAPPING_THRESHOLD};
pub use engine::{
    weighted_overall, AccuracyValidator, COMPLETENESS_WEIGHT, FIELD_MAPPING_WEIGHT,
    STRUCTURAL_WEIGHT,
};
pub use equivalence::{values_equivalent, ParsedValue, ValueIndex, NUMERIC_TOLERANCE};
pub use error::{AccuracyError, Result};
pub use extract::extract_values;
pub use field_mapping::score_field_mapping;
pub use flatten::flatten_fields;
pub use report::accuracy_result_schema;
pub use schema::*;
pub use structural::score_structure;

/// Full validation with the default configuration.
pub fn validate_harmonization(
    canonical_schema: &str,
    original: &str,
    harmonized: &str,
) -> AccuracyResult {
    AccuracyValidator::default().validate(canonical_schema, original, harmonized)
}

/// Structural accuracy only: canonical field paths and kinds against the harmonized document.
pub fn validate_structural_accuracy(canonical_schema: &str, harmonized: &str) -> AccuracyResult {
    score_structure(canonical_schema, harmonized)
}

/// Data completeness only: original scalar values against the harmonized document.
pub fn validate_data_completeness(original: &str, harmonized: &str) -> AccuracyResult {
    score_completeness(original, harmonized)
}

/// Field mapping accuracy only, with the default synonym table and threshold.
pub fn validate_field_mapping(
    canonical_schema: &str,
    original: &str,
    harmonized: &str,
) -> AccuracyResult {
    score_field_mapping(
        canonical_schema,
        original,
        harmonized,
        &ValidatorConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_validation() {
        let canonical = r#"{
            "wellId": "W-000",
            "wellName": "Example",
            "location": { "county": "Example", "state": "XX" },
            "production": [{ "date": "2020-01-01", "oil": 0 }],
            "active": true
        }"#;
        let original = r#"{
            "API_NUMBER": "42-501-20130",
            "LEASE_NAME": "Smith Ranch 3H",
            "CNTY": "Kern",
            "ST": "CA",
            "PROD_DT": "01/15/2024",
            "OIL_BBL": 150
        }"#;
        let harmonized = r#"{
            "wellId": "42-501-20130",
            "wellName": "Smith Ranch 3H",
            "location": { "county": "Kern", "state": "CA" },
            "production": [{ "date": "2024-01-15", "oil": 150.0 }],
            "active": true
        }"#;

        let result = validate_harmonization(canonical, original, harmonized);

        assert_eq!(result.structural_accuracy, 100.0);
        assert_eq!(result.data_completeness, 100.0);
        assert_eq!(result.field_mapping_accuracy, 100.0);
        assert!(result.issues.is_empty());
        assert!((result.overall_accuracy_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_operations_match_full_run() {
        let canonical = r#"{"wellId":"W","depth":1}"#;
        let original = r#"{"well_id":"A","td":2}"#;
        let harmonized = r#"{"wellId":"A"}"#;

        let full = validate_harmonization(canonical, original, harmonized);
        let structural = validate_structural_accuracy(canonical, harmonized);
        let completeness = validate_data_completeness(original, harmonized);
        let mapping = validate_field_mapping(canonical, original, harmonized);

        assert_eq!(full.structural_accuracy, structural.structural_accuracy);
        assert_eq!(full.data_completeness, completeness.data_completeness);
        assert_eq!(full.field_mapping_accuracy, mapping.field_mapping_accuracy);
        assert_eq!(
            full.issues.len(),
            structural.issues.len() + completeness.issues.len() + mapping.issues.len()
        );
    }
}
