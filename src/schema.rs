use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Dot-joined address of an object property, e.g. `location.county`.
/// Array indices never appear in a path.
pub type FieldPath = String;

/// Flattened view of a document's object tree, in document order.
pub type FieldMap = IndexMap<FieldPath, FieldType>;

/// Raw JSON value kind. Booleans keep their literal tag rather than a unified "boolean".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
}

impl FieldType {
    pub fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Object(_) => FieldType::Object,
            Value::Array(_) => FieldType::Array,
            Value::String(_) => FieldType::String,
            Value::Number(_) => FieldType::Number,
            Value::Bool(true) => FieldType::True,
            Value::Bool(false) => FieldType::False,
            Value::Null => FieldType::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::True => "true",
            FieldType::False => "false",
            FieldType::Null => "null",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[schemars(description = "Cosmetic difference that does not affect the data")]
    Low,

    #[schemars(description = "A value or type was not carried over as expected")]
    Medium,

    #[schemars(description = "A required part of the canonical structure is missing")]
    High,

    #[schemars(description = "A whole scoring component could not be evaluated")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    #[schemars(description = "A canonical field is missing, or the structure could not be read")]
    Structural,

    #[schemars(description = "A canonical field is present with a different JSON kind")]
    TypeMismatch,

    #[schemars(description = "A value from the original document was not found in the output")]
    DataLoss,

    #[schemars(description = "Field renamings do not follow the configured synonym groups")]
    FieldMapping,

    #[schemars(description = "The validation run itself failed")]
    ValidationError,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Structural => "structural",
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::DataLoss => "data_loss",
            IssueKind::FieldMapping => "field_mapping",
            IssueKind::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyIssue {
    pub kind: IssueKind,

    #[schemars(description = "Field path the issue refers to, when it concerns a single field")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldPath>,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,

    pub severity: Severity,
}

impl AccuracyIssue {
    pub fn new(kind: IssueKind, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            description: description.into(),
            expected_value: None,
            actual_value: None,
            severity,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected_value = Some(expected.into());
        self
    }

    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual_value = Some(actual.into());
        self
    }
}

/// Outcome of a validation run, or the partial outcome of a single scorer.
///
/// Every percentage lies in `[0, 100]`. A partial result only fills the
/// percentage owned by the scorer that produced it; the others stay at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyResult {
    #[schemars(description = "0.4 * structural + 0.3 * completeness + 0.3 * field mapping")]
    pub overall_accuracy_percentage: f64,

    #[schemars(description = "Share of canonical field paths present with the same JSON kind")]
    pub structural_accuracy: f64,

    #[schemars(description = "Share of original scalar values found in the harmonized document")]
    pub data_completeness: f64,

    #[schemars(description = "Share of categorizable original field names whose category survives")]
    pub field_mapping_accuracy: f64,

    pub issues: Vec<AccuracyIssue>,

    pub successful_mappings: Vec<String>,

    pub metrics: BTreeMap<String, f64>,
}

impl AccuracyResult {
    pub fn critical_issues(&self) -> impl Iterator<Item = &AccuracyIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Critical)
    }

    pub fn has_critical_issues(&self) -> bool {
        self.critical_issues().next().is_some()
    }

    pub fn issues_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &AccuracyIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    pub(crate) fn record_metric(&mut self, name: &str, value: usize) {
        self.metrics.insert(name.to_string(), value as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_field_type_tags() {
        assert_eq!(FieldType::of(&json!(true)).as_str(), "true");
        assert_eq!(FieldType::of(&json!(false)).as_str(), "false");
        assert_eq!(FieldType::of(&json!(null)).as_str(), "null");
        assert_eq!(FieldType::of(&json!(1.5)).as_str(), "number");
        assert_eq!(FieldType::of(&json!([])).as_str(), "array");
        assert_eq!(FieldType::of(&json!({})).as_str(), "object");
    }

    #[test]
    fn test_issue_serializes_with_wire_names() {
        let issue = AccuracyIssue::new(IssueKind::TypeMismatch, Severity::Medium, "mismatch")
            .with_field("depth")
            .with_expected("number")
            .with_actual("string");

        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["kind"], "type_mismatch");
        assert_eq!(value["severity"], "medium");
        assert_eq!(value["expectedValue"], "number");
        assert_eq!(value["actualValue"], "string");
    }

    #[test]
    fn test_issue_omits_absent_optionals() {
        let issue = AccuracyIssue::new(IssueKind::DataLoss, Severity::Critical, "boom");
        let value = serde_json::to_value(&issue).unwrap();
        assert!(value.get("field").is_none());
        assert!(value.get("expectedValue").is_none());
    }
}
