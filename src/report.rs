use crate::schema::{AccuracyIssue, AccuracyResult};

/// JSON Schema describing the serialized [`AccuracyResult`].
pub fn accuracy_result_schema() -> serde_json::Result<serde_json::Value> {
    let root = schemars::schema_for!(AccuracyResult);
    serde_json::to_value(root)
}

impl AccuracyResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Operator-facing summary: scores, issues by descending severity, then
    /// the successful mappings.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Harmonization Accuracy Report\n\n");
        output.push_str("| Component | Score |\n|---|---|\n");
        for (component, score) in [
            ("Overall", self.overall_accuracy_percentage),
            ("Structural", self.structural_accuracy),
            ("Data completeness", self.data_completeness),
            ("Field mapping", self.field_mapping_accuracy),
        ] {
            output.push_str(&format!("| {} | {:.1}% |\n", component, score));
        }

        output.push_str(&format!("\n## Issues ({})\n\n", self.issues.len()));
        if self.issues.is_empty() {
            output.push_str("No issues found.\n");
        } else {
            output.push_str("| Severity | Kind | Field | Description | Expected | Actual |\n");
            output.push_str("|---|---|---|---|---|---|\n");

            let mut issues: Vec<&AccuracyIssue> = self.issues.iter().collect();
            // Stable: keeps scorer order within a severity
            issues.sort_by(|a, b| b.severity.cmp(&a.severity));

            for issue in issues {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    issue.severity,
                    issue.kind,
                    cell(issue.field.as_deref()),
                    cell(Some(issue.description.as_str())),
                    cell(issue.expected_value.as_deref()),
                    cell(issue.actual_value.as_deref()),
                ));
            }
        }

        output.push_str(&format!(
            "\n## Successful Mappings ({})\n\n",
            self.successful_mappings.len()
        ));
        for mapping in &self.successful_mappings {
            output.push_str(&format!("- {}\n", mapping));
        }

        output
    }
}

fn cell(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => text.replace('|', "\\|").replace('\n', " "),
        _ => "-".to_string(),
    }
}
