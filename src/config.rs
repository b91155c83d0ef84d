use crate::error::{AccuracyError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default score a field mapping must reach to count as following convention.
pub const DEFAULT_MAPPING_THRESHOLD: f64 = 80.0;

/// One semantic category of field names, recognized by name fragments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SynonymGroup {
    #[schemars(description = "Name of the semantic category, e.g. 'date'")]
    pub category: String,

    #[schemars(
        description = "Name fragments that mark a field as belonging to this category. Matched case-insensitively as substrings of the field name."
    )]
    pub fragments: Vec<String>,
}

impl SynonymGroup {
    pub fn new<I, S>(category: impl Into<String>, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, field_name: &str) -> bool {
        let name = field_name.to_lowercase();
        self.fragments
            .iter()
            .any(|fragment| name.contains(&fragment.to_lowercase()))
    }
}

/// Ordered synonym groups. When a name matches several groups, the earlier one wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            groups: vec![
                SynonymGroup::new("date", ["date", "dt", "time", "timestamp"]),
                SynonymGroup::new("id", ["id", "identifier", "number"]),
                SynonymGroup::new("name", ["name", "title", "label"]),
            ],
        }
    }
}

impl SynonymTable {
    pub fn new(groups: Vec<SynonymGroup>) -> Self {
        Self { groups }
    }

    /// Loads a table from a JSON array of `{ "category", "fragments" }` objects.
    pub fn from_json(text: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Appends a group, or extends the fragments of an existing category.
    #[must_use]
    pub fn with_group(mut self, group: SynonymGroup) -> Self {
        match self
            .groups
            .iter_mut()
            .find(|existing| existing.category == group.category)
        {
            Some(existing) => {
                for fragment in group.fragments {
                    if !existing.fragments.contains(&fragment) {
                        existing.fragments.push(fragment);
                    }
                }
            }
            None => self.groups.push(group),
        }
        self
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    /// First category whose fragments occur in `field_name`.
    pub fn category_of(&self, field_name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.matches(field_name))
            .map(|group| group.category.as_str())
    }

    /// Every category whose fragments occur in `field_name`.
    pub fn categories_of<'a>(&'a self, field_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.matches(field_name))
            .map(|group| group.category.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for group in &self.groups {
            if group.category.trim().is_empty() {
                return Err(AccuracyError::InvalidConfig(
                    "synonym group with an empty category name".to_string(),
                ));
            }

            if !seen.insert(group.category.as_str()) {
                return Err(AccuracyError::InvalidConfig(format!(
                    "synonym category '{}' is defined more than once",
                    group.category
                )));
            }

            if group.fragments.is_empty() {
                return Err(AccuracyError::InvalidConfig(format!(
                    "synonym category '{}' has no name fragments",
                    group.category
                )));
            }

            // An empty fragment is a substring of every name
            if group.fragments.iter().any(|f| f.trim().is_empty()) {
                return Err(AccuracyError::InvalidConfig(format!(
                    "synonym category '{}' contains an empty name fragment",
                    group.category
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub synonym_table: SynonymTable,

    #[schemars(
        description = "Field mapping score (0-100) at or above which renamings are accepted"
    )]
    #[serde(default = "default_mapping_threshold")]
    pub mapping_threshold: f64,
}

fn default_mapping_threshold() -> f64 {
    DEFAULT_MAPPING_THRESHOLD
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            synonym_table: SynonymTable::default(),
            mapping_threshold: DEFAULT_MAPPING_THRESHOLD,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mapping_threshold.is_finite() || !(0.0..=100.0).contains(&self.mapping_threshold)
        {
            return Err(AccuracyError::InvalidConfig(format!(
                "mapping threshold {} must be between 0 and 100",
                self.mapping_threshold
            )));
        }

        self.synonym_table.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_categories() {
        let table = SynonymTable::default();

        assert_eq!(table.category_of("spud_date"), Some("date"));
        assert_eq!(table.category_of("ProductionDT"), Some("date"));
        assert_eq!(table.category_of("well_identifier"), Some("id"));
        assert_eq!(table.category_of("api_number"), Some("id"));
        assert_eq!(table.category_of("LeaseName"), Some("name"));
        assert_eq!(table.category_of("depth"), None);
    }

    #[test]
    fn test_first_matching_group_wins() {
        let table = SynonymTable::default();
        // "timestamp_id" matches both date and id; date is listed first
        assert_eq!(table.category_of("timestamp_id"), Some("date"));
        let all: Vec<&str> = table.categories_of("timestamp_id").collect();
        assert_eq!(all, vec!["date", "id"]);
    }

    #[test]
    fn test_with_group_extends_existing_category() {
        let table = SynonymTable::default()
            .with_group(SynonymGroup::new("date", ["spud"]))
            .with_group(SynonymGroup::new("volume", ["bbl", "mcf"]));

        assert_eq!(table.groups().len(), 4);
        assert_eq!(table.category_of("SPUD"), Some("date"));
        assert_eq!(table.category_of("oil_bbl"), Some("volume"));
    }

    #[test]
    fn test_table_from_json() {
        let table = SynonymTable::from_json(
            r#"[{"category": "volume", "fragments": ["bbl", "volume"]}]"#,
        )
        .unwrap();

        assert_eq!(table.groups().len(), 1);
        assert_eq!(table.category_of("oil_bbl"), Some("volume"));
        assert_eq!(table.category_of("spud_date"), None);
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        assert!(SynonymTable::from_json(r#"[{"category": "x", "fragments": []}]"#).is_err());
        assert!(SynonymTable::from_json(r#"[{"category": "x", "fragments": [""]}]"#).is_err());
        assert!(SynonymTable::from_json(r#"[{"category": " ", "fragments": ["a"]}]"#).is_err());
        assert!(SynonymTable::from_json(
            r#"[{"category": "x", "fragments": ["a"]}, {"category": "x", "fragments": ["b"]}]"#
        )
        .is_err());
    }

    #[test]
    fn test_config_defaults_and_threshold_bounds() {
        let config = ValidatorConfig::from_json("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());

        let config = ValidatorConfig::from_json(r#"{"mapping_threshold": 60}"#).unwrap();
        assert_eq!(config.mapping_threshold, 60.0);

        assert!(ValidatorConfig::from_json(r#"{"mapping_threshold": 120}"#).is_err());
        let config = ValidatorConfig {
            mapping_threshold: f64::NAN,
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
