use anyhow::Context;
use harmonization_accuracy::{AccuracyValidator, ValidatorConfig};
use std::fs;

const SAMPLE_CANONICAL: &str = r#"{
  "wellId": "W-000",
  "wellName": "Example",
  "location": { "county": "Example", "state": "XX" },
  "production": [{ "date": "2020-01-01", "oilBbl": 0 }]
}"#;

const SAMPLE_ORIGINAL: &str = r#"{
  "API_NUMBER": "42-501-20130",
  "LEASE_NAME": "Smith Ranch 3H",
  "CNTY": "Andrews",
  "PROD_DT": "01/31/2024",
  "OIL": 1520,
  "GAS": 2210
}"#;

const SAMPLE_HARMONIZED: &str = r#"{
  "wellId": "42-501-20130",
  "wellName": "Smith Ranch 3H",
  "location": { "county": "Andrews" },
  "production": [{ "date": "2024-01-31", "oilBbl": "1520" }]
}"#;

/// Usage: score_documents [CANONICAL ORIGINAL HARMONIZED [CONFIG]]
///
/// Without arguments, scores a built-in well production sample.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (canonical, original, harmonized) = match args.as_slice() {
        [] => (
            SAMPLE_CANONICAL.to_string(),
            SAMPLE_ORIGINAL.to_string(),
            SAMPLE_HARMONIZED.to_string(),
        ),
        [canonical, original, harmonized, ..] => (
            read(canonical)?,
            read(original)?,
            read(harmonized)?,
        ),
        _ => anyhow::bail!("expected CANONICAL ORIGINAL HARMONIZED [CONFIG]"),
    };

    let config = match args.get(3) {
        Some(path) => ValidatorConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid validator config in {}", path))?,
        None => ValidatorConfig::default(),
    };

    let result = AccuracyValidator::new(config).validate(&canonical, &original, &harmonized);

    println!("{}", result.to_markdown());
    println!("{}", result.to_json()?);

    Ok(())
}

fn read(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}
