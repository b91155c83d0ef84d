use crate::error::{AccuracyError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};

const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses one input document.
///
/// Nesting depth is unbounded; deep documents grow the stack on the heap
/// instead of hitting the default recursion limit.
pub fn parse_document(text: &str) -> Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    Ok(value)
}

/// Parses one input document and requires an object at its root.
pub fn parse_object(text: &str, document: &str) -> Result<Map<String, Value>> {
    match parse_document(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(AccuracyError::NotAnObject {
            document: document.to_string(),
        }),
    }
}

/// Parses a real number, tolerating surrounding whitespace.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Parses a calendar date from a date or date-time string.
///
/// Time of day and offset are discarded; the date is the one written in the text.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.date_naive());
    }

    // Every supported format carries at least a year
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(stamp) = DateTime::parse_from_str(text, format) {
            return Some(stamp.date_naive());
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(text, format) {
            return Some(stamp.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_rejects_non_object_root() {
        assert!(parse_object(r#"{"a": 1}"#, "canonical").is_ok());

        let err = parse_object("[1, 2]", "canonical").unwrap_err();
        assert!(matches!(err, AccuracyError::NotAnObject { .. }));
        assert!(err.to_string().contains("canonical"));
    }

    #[test]
    fn test_parse_document_reports_malformed_json() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, AccuracyError::Json(_)));
    }

    #[test]
    fn test_parse_document_accepts_deep_nesting() {
        let depth = 500;
        let text = format!("{}\"x\"{}", "{\"n\":".repeat(depth), "}".repeat(depth));

        let mut value = &parse_document(&text).unwrap();
        for _ in 0..depth {
            value = &value["n"];
        }
        assert_eq!(value, "x");
    }

    #[test]
    fn test_parse_document_rejects_trailing_input() {
        assert!(parse_document(r#"{"a": 1} {"b": 2}"#).is_err());
        assert!(parse_document("{\"a\": 1}\n").is_ok());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("-3.25"), Some(-3.25));
        assert_eq!(parse_number("Alpha-1"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        for text in [
            "2024-01-15",
            "2024-01-15T00:00:00Z",
            "2024-01-15T23:59:59.123+05:00",
            "2024-01-15T08:30:00",
            "2024-01-15T08:30Z",
            "2024-01-15T08:30:00.000+0000",
            "2024-01-15 08:30:00-0700",
            "2024-01-15 08:30:00+02:00",
            "2024-01-15 08:30",
            "2024/01/15",
            "01/15/2024",
            "01/15/2024 14:00",
            "January 15, 2024",
            "Jan 15, 2024",
            "15 January 2024",
        ] {
            assert_eq!(parse_calendar_date(text), Some(expected), "format: {}", text);
        }
    }

    #[test]
    fn test_parse_calendar_date_rejects_non_dates() {
        assert_eq!(parse_calendar_date("Alpha-1"), None);
        assert_eq!(parse_calendar_date("8500"), None);
        assert_eq!(parse_calendar_date("2024-13-40"), None);
        assert_eq!(parse_calendar_date(""), None);
    }
}
