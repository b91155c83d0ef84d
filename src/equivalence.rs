use crate::utils::{parse_calendar_date, parse_number};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Two numbers closer than this are the same value.
pub const NUMERIC_TOLERANCE: f64 = 0.001;

/// Decides whether two scalar renderings denote the same value.
///
/// The first applicable rule decides:
/// 1. case-insensitive text equality
/// 2. both numeric: equal within [`NUMERIC_TOLERANCE`]
/// 3. both dates: same calendar date, time of day ignored
/// 4. otherwise different
pub fn values_equivalent(a: &str, b: &str) -> bool {
    if a == b || a.to_lowercase() == b.to_lowercase() {
        return true;
    }

    if let (Some(x), Some(y)) = (parse_number(a), parse_number(b)) {
        return (x - y).abs() < NUMERIC_TOLERANCE;
    }

    if let (Some(x), Some(y)) = (parse_calendar_date(a), parse_calendar_date(b)) {
        return x == y;
    }

    false
}

/// One scalar rendering with its numeric and date readings parsed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    lowered: String,
    number: Option<f64>,
    date: Option<NaiveDate>,
}

impl ParsedValue {
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
            number: parse_number(text),
            date: parse_calendar_date(text),
        }
    }
}

/// Set of candidate values answering "is any candidate equivalent to this one?"
/// with the same rules as [`values_equivalent`], without a pairwise scan.
#[derive(Debug, Default)]
pub struct ValueIndex {
    texts: HashSet<String>,
    /// Finite numeric readings, sorted.
    numbers: Vec<f64>,
    /// Calendar dates of every candidate.
    dates: HashSet<NaiveDate>,
    /// Calendar dates of candidates that have no numeric reading.
    non_numeric_dates: HashSet<NaiveDate>,
}

impl ValueIndex {
    pub fn new<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = Self::default();

        for candidate in candidates {
            let parsed = ParsedValue::new(candidate);

            if let Some(date) = parsed.date {
                index.dates.insert(date);
                if parsed.number.is_none() {
                    index.non_numeric_dates.insert(date);
                }
            }
            if let Some(number) = parsed.number.filter(|n| n.is_finite()) {
                index.numbers.push(number);
            }
            index.texts.insert(parsed.lowered);
        }

        index.numbers.sort_by(f64::total_cmp);
        index
    }

    pub fn contains_equivalent(&self, value: &ParsedValue) -> bool {
        if self.texts.contains(&value.lowered) {
            return true;
        }

        match (value.number, value.date) {
            // A numeric value never reaches the date rule against a numeric candidate
            (Some(number), date) => {
                self.contains_number_near(number)
                    || date.is_some_and(|d| self.non_numeric_dates.contains(&d))
            }
            (None, Some(date)) => self.dates.contains(&date),
            (None, None) => false,
        }
    }

    fn contains_number_near(&self, number: f64) -> bool {
        if !number.is_finite() {
            return false;
        }

        // Widen the window so rounding at its edges never hides a match
        let low = number - 2.0 * NUMERIC_TOLERANCE;
        let high = number + 2.0 * NUMERIC_TOLERANCE;
        let start = self.numbers.partition_point(|n| *n < low);

        self.numbers[start..]
            .iter()
            .take_while(|n| **n <= high)
            .any(|n| (number - n).abs() < NUMERIC_TOLERANCE)
    }
}
