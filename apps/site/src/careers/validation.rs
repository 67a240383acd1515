use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::careers::error::CareerError;
use crate::careers::models::{CareerRecord, ItemValue};

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which item value shapes a deployment accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// String, boolean, number or sequence of strings.
    #[default]
    Any,
    /// Every item value must be a boolean.
    BooleanOnly,
}

impl FromStr for ValuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ValuePolicy::Any),
            "boolean_only" | "boolean-only" | "bool" => Ok(ValuePolicy::BooleanOnly),
            other => Err(format!(
                "unknown value policy '{other}' (expected 'any' or 'boolean_only')"
            )),
        }
    }
}

/// Validates a `last_update` value.
///
/// PASS conditions:
/// - Matches `^\d{4}-\d{2}-\d{2}$` exactly
/// - Names a real calendar day (no month 13, no February 30)
///
/// Anything else, including `YYYY/MM/DD` which would parse as a date in
/// laxer parsers, fails with `DateFormat`.
pub fn validate_date_format(value: &str) -> Result<NaiveDate, CareerError> {
    let invalid = || CareerError::DateFormat {
        value: value.to_string(),
    };
    if !DATE_PATTERN.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Applies the value policy to every item of an already projected record.
pub fn validate_value_policy(
    record: &CareerRecord,
    policy: ValuePolicy,
) -> Result<(), CareerError> {
    if policy == ValuePolicy::Any {
        return Ok(());
    }
    for (si, section) in record.sections.iter().enumerate() {
        for (ii, item) in section.items.iter().enumerate() {
            if !matches!(item.value, ItemValue::Boolean(_)) {
                return Err(CareerError::Type {
                    path: format!("sections[{si}].items[{ii}]"),
                });
            }
        }
    }
    Ok(())
}
