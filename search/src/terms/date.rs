use super::{any_of, require_field, Bounded};
use crate::errors::{Result, SearchError};
use crate::value::{GenericValue, ScalarOrRange};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde_json::Value;

/// All dates are searched and stored in the convention's local time
pub const TIMEZONE: Tz = chrono_tz::America::Indiana::Indianapolis;

/// Parses an RFC 3339 timestamp and moves it into [`TIMEZONE`]
pub fn normalize_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&TIMEZONE).fixed_offset())
}

/// Exact or range match on a date field. All items are OR-ed.
#[derive(Debug, Clone, PartialEq)]
pub struct Date {
    field: String,
    clauses: Vec<Bounded>,
}

impl Date {
    pub fn new(field: &str, raw: &str) -> Result<Self> {
        require_field(field, "date")?;
        Self::from_value(field, &GenericValue::parse(raw)?)
    }

    pub fn from_value(field: &str, value: &GenericValue) -> Result<Self> {
        require_field(field, "date")?;
        if value.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        let parse = |s: &str| parse_date(field, s);
        let clauses = value
            .into_iter()
            .map(|item| match item {
                ScalarOrRange::Scalar(s) => Ok(Bounded::Exact(parse(s)?)),
                ScalarOrRange::Range(r) => Ok(Bounded::Between {
                    lower: r.min().map(parse).transpose()?.map(|v| (r.lower_op(), v)),
                    upper: r.max().map(parse).transpose()?.map(|v| (r.upper_op(), v)),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            field: field.to_string(),
            clauses,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn to_query(&self) -> Value {
        any_of(&self.field, &self.clauses)
    }
}

fn parse_date(field: &str, s: &str) -> Result<Value> {
    normalize_date(s)
        .map(|dt| Value::String(dt.to_rfc3339()))
        .ok_or_else(|| SearchError::InvalidDate {
            field: field.to_string(),
            value: s.to_string(),
        })
}
