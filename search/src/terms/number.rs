use super::{any_of, require_field, Bounded};
use crate::errors::{Result, SearchError};
use crate::value::{GenericValue, ScalarOrRange};
use serde_json::Value;

/// Exact or range match on a numeric field. All items are OR-ed.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    field: String,
    clauses: Vec<Bounded>,
}

impl Number {
    pub fn new(field: &str, raw: &str) -> Result<Self> {
        require_field(field, "number")?;
        Self::from_value(field, &GenericValue::parse(raw)?)
    }

    pub fn from_value(field: &str, value: &GenericValue) -> Result<Self> {
        require_field(field, "number")?;
        if value.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        let parse = |s: &str| parse_number(field, s);
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

/// Integral text stays an integer in the query; NaN and infinities are rejected
fn parse_number(field: &str, s: &str) -> Result<Value> {
    let invalid = || SearchError::InvalidNumber {
        field: field.to_string(),
        value: s.to_string(),
    };
    let s_trim = s.trim();
    if let Ok(i) = s_trim.parse::<i64>() {
        return Ok(Value::from(i));
    }
    let f = s_trim.parse::<f64>().map_err(|_| invalid())?;
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(invalid)
}
