use super::require_field;
use crate::errors::{Result, SearchError};
use crate::value::GenericValue;
use serde_json::{json, Value};

/// Full text match. All values form a single query string, so `a,b`
/// searches for "a b" instead of two alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    field: String,
    values: Vec<String>,
}

impl Text {
    pub fn new(field: &str, raw: &str) -> Result<Self> {
        require_field(field, "text")?;
        Self::from_value(field, &GenericValue::parse(raw)?)
    }

    pub fn from_value(field: &str, value: &GenericValue) -> Result<Self> {
        require_field(field, "text")?;
        if value.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        let values = value
            .scalars()
            .ok_or_else(|| SearchError::UnsupportedRangeForKind {
                field: field.to_string(),
                kind: "text",
            })?;

        Ok(Self {
            field: field.to_string(),
            values: values.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn query_text(&self) -> String {
        self.values.join(" ")
    }

    pub fn to_query(&self) -> Value {
        json!({ "match": { &self.field: self.query_text() } })
    }
}
