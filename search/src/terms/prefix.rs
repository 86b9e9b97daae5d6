use crate::errors::{Result, SearchError};
use serde_json::{json, Value};

/// Prefix match, only built when a caller asks for it explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    field: String,
    value: String,
}

impl Prefix {
    pub fn new(field: &str, value: &str) -> Result<Self> {
        if field.is_empty() {
            return Err(SearchError::MissingField { kind: "prefix" });
        }
        if value.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        Ok(Self {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn to_query(&self) -> Value {
        json!({ "prefix": { &self.field: self.value } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_query() {
        let prefix = Prefix::new("title", "Drag").unwrap();
        assert_eq!(prefix.to_query(), json!({ "prefix": { "title": "Drag" } }));
    }

    #[test]
    fn test_prefix_requires_field_and_value() {
        assert_eq!(
            Prefix::new("", "Drag"),
            Err(SearchError::MissingField { kind: "prefix" })
        );
        assert_eq!(Prefix::new("title", ""), Err(SearchError::EmptyValue));
    }
}
