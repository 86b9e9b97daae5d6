use super::require_field;
use crate::errors::{Result, SearchError};
use crate::value::GenericValue;
use serde_json::{json, Value};

/// Exact match on a keyword field. Multiple values are OR-ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    field: String,
    values: Vec<String>,
}

impl Keyword {
    pub fn new(field: &str, raw: &str) -> Result<Self> {
        require_field(field, "keyword")?;
        Self::from_value(field, &GenericValue::parse(raw)?)
    }

    pub fn from_value(field: &str, value: &GenericValue) -> Result<Self> {
        require_field(field, "keyword")?;
        if value.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        let values = value
            .scalars()
            .ok_or_else(|| SearchError::UnsupportedRangeForKind {
                field: field.to_string(),
                kind: "keyword",
            })?;

        Ok(Self {
            field: field.to_string(),
            values: values.into_iter().map(str::to_string).collect(),
        })
    }

    /// Builds the term from values taken as is, without comma splitting
    pub fn from_literals(field: &str, values: Vec<String>) -> Result<Self> {
        require_field(field, "keyword")?;
        if values.is_empty() {
            return Err(SearchError::EmptyValue);
        }
        Ok(Self {
            field: field.to_string(),
            values,
        })
    }

    /// Rewrites every value, e.g. to expand a search alias into the stored literal
    pub fn map_values<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self {
            values: self.values.iter().map(|v| f(v)).collect(),
            field: self.field,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn to_query(&self) -> Value {
        if let [single] = self.values.as_slice() {
            json!({ "term": { &self.field: single } })
        } else {
            json!({ "terms": { &self.field: self.values } })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_is_exact_term() {
        let keyword = Keyword::new("game_id", "ABC123").unwrap();
        assert_eq!(
            keyword.to_query(),
            json!({ "term": { "game_id": "ABC123" } })
        );
    }

    #[test]
    fn test_multiple_values_are_terms() {
        let keyword =
            Keyword::new("event_type", "RPG - Role Playing Game,BGM - Board Game").unwrap();
        assert_eq!(
            keyword.to_query(),
            json!({ "terms": { "event_type": ["RPG - Role Playing Game", "BGM - Board Game"] } })
        );
    }

    #[test]
    fn test_literals_keep_their_commas() {
        let keyword =
            Keyword::from_literals("registration", vec!["Yes, anyone".to_string()]).unwrap();
        assert_eq!(
            keyword.to_query(),
            json!({ "term": { "registration": "Yes, anyone" } })
        );
        assert_eq!(
            Keyword::from_literals("registration", vec![]),
            Err(SearchError::EmptyValue)
        );
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            Keyword::new("", "x"),
            Err(SearchError::MissingField { kind: "keyword" })
        );
        assert_eq!(
            Keyword::new("", ""),
            Err(SearchError::MissingField { kind: "keyword" })
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(Keyword::new("game_id", ""), Err(SearchError::EmptyValue));
    }

    #[test]
    fn test_range_is_rejected() {
        assert_eq!(
            Keyword::new("game_id", "a,(1,2)"),
            Err(SearchError::UnsupportedRangeForKind {
                field: "game_id".to_string(),
                kind: "keyword",
            })
        );
    }

    #[test]
    fn test_map_values() {
        let keyword = Keyword::new("age_required", "kids,21+")
            .unwrap()
            .map_values(|v| v.to_uppercase());
        assert_eq!(keyword.values(), &["KIDS".to_string(), "21+".to_string()]);
        assert_eq!(keyword.field(), "age_required");
    }
}
