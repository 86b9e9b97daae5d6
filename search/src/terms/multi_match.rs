use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => write!(f, "and"),
            Operator::Or => write!(f, "or"),
        }
    }
}

/// Full text match of one query string across several weighted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiMatch {
    query: String,
    fields: Vec<(String, Option<u32>)>,
    operator: Operator,
}

impl MultiMatch {
    pub fn new(query: &str, operator: Operator) -> Self {
        Self {
            query: query.to_string(),
            fields: Vec::new(),
            operator,
        }
    }

    /// Adds a field, boosted by `weight` when given
    pub fn field(mut self, name: &str, weight: Option<u32>) -> Self {
        self.fields.push((name.to_string(), weight));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn to_query(&self) -> Value {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(name, weight)| match weight {
                Some(w) => format!("{}^{}", name, w),
                None => name.clone(),
            })
            .collect();

        json!({
            "multi_match": {
                "query": self.query,
                "fields": fields,
                "operator": self.operator.to_string(),
            }
        })
    }
}
