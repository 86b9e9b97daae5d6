use crate::errors::{Result, SearchError};
use crate::terms::Term;
use serde_json::{Map, Value};

/// Boolean composition of terms. At least one clause list is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Bool {
    must: Vec<Term>,
    should: Vec<Term>,
    must_not: Vec<Term>,
}

impl Bool {
    pub fn new(must: Vec<Term>, should: Vec<Term>, must_not: Vec<Term>) -> Result<Self> {
        if must.is_empty() && should.is_empty() && must_not.is_empty() {
            return Err(SearchError::EmptyBooleanExpression);
        }
        Ok(Self {
            must,
            should,
            must_not,
        })
    }

    /// All terms must match
    pub fn all(must: Vec<Term>) -> Result<Self> {
        Self::new(must, Vec::new(), Vec::new())
    }

    /// Any of the terms may match
    pub fn any(should: Vec<Term>) -> Result<Self> {
        Self::new(Vec::new(), should, Vec::new())
    }

    pub fn must(&self) -> &[Term] {
        &self.must
    }

    pub fn should(&self) -> &[Term] {
        &self.should
    }

    pub fn must_not(&self) -> &[Term] {
        &self.must_not
    }

    pub fn to_query(&self) -> Result<Value> {
        let mut clauses = Map::new();
        for (name, terms) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if terms.is_empty() {
                continue;
            }
            let queries = terms
                .iter()
                .map(Term::to_query)
                .collect::<Result<Vec<_>>>()?;
            clauses.insert(name.to_string(), Value::Array(queries));
        }

        let mut query = Map::new();
        query.insert("bool".to_string(), Value::Object(clauses));
        Ok(Value::Object(query))
    }
}
