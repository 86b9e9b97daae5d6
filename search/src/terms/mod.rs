//! Compiled, field scoped query fragments.
//!
//! Every term is validated when it is constructed, so rendering a leaf term
//! cannot fail. Only [`Bool`] rendering is fallible, because it carries the
//! errors of the terms nested in it.

mod date;
mod keyword;
mod multi_match;
mod number;
mod prefix;
mod text;

pub use date::{normalize_date, Date, TIMEZONE};
pub use keyword::Keyword;
pub use multi_match::{MultiMatch, Operator};
pub use number::Number;
pub use prefix::Prefix;
pub use text::Text;

use crate::boolean::Bool;
use crate::errors::{Result, SearchError};
use serde_json::{json, Map, Value};

/// Checked before the value is parsed, so an empty field wins over an empty
/// or malformed value.
pub(crate) fn require_field(field: &str, kind: &'static str) -> Result<()> {
    if field.is_empty() {
        return Err(SearchError::MissingField { kind });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Keyword(Keyword),
    Text(Text),
    Number(Number),
    Date(Date),
    Prefix(Prefix),
    MultiMatch(MultiMatch),
    Bool(Box<Bool>),
}

impl Term {
    pub fn to_query(&self) -> Result<Value> {
        match self {
            Term::Keyword(t) => Ok(t.to_query()),
            Term::Text(t) => Ok(t.to_query()),
            Term::Number(t) => Ok(t.to_query()),
            Term::Date(t) => Ok(t.to_query()),
            Term::Prefix(t) => Ok(t.to_query()),
            Term::MultiMatch(t) => Ok(t.to_query()),
            Term::Bool(b) => b.to_query(),
        }
    }

    /// The document field the term searches, `None` for multi field terms
    pub fn field(&self) -> Option<&str> {
        match self {
            Term::Keyword(t) => Some(t.field()),
            Term::Text(t) => Some(t.field()),
            Term::Number(t) => Some(t.field()),
            Term::Date(t) => Some(t.field()),
            Term::Prefix(t) => Some(t.field()),
            Term::MultiMatch(_) | Term::Bool(_) => None,
        }
    }
}

macro_rules! impl_from_term {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Term {
                fn from(t: $variant) -> Self {
                    Term::$variant(t)
                }
            }
        )*
    };
}

impl_from_term!(Keyword, Text, Number, Date, Prefix, MultiMatch);

impl From<Bool> for Term {
    fn from(b: Bool) -> Self {
        Term::Bool(Box::new(b))
    }
}

/// A single exact-or-range clause of a [`Number`] or [`Date`] term, with
/// values already converted to their query representation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bounded {
    Exact(Value),
    Between {
        lower: Option<(&'static str, Value)>,
        upper: Option<(&'static str, Value)>,
    },
}

impl Bounded {
    fn to_query(&self, field: &str) -> Value {
        match self {
            Bounded::Exact(v) => json!({ "term": { field: v } }),
            Bounded::Between { lower, upper } => {
                let mut bounds = Map::new();
                for (op, v) in lower.iter().chain(upper.iter()) {
                    bounds.insert(op.to_string(), v.clone());
                }
                json!({ "range": { field: bounds } })
            }
        }
    }
}

/// ORs the clauses together; a lone clause is emitted unwrapped
pub(crate) fn any_of(field: &str, clauses: &[Bounded]) -> Value {
    let mut queries: Vec<Value> = clauses.iter().map(|c| c.to_query(field)).collect();
    if queries.len() == 1 {
        return queries.remove(0);
    }
    json!({ "bool": { "should": queries } })
}
