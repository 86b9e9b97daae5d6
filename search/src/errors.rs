use thiserror::Error;

/// Errors raised while parsing parameter values and compiling them into queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("cannot have an empty value")]
    EmptyValue,

    #[error("cannot find a range value or a list value in '{0}'")]
    AmbiguousValue(String),

    #[error(
        "range value must have 1 or 2 comma separated values, bounded by inclusive [] or exclusive () brackets, but got '{0}'"
    )]
    InvalidRangeSyntax(String),

    #[error("cannot create a {kind} term without a field")]
    MissingField { kind: &'static str },

    #[error("{kind} field '{field}' does not support range values")]
    UnsupportedRangeForKind { field: String, kind: &'static str },

    #[error("field '{field}' cannot be searched with the non-number value '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error(
        "field '{field}' cannot be searched with the invalid date '{value}', expected RFC 3339"
    )]
    InvalidDate { field: String, value: String },

    #[error("cannot create a bool query without must, should, or must_not set")]
    EmptyBooleanExpression,
}

pub type Result<T> = std::result::Result<T, SearchError>;
