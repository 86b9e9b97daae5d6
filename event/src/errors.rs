use gcb_search::SearchError;
use std::fmt;
use thiserror::Error;

/// Errors raised while coercing source rows and building search requests
#[derive(Debug, Error)]
pub enum EventError {
    #[error("field '{0}' is not supported")]
    UnknownField(String),

    #[error("field '{field}' has an invalid number '{value}'")]
    InvalidNumericField { field: &'static str, value: String },

    #[error("field '{field}' does not allow the value '{value}'")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("field '{field}' has an invalid timestamp '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("only 1 {0} query parameter is allowed")]
    DuplicateParameter(String),

    #[error("invalid {key} '{value}': {reason}")]
    InvalidPagination {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid sort '{value}': {reason}")]
    InvalidSort { value: String, reason: String },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event CSV file is empty")]
    EmptyFile,
}

pub type Result<T> = std::result::Result<T, EventError>;

/// A rejected search query parameter
#[derive(Debug, Error)]
#[error("invalid search query param {param}: {source}")]
pub struct ParameterError {
    pub param: String,
    pub source: EventError,
}

/// Every rejected parameter of a search request, in query order
#[derive(Debug, Default)]
pub struct ParameterErrors(Vec<ParameterError>);

impl ParameterErrors {
    pub fn push(&mut self, param: &str, source: impl Into<EventError>) {
        self.0.push(ParameterError {
            param: param.to_string(),
            source: source.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterError> {
        self.0.iter()
    }
}

impl fmt::Display for ParameterErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParameterErrors {}
