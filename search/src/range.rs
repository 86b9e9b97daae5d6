use crate::errors::{Result, SearchError};
use regex::Regex;
use std::sync::OnceLock;

const RANGE_PATTERN: &str = r"[\[(]([^\[\]()]*,[^\[\]()]+|[^\[\]()]+,[^\[\]()]*)[\])]";

static RANGE_REGEX: OnceLock<Regex> = OnceLock::new();
static RANGE_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches a bracketed range token anywhere in a string. At least one side
/// of the comma must be non-empty, and neither side may contain a bracket, so
/// an open bound never runs into the next range.
pub(crate) fn range_regex() -> &'static Regex {
    RANGE_REGEX.get_or_init(|| Regex::new(RANGE_PATTERN).unwrap())
}

fn range_token_regex() -> &'static Regex {
    RANGE_TOKEN_REGEX.get_or_init(|| Regex::new(&format!("^{RANGE_PATTERN}$")).unwrap())
}

/// An interval with optional bounds, e.g. `[1,5)` or `(,10]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    min: Option<String>,
    inclusive_min: bool,
    max: Option<String>,
    inclusive_max: bool,
}

impl Range {
    /// Parses a single range token. `[`/`]` are inclusive, `(`/`)` exclusive.
    pub fn parse(token: &str) -> Result<Self> {
        if !range_token_regex().is_match(token) {
            return Err(SearchError::InvalidRangeSyntax(token.to_string()));
        }

        // The regex guarantees single byte delimiters at both ends.
        let inner = &token[1..token.len() - 1];
        let mut bounds = inner.split(',');
        let (min, max) = match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(min), Some(max), None) => (min.trim(), max.trim()),
            _ => return Err(SearchError::InvalidRangeSyntax(token.to_string())),
        };

        if min.is_empty() && max.is_empty() {
            return Err(SearchError::InvalidRangeSyntax(token.to_string()));
        }

        Ok(Self {
            min: non_empty(min),
            inclusive_min: token.starts_with('['),
            max: non_empty(max),
            inclusive_max: token.ends_with(']'),
        })
    }

    pub fn min(&self) -> Option<&str> {
        self.min.as_deref()
    }

    pub fn max(&self) -> Option<&str> {
        self.max.as_deref()
    }

    pub fn inclusive_min(&self) -> bool {
        self.inclusive_min
    }

    pub fn inclusive_max(&self) -> bool {
        self.inclusive_max
    }

    /// Operator for the lower bound: `gte` when inclusive, `gt` otherwise
    pub fn lower_op(&self) -> &'static str {
        if self.inclusive_min {
            "gte"
        } else {
            "gt"
        }
    }

    /// Operator for the upper bound: `lte` when inclusive, `lt` otherwise
    pub fn upper_op(&self) -> &'static str {
        if self.inclusive_max {
            "lte"
        } else {
            "lt"
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
