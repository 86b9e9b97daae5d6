use crate::errors::{Result, SearchError};
use crate::range::{range_regex, Range};

/// One item of a parsed parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarOrRange {
    Scalar(String),
    Range(Range),
}

/// A parameter value split into its scalar and range parts, in input order.
///
/// The grammar is a comma separated list where every item is either a plain
/// scalar or a bracketed range: `1,(2,3),4` parses to
/// `[Scalar(1), Range(2,3), Scalar(4)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericValue(Vec<ScalarOrRange>);

impl GenericValue {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(SearchError::EmptyValue);
        }

        if !range_regex().is_match(raw) {
            let items = raw
                .split(',')
                .map(|s| ScalarOrRange::Scalar(s.to_string()))
                .collect();
            return Ok(Self(items));
        }

        // Range tokens always contain a comma, so this only fires if the range
        // grammar is ever loosened.
        if !raw.contains(',') {
            return Err(SearchError::AmbiguousValue(raw.to_string()));
        }

        let mut items = Vec::new();
        let mut rest = raw;
        while !rest.is_empty() {
            match range_regex().find(rest).filter(|m| m.start() == 0) {
                Some(m) => {
                    items.push(ScalarOrRange::Range(Range::parse(m.as_str())?));
                    // skip the separator following the range, if any
                    rest = rest[m.end()..]
                        .strip_prefix(',')
                        .unwrap_or(&rest[m.end()..]);
                }
                None => match rest.split_once(',') {
                    Some((scalar, tail)) => {
                        items.push(ScalarOrRange::Scalar(scalar.to_string()));
                        rest = tail;
                    }
                    None => {
                        items.push(ScalarOrRange::Scalar(rest.to_string()));
                        rest = "";
                    }
                },
            }
        }

        Ok(Self(items))
    }

    pub fn items(&self) -> &[ScalarOrRange] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_range(&self) -> bool {
        self.0
            .iter()
            .any(|item| matches!(item, ScalarOrRange::Range(_)))
    }

    /// Returns the scalar values, or `None` if any item is a range
    pub fn scalars(&self) -> Option<Vec<&str>> {
        self.0
            .iter()
            .map(|item| match item {
                ScalarOrRange::Scalar(s) => Some(s.as_str()),
                ScalarOrRange::Range(_) => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a GenericValue {
    type Item = &'a ScalarOrRange;
    type IntoIter = std::slice::Iter<'a, ScalarOrRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
