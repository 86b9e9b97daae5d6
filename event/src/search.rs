use crate::errors::{EventError, ParameterErrors, Result};
use crate::event::Event;
use crate::fields::{Field, FieldKind, FILTER_PARAM};
use gcb_search::{
    Bool, Date, Keyword, MultiMatch, Number, Operator, Prefix, SearchError, Term, Text,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 5000;

const PAGE_PARAM: &str = "page";
const LIMIT_PARAM: &str = "limit";
const SORT_PARAM: &str = "sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Result ordering, written as `<param>` or `<param>.asc|desc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: Field,
    pub direction: SortDirection,
}

impl FromStr for Sort {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| EventError::InvalidSort {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, direction) = match s.split_once('.') {
            Some((name, dir)) => (
                name,
                dir.parse::<SortDirection>()
                    .map_err(|_| invalid("direction must be asc or desc"))?,
            ),
            None => (s, SortDirection::Asc),
        };

        let field = Field::from_param(name)?;
        if field.kind() == FieldKind::Text {
            return Err(invalid("text fields cannot be sorted"));
        }
        Ok(Self { field, direction })
    }
}

impl Sort {
    fn to_query(self) -> Value {
        json!({ self.field.document(): { "order": self.direction.to_string() } })
    }
}

/// A validated event search: the terms that must all match plus paging
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    terms: Vec<Term>,
    page: u32,
    limit: u32,
    sort: Option<Sort>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            page: 0,
            limit: DEFAULT_LIMIT,
            sort: None,
        }
    }
}

impl SearchRequest {
    /// Builds a request from query parameters grouped by name in the order
    /// they were first seen. Every invalid parameter is reported, not just the
    /// first.
    pub fn build(
        params: &IndexMap<String, Vec<String>>,
    ) -> std::result::Result<Self, ParameterErrors> {
        let mut request = SearchRequest::default();
        let mut errors = ParameterErrors::default();

        for (param, values) in params {
            let outcome = match param.as_str() {
                PAGE_PARAM => parse_page(values).map(|page| request.page = page),
                LIMIT_PARAM => parse_limit(values).map(|limit| request.limit = limit),
                SORT_PARAM => single(SORT_PARAM, values)
                    .and_then(str::parse::<Sort>)
                    .map(|sort| request.sort = Some(sort)),
                _ => compile_term(param, values).map(|term| {
                    if let Some(term) = term {
                        request.terms.push(term);
                    }
                }),
            };
            if let Err(e) = outcome {
                errors.push(param, e);
            }
        }

        if errors.is_empty() {
            debug!(
                terms = request.terms.len(),
                page = request.page,
                limit = request.limit,
                "Built search request"
            );
            Ok(request)
        } else {
            Err(errors)
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// The `bool.must` query of all terms, or `None` to match everything
    pub fn query(&self) -> std::result::Result<Option<Value>, SearchError> {
        if self.terms.is_empty() {
            return Ok(None);
        }
        Bool::all(self.terms.clone())?.to_query().map(Some)
    }

    /// Full search request body
    pub fn to_body(&self) -> std::result::Result<Value, SearchError> {
        let mut body = json!({
            "track_total_hits": true,
            "size": self.limit,
            "from": u64::from(self.limit) * u64::from(self.page),
        });
        if let Some(query) = self.query()? {
            body["query"] = query;
        }
        if let Some(sort) = self.sort {
            body["sort"] = json!([sort.to_query()]);
        }
        debug!(body = %body, "Compiled search body");
        Ok(body)
    }
}

/// Compiles one query parameter into a term. `None` means the parameter
/// places no constraint (an empty `filter`).
pub fn compile_term(param: &str, values: &[String]) -> Result<Option<Term>> {
    let raw = values.join(",");
    if param == FILTER_PARAM {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        return Ok(Some(filter_term(&raw).into()));
    }

    let field = Field::from_param(param)?;
    let name = field.document();
    let term: Term = match field.kind() {
        FieldKind::Keyword => keyword_term(field, values, &raw)?.into(),
        FieldKind::Text => match raw.strip_suffix('*') {
            Some(prefix) if !raw.contains(',') => Prefix::new(name, prefix)?.into(),
            _ => Text::new(name, &raw)?.into(),
        },
        FieldKind::Number => Number::new(name, &raw)?.into(),
        FieldKind::Date => Date::new(name, &raw)?.into(),
    };
    debug!(param, ?term, "Compiled search term");
    Ok(Some(term))
}

/// Enum literals may contain commas, so values that name a literal as a
/// whole are kept intact. Anything else is split like any keyword list.
fn keyword_term(field: Field, values: &[String], raw: &str) -> Result<Keyword> {
    let name = field.document();
    let literals: Option<Vec<String>> = values
        .iter()
        .map(|value| field.canonical_value(value))
        .collect();
    match literals {
        Some(literals) if !literals.is_empty() => Ok(Keyword::from_literals(name, literals)?),
        _ => Ok(Keyword::new(name, raw)?
            .map_values(|v| field.canonical_value(v).unwrap_or_else(|| v.to_string()))),
    }
}

/// Matches all words across the title and both descriptions, preferring titles
pub fn filter_term(query: &str) -> MultiMatch {
    MultiMatch::new(query, Operator::And)
        .field(Field::Title.document(), Some(6))
        .field(Field::ShortDescription.document(), Some(2))
        .field(Field::LongDescription.document(), None)
}

fn single<'a>(key: &str, values: &'a [String]) -> Result<&'a str> {
    match values {
        [value] => Ok(value.as_str()),
        [] => Err(EventError::InvalidPagination {
            key: key.to_string(),
            value: String::new(),
            reason: "a value is required".to_string(),
        }),
        _ => Err(EventError::DuplicateParameter(key.to_string())),
    }
}

fn parse_page(values: &[String]) -> Result<u32> {
    let value = single(PAGE_PARAM, values)?;
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| EventError::InvalidPagination {
            key: PAGE_PARAM.to_string(),
            value: value.to_string(),
            reason: "must be a non-negative integer".to_string(),
        })
}

fn parse_limit(values: &[String]) -> Result<u32> {
    let value = single(LIMIT_PARAM, values)?;
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|limit| (1..=MAX_LIMIT).contains(limit))
        .ok_or_else(|| EventError::InvalidPagination {
            key: LIMIT_PARAM.to_string(),
            value: value.to_string(),
            reason: format!("must be an integer between 1 and {}", MAX_LIMIT),
        })
}

/// Events of one result page and the number of matches overall
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub total: u64,
    pub events: Vec<Event>,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    total: Total,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Total {
    value: u64,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Event,
}

impl SearchResults {
    /// Maps a store search response back into typed events
    pub fn from_response(response: Value) -> Result<Self> {
        let response: SearchResponse = serde_json::from_value(response)?;
        Ok(Self {
            total: response.hits.total.value,
            events: response.hits.hits.into_iter().map(|h| h.source).collect(),
        })
    }
}
