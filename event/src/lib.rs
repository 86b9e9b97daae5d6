//! Gen Con event records: the field registry, spreadsheet ingestion and the
//! translation of search query parameters into store queries.

pub mod enums;
pub mod errors;
mod event;
pub mod fields;
mod reader;
mod search;

pub use enums::{AgeGroup, Category, EventType, Experience, Registration};
pub use errors::{EventError, ParameterError, ParameterErrors, Result};
pub use event::{parse_timestamp, Coercion, Event, Slot};
pub use fields::{index_mappings, Field, FieldKind, FieldSpec, Rule, TimestampFormat, FILTER_PARAM};
pub use reader::{load_events, load_events_file, load_events_from_str, LoadedEvents};
pub use search::{
    compile_term, filter_term, SearchRequest, SearchResults, Sort, SortDirection, DEFAULT_LIMIT,
    MAX_LIMIT,
};
