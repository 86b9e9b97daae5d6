//! Parameter value grammar and query compilation for document search.
//!
//! A raw parameter such as `1,(2,5],7` is parsed into a [`GenericValue`]
//! and compiled by one of the [`Term`] kinds into a JSON query fragment.
//! Terms are composed with [`Bool`] into a single query.

mod boolean;
pub mod errors;
mod range;
pub mod terms;
mod value;

pub use boolean::Bool;
pub use errors::{Result, SearchError};
pub use range::Range;
pub use terms::{
    normalize_date, Date, Keyword, MultiMatch, Number, Operator, Prefix, Term, Text, TIMEZONE,
};
pub use value::{GenericValue, ScalarOrRange};
