//! List-query parameters and their wire encoding.
//!
//! The record API drives sorting and filtering entirely through the query
//! string: `sort[0][field]` and `sort[0][direction]` select the order, and an
//! optional `filterByFormula` whose decoded value reads
//! `SEARCH("term", title)` restricts results to titles containing the term.
//! The bracketed parameter names go out literally. The formula's quote
//! delimiters are sent as `%22` (a raw `"` is not a legal query character)
//! and the term itself is percent-encoded, so terms with spaces or quotes
//! cannot break the formula.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Escaping for the search term inside the query string. RFC 3986 unreserved
/// characters pass through; everything else, spaces and quotes included,
/// becomes a percent escape.
const TERM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Field the server sorts the returned records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedTime,
    Title,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::CreatedTime => write!(f, "createdTime"),
            SortField::Title => write!(f, "title"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Parameters for one todo list request.
///
/// `search` is a plain substring to match against titles; an empty string
/// means no filter. The default is the newest-first unfiltered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search: String,
}

impl Default for TodoQuery {
    fn default() -> Self {
        TodoQuery {
            sort_field: SortField::CreatedTime,
            sort_direction: SortDirection::Desc,
            search: String::new(),
        }
    }
}

impl TodoQuery {
    /// Renders the query string exactly as the record API expects it, without
    /// the leading `?`.
    pub fn encode(&self) -> String {
        let mut query = format!(
            "sort[0][field]={}&sort[0][direction]={}",
            self.sort_field, self.sort_direction
        );
        if !self.search.is_empty() {
            query.push_str("&filterByFormula=SEARCH(%22");
            query.push_str(&utf8_percent_encode(&self.search, TERM_ENCODE_SET).to_string());
            query.push_str("%22,+title)");
        }
        query
    }
}
