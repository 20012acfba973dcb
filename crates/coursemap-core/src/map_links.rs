//! External map-application deep links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::course::MapLinks;

/// Query-component encoding: unreserved characters and `/` pass through,
/// everything else (spaces, commas, `#`, `&`, non-ASCII) is escaped.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Returns the search query for a course: its street address when present,
/// otherwise `"{name}, {city}, {state}"`.
#[must_use]
pub fn map_query(address: &str, name: &str, city: &str, state: &str) -> String {
    let address = address.trim();
    if address.is_empty() {
        format!("{name}, {city}, {state}")
    } else {
        address.to_string()
    }
}

/// Builds Apple Maps and Google Maps search links for `query`.
#[must_use]
pub fn build_map_links(query: &str) -> MapLinks {
    let encoded = utf8_percent_encode(query, QUERY).to_string();
    MapLinks {
        apple: format!("https://maps.apple.com/?q={encoded}"),
        google: format!("https://www.google.com/maps/search/?api=1&query={encoded}"),
    }
}
