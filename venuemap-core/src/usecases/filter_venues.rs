use super::prelude::*;

fn contains_query(field: &str, query: &str) -> bool {
    field.to_lowercase().contains(query)
}

fn matches_query(venue: &Venue, query: &str) -> bool {
    contains_query(&venue.name, query)
        || contains_query(&venue.address, query)
        || contains_query(&venue.town, query)
        || contains_query(&venue.region, query)
        || venue
            .contact_name
            .as_deref()
            .map(|name| contains_query(name, query))
            .unwrap_or(false)
}

/// Select all venues that pass every active filter.
///
/// The source order is preserved.
pub fn filter_venues<'a>(venues: &'a [Venue], filter: &FilterState) -> Vec<&'a Venue> {
    let query = filter.query();
    venues
        .iter()
        .filter(|v| query.as_deref().map(|q| matches_query(v, q)).unwrap_or(true))
        .filter(|v| {
            filter
                .category
                .as_deref()
                .map(|c| v.category == c)
                .unwrap_or(true)
        })
        .filter(|v| {
            filter
                .region
                .as_deref()
                .map(|r| v.region == r)
                .unwrap_or(true)
        })
        .collect()
}

pub fn venue_count_label(filtered: usize, total: usize) -> String {
    if filtered == total {
        format!("{total} venues")
    } else {
        format!("{filtered} of {total} venues")
    }
}
