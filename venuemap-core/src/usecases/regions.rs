use super::prelude::*;
use std::collections::BTreeMap;

/// Display colors assigned to regions in alphabetical order.
pub const REGION_PALETTE: &[&str] = &[
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
    "#16a085", "#27ae60", "#2980b9", "#8e44ad", "#f1c40f", "#e74c3c", "#95a5a6", "#d35400",
    "#c0392b", "#7f8c8d", "#2c3e50", "#f39c12", "#e67e22", "#d35400", "#c0392b", "#8e44ad",
    "#9b59b6", "#3498db", "#2980b9", "#1abc9c", "#16a085", "#27ae60", "#2ecc71", "#f1c40f",
    "#e74c3c", "#e67e22", "#d35400", "#c0392b", "#8e44ad", "#9b59b6", "#3498db", "#2980b9",
    "#1abc9c", "#16a085", "#27ae60", "#2ecc71", "#f1c40f", "#e74c3c", "#e67e22", "#d35400",
    "#c0392b", "#8e44ad", "#9b59b6", "#3498db", "#2980b9", "#1abc9c", "#16a085", "#27ae60",
    "#2ecc71", "#f1c40f", "#e74c3c", "#e67e22",
];

pub const FALLBACK_REGION_COLOR: &str = "#666666";

const REGION_BBOX_PADDING: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub region: String,
    pub count: usize,
    pub color: &'static str,
}

/// Count the venues of every distinct region.
///
/// The result is sorted alphabetically by region and the
/// colors are stable as long as the set of regions does not change.
pub fn aggregate_regions(venues: &[Venue]) -> Vec<RegionSummary> {
    let counts = venues.iter().fold(BTreeMap::new(), |mut counts, v| {
        *counts.entry(v.region.as_str()).or_insert(0) += 1;
        counts
    });
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, (region, count))| RegionSummary {
            region: region.to_owned(),
            count,
            color: REGION_PALETTE[idx % REGION_PALETTE.len()],
        })
        .collect()
}

pub fn region_color(regions: &[RegionSummary], region: &str) -> &'static str {
    regions
        .binary_search_by(|r| r.region.as_str().cmp(region))
        .map(|idx| regions[idx].color)
        .unwrap_or(FALLBACK_REGION_COLOR)
}

/// The regions with the most venues first.
pub fn region_legend(venues: &[Venue], limit: usize) -> Vec<RegionSummary> {
    let mut regions = aggregate_regions(venues);
    // stable: ties stay in alphabetical order
    regions.sort_by(|a, b| b.count.cmp(&a.count));
    regions.truncate(limit);
    regions
}

/// Alphabetically sorted `(value, label)` pairs for a region picker.
pub fn region_options(venues: &[Venue]) -> Vec<(String, String)> {
    aggregate_regions(venues)
        .into_iter()
        .map(|RegionSummary { region, count, .. }| {
            let plural = if count == 1 { "" } else { "s" };
            let label = format!("{region} - {count} venue{plural}");
            (region, label)
        })
        .collect()
}

/// The padded bounding box of all resolved venues in a region.
pub fn region_bbox(venues: &[Venue], region: &str) -> Option<MapBbox> {
    MapBbox::enclosing(
        venues
            .iter()
            .filter(|v| v.region == region)
            .filter_map(|v| v.pos),
    )
    .map(|bbox| bbox.pad(REGION_BBOX_PADDING))
}

pub fn all_venues_bbox(venues: &[Venue]) -> Option<MapBbox> {
    MapBbox::enclosing(venues.iter().filter_map(|v| v.pos))
}
