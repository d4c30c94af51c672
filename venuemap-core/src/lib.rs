//! # venuemap-core
//!
//! Use cases and gateway definitions of the venue map:
//! filtering, region aggregation, radius circles and reports.

pub mod gateways;
pub mod repositories;
pub mod state;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use venuemap_entities::{circle::*, filter::*, geo::*, venue::*};
}
