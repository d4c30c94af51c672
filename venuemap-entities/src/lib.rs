#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # venuemap-entities
//!
//! Reusable, agnostic domain entities for the venue map.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod circle;
pub mod filter;
pub mod geo;
pub mod venue;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
