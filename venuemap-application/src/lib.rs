#[macro_use]
extern crate log;

mod circles_file;
mod export_report;
mod load_venues;
mod resolve_coordinates;

pub mod prelude {
    pub use super::{circles_file::*, export_report::*, load_venues::*, resolve_coordinates::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use venuemap_core::{entities::*, repositories::*, state::MapState, usecases};

#[cfg(test)]
pub(crate) mod tests;
