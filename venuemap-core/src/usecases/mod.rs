mod circles;
mod error;
mod filter_venues;
mod membership;
mod prepare_venue;
mod radius_slider;
mod regions;
mod report;
mod restore_circles;

#[cfg(test)]
pub mod tests;

pub use self::{
    circles::*, error::Error, filter_venues::*, membership::*, prepare_venue::*,
    radius_slider::*, regions::*, report::*, restore_circles::*,
};

pub type Result<T> = std::result::Result<T, Error>;

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::entities::*;
}
