use crate::{entities::CircleId, repositories};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("Circle {0} is not interactive")]
    NotInteractive(CircleId),
    #[error("Invalid import data: {0}")]
    InvalidImportData(String),
    #[error("Geocoding unavailable: {0}")]
    GeocodingUnavailable(String),
    #[error("Export not possible: {0}")]
    ExportPrecondition(&'static str),
    #[error("Invalid radius bounds")]
    RadiusBounds,
    #[error(transparent)]
    Store(#[from] repositories::Error),
}

impl From<crate::gateways::geocode::GeocodingError> for Error {
    fn from(err: crate::gateways::geocode::GeocodingError) -> Self {
        Self::GeocodingUnavailable(err.to_string())
    }
}

impl Error {
    /// Whether the error should be brought to the user's attention.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::InvalidImportData(_) | Self::ExportPrecondition(_) | Self::Store(_)
        )
    }
}
