use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Geocoding service unavailable: {0}")]
    Unavailable(String),
}

pub trait GeoCodingGateway {
    /// Resolve a free-text address into `(lat, lng)` degrees.
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<(f64, f64)>, GeocodingError>;
}
