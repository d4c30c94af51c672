use reqwest::blocking::Client;
use serde::Deserialize;
use std::{thread, time::Duration};
use venuemap_core::gateways::geocode::{GeoCodingGateway, GeocodingError};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// The delay between two attempts never exceeds 2^6 s
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// Address lookup with an OpenStreetMap Nominatim server.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    base_url: String,
    country_codes: Option<String>,
    max_retries: u32,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Nominatim {
    /// Nominatim refuses requests without an identifying user agent.
    pub fn try_new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            country_codes: None,
            max_retries: 3,
        })
    }

    /// Restrict the results to a comma separated list of ISO 3166-1 codes.
    pub fn with_country_codes(mut self, country_codes: impl Into<String>) -> Self {
        self.country_codes = Some(country_codes.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn search(&self, query: &str) -> Result<Vec<Place>, reqwest::Error> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let mut params = vec![("format", "json"), ("limit", "1"), ("q", query)];
        if let Some(codes) = &self.country_codes {
            params.push(("countrycodes", codes.as_str()));
        }
        self.client
            .get(url)
            .query(&params)
            .send()?
            .error_for_status()?
            .json()
    }
}

/// Delay after the given failed attempt (1-based).
fn backoff(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
    Duration::from_secs(1 << exponent)
}

fn first_position(places: &[Place]) -> Option<(f64, f64)> {
    let place = places.first()?;
    let lat = place.lat.trim().parse().ok()?;
    let lng = place.lon.trim().parse().ok()?;
    Some((lat, lng))
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<(f64, f64)>, GeocodingError> {
        let query = addr.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let mut attempt = 0;
        loop {
            match self.search(query) {
                Ok(places) => {
                    let pos = first_position(&places);
                    if pos.is_none() {
                        log::debug!("No results for '{query}'");
                    }
                    return Ok(pos);
                }
                Err(err) => {
                    attempt += 1;
                    log::warn!("Failed to geocode '{query}' (attempt {attempt}): {err}");
                    if attempt >= self.max_retries {
                        return Err(GeocodingError::Unavailable(err.to_string()));
                    }
                    thread::sleep(backoff(attempt));
                }
            }
        }
    }
}
