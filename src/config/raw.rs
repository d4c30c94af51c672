use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("venuemap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub venues: Option<Venues>,
    pub circles: Option<Circles>,
    pub map: Option<Map>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub store: Option<Store>,
    pub report: Option<Report>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Venues {
    pub data_file: PathBuf,
    pub service_area: Area,
}

impl Default for Venues {
    fn default() -> Self {
        Config::default().venues.expect("Venues configuration")
    }
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Area {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

#[derive(Clone, Copy, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Radii in meters
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Circles {
    pub min_radius: f64,
    pub max_radius: f64,
    pub default_radius: f64,
}

impl Default for Circles {
    fn default() -> Self {
        Config::default().circles.expect("Circles configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub region_max_zoom: u8,
    pub all_max_zoom: u8,
    pub venue_zoom: u8,
    pub legend_size: usize,
    pub view_center: Position,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub batch_size: usize,
    #[serde(deserialize_with = "deserialize_duration")]
    pub pacing: Duration,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Nominatim,
}

impl GeocodingGateway {
    /// The name of the gateway section
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub base_url: Option<String>,
    pub user_agent: String,
    pub country_codes: Option<String>,
    pub max_retries: Option<u32>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Store {
    pub dir: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Config::default().store.expect("Store configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub output_dir: PathBuf,
    pub address_width: usize,
    pub page_height: f64,
}

impl Default for Report {
    fn default() -> Self {
        Config::default().report.expect("Report configuration")
    }
}
