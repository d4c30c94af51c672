use anyhow::{anyhow, bail, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use venuemap_core::{state::MapConfig, usecases::ReportLayout};
use venuemap_entities::{circle::RadiusBounds, geo::*};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "venuemap.toml";

const ENV_NAME_DATA_FILE: &str = "VENUEMAP_DATA_FILE";
const ENV_NAME_STORE_DIR: &str = "VENUEMAP_STORE_DIR";

pub struct Config {
    pub venues: Venues,
    pub map: Map,
    pub geocoding: Geocoding,
    pub store: Store,
    pub report: Report,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(data_file) = env::var(ENV_NAME_DATA_FILE) {
            cfg.venues.data_file = data_file.into();
        }
        if let Ok(store_dir) = env::var(ENV_NAME_STORE_DIR) {
            cfg.store.dir = store_dir.into();
        }
        Ok(cfg)
    }
}

pub struct Venues {
    /// CSV file with one venue per row
    pub data_file: PathBuf,
    pub service_area: MapBbox,
}

pub struct Map {
    pub config: MapConfig,
    pub view_center: MapPoint,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub batch_size: usize,
    pub pacing: Duration,
}

pub enum GeocodingGateway {
    Nominatim {
        base_url: Option<String>,
        user_agent: String,
        country_codes: Option<String>,
        max_retries: Option<u32>,
        timeout: Duration,
    },
}

pub struct Store {
    /// File system directory of the circle store.
    pub dir: PathBuf,
}

pub struct Report {
    pub output_dir: PathBuf,
    pub layout: ReportLayout,
}

fn try_map_point(pos: raw::Position) -> Result<MapPoint> {
    let raw::Position { lat, lng } = pos;
    MapPoint::try_from_lat_lng_deg(lat, lng).map_err(|err| anyhow!("Invalid position: {err}"))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            venues,
            circles,
            map,
            geocoding,
            gateway,
            store,
            report,
        } = from;

        let raw::Venues {
            data_file,
            service_area,
        } = venues.unwrap_or_default();
        let raw::Area {
            south,
            west,
            north,
            east,
        } = service_area;
        let service_area = MapBbox::new(
            try_map_point(raw::Position {
                lat: south,
                lng: west,
            })?,
            try_map_point(raw::Position {
                lat: north,
                lng: east,
            })?,
        );
        if !service_area.is_valid() {
            bail!("Invalid service area");
        }
        let venues = Venues {
            data_file,
            service_area,
        };

        let raw::Circles {
            min_radius,
            max_radius,
            default_radius,
        } = circles.unwrap_or_default();
        let radius_bounds = RadiusBounds::new(
            Distance::from_meters(min_radius),
            Distance::from_meters(max_radius),
        );
        if !radius_bounds.is_valid() {
            bail!("Invalid radius bounds: {min_radius}..={max_radius}");
        }
        let default_radius = Distance::from_meters(default_radius);
        if radius_bounds.clamp(default_radius) != default_radius {
            bail!(
                "The default radius {} is out of bounds",
                default_radius.to_meters()
            );
        }

        let raw::Map {
            region_max_zoom,
            all_max_zoom,
            venue_zoom,
            legend_size,
            view_center,
        } = map.unwrap_or_default();
        let map = Map {
            config: MapConfig {
                radius_bounds,
                default_radius,
                region_max_zoom,
                all_max_zoom,
                venue_zoom,
                legend_size,
            },
            view_center: try_map_point(view_center)?,
        };

        let raw::Geocoding {
            gateway: gw_name,
            batch_size,
            pacing,
        } = geocoding.unwrap_or_default();
        if batch_size == 0 {
            bail!("The geocoding batch size must not be 0");
        }
        let geo_gateway = match gw_name {
            Some(gw_name) => {
                let toml_name = gw_name.name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::Nominatim => {
                        let raw::Nominatim {
                            base_url,
                            user_agent,
                            country_codes,
                            max_retries,
                            timeout,
                        } = gateway.nominatim.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        if user_agent.trim().is_empty() {
                            bail!("The '{toml_name}' gateway requires a user agent");
                        }
                        GeocodingGateway::Nominatim {
                            base_url,
                            user_agent,
                            country_codes,
                            max_retries,
                            timeout,
                        }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
            batch_size,
            pacing,
        };

        let raw::Store { dir } = store.unwrap_or_default();
        let store = Store { dir };

        let raw::Report {
            output_dir,
            address_width,
            page_height,
        } = report.unwrap_or_default();
        if address_width == 0 {
            bail!("The report address width must not be 0");
        }
        let layout = ReportLayout {
            address_width,
            page_height,
            ..Default::default()
        };
        if layout.page_height <= 2.0 * layout.margin + layout.title_size {
            bail!("The report page height {page_height} is too small");
        }
        let report = Report { output_dir, layout };

        Ok(Self {
            venues,
            map,
            geocoding,
            store,
            report,
        })
    }
}
