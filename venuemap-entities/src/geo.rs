use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// A geographical location on a (flat) map in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid latitude degrees: {0}")]
    LatitudeRange(f64),
    #[error("Invalid longitude degrees: {0}")]
    LongitudeRange(f64),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error("Failed to parse '{0}'")]
    Format(String),
}

impl MapPoint {
    pub fn lat(self) -> f64 {
        self.lat
    }

    pub fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&self.lat)
            && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&self.lng)
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        let res = Self {
            lat: lat.into(),
            lng: lng.into(),
        };
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Result<Self, ParseError> {
        let (lat, lng) = (lat.into(), lng.into());
        // NaN fails both range checks
        if !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return Err(ParseError::LatitudeRange(lat));
        }
        if !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return Err(ParseError::LongitudeRange(lng));
        }
        Ok(Self { lat, lng })
    }

    fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, ParseError> {
        let lat = lat_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Number(lat_deg_str.to_owned()))?;
        let lng = lng_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Number(lng_deg_str.to_owned()))?;
        Self::try_from_lat_lng_deg(lat, lng)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for MapPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((lat_deg_str, lng_deg_str)) = s.split(',').collect_tuple() {
            MapPoint::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
        } else {
            Err(ParseError::Format(s.to_owned()))
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn to_kilometers(self) -> f64 {
        self.0 / 1_000.0
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_000.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using the haversine formula.
    /// Reference: https://en.wikipedia.org/wiki/Haversine_formula
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }

        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let dlat_sin = ((lat2_rad - lat1_rad) / 2.0).sin();
        let dlng_sin = ((lng2_rad - lng1_rad) / 2.0).sin();

        let a = dlat_sin * dlat_sin + lat1_rad.cos() * lat2_rad.cos() * dlng_sin * dlng_sin;
        // Rounding may push `a` slightly out of [0, 1]
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Some(Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * c))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat() <= self.ne.lat()
    }

    /// The smallest box that contains all points.
    pub fn enclosing(points: impl IntoIterator<Item = MapPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_lat, mut min_lng) = first.to_lat_lng_deg();
        let (mut max_lat, mut max_lng) = (min_lat, min_lng);
        for pt in points {
            min_lat = min_lat.min(pt.lat());
            max_lat = max_lat.max(pt.lat());
            min_lng = min_lng.min(pt.lng());
            max_lng = max_lng.max(pt.lng());
        }
        Some(Self::new(
            MapPoint::from_lat_lng_deg(min_lat, min_lng),
            MapPoint::from_lat_lng_deg(max_lat, max_lng),
        ))
    }

    /// Extend each dimension by `ratio` of its span on both sides,
    /// saturating at the coordinate limits.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_pad = (self.ne.lat() - self.sw.lat()) * ratio;
        let lng_pad = (self.ne.lng() - self.sw.lng()) * ratio;
        Self::new(
            MapPoint::from_lat_lng_deg(
                (self.sw.lat() - lat_pad).max(LAT_DEG_MIN),
                (self.sw.lng() - lng_pad).max(LNG_DEG_MIN),
            ),
            MapPoint::from_lat_lng_deg(
                (self.ne.lat() + lat_pad).min(LAT_DEG_MAX),
                (self.ne.lng() + lng_pad).min(LNG_DEG_MAX),
            ),
        )
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        if pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.sw.lng() <= self.ne.lng() {
            // regular (inclusive)
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        } else {
            // inverse (exclusive)
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        }
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

impl FromStr for MapBbox {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((sw_lat_deg_str, sw_lng_deg_str, ne_lat_deg_str, ne_lng_deg_str)) =
            s.split(',').collect_tuple()
        {
            let sw = MapPoint::parse_lat_lng_deg(sw_lat_deg_str, sw_lng_deg_str)?;
            let ne = MapPoint::parse_lat_lng_deg(ne_lat_deg_str, ne_lng_deg_str)?;
            Ok(MapBbox::new(sw, ne))
        } else {
            Err(ParseError::Format(s.to_owned()))
        }
    }
}
