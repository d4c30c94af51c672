use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

/// The current version of the circles export format.
pub const CIRCLES_EXPORT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Circle {
    pub id: u32,
    pub center: Coordinate,
    /// In meters
    pub radius: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct CirclesExport {
    pub version: u32,
    /// RFC 3339
    pub exported_at: String,
    pub circles: Vec<Circle>,
}

/// The accepted contents of a circles file.
#[derive(Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub enum CirclesFile {
    Export(CirclesExport),
    Circles(Vec<Circle>),
}

impl CirclesFile {
    pub fn into_circles(self) -> Vec<Circle> {
        match self {
            Self::Export(CirclesExport { circles, .. }) => circles,
            Self::Circles(circles) => circles,
        }
    }
}

/// A row of the venue spreadsheet.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct VenueRecord {
    #[serde(rename = "Name", default)]
    pub name              : Option<String>,
    #[serde(rename = "Address1", default)]
    pub address1          : Option<String>,
    #[serde(rename = "Address2", default)]
    pub address2          : Option<String>,
    #[serde(rename = "Town", default)]
    pub town              : Option<String>,
    #[serde(rename = "PostCode", default)]
    pub post_code         : Option<String>,
    #[serde(rename = "Country", default)]
    pub country           : Option<String>,
    #[serde(rename = "Type", default)]
    pub venue_type        : Option<String>,
    #[serde(rename = "County", default)]
    pub county            : Option<String>,
    #[serde(rename = "Account Manager Name", default)]
    pub account_manager   : Option<String>,
    #[serde(rename = "Phone Number", default)]
    pub phone             : Option<String>,
    #[serde(rename = "Latitude", default, deserialize_with = "lenient_number")]
    pub latitude          : Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "lenient_number")]
    pub longitude         : Option<f64>,
}

// Empty cells and garbage are treated as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
