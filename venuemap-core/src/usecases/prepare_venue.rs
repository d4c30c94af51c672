use super::prelude::*;
use crate::util::validate::{is_within_area, normalize_phone};

pub const DEFAULT_VENUE_NAME: &str = "Unknown Venue";
pub const DEFAULT_COUNTRY: &str = "UK";
pub const DEFAULT_CATEGORY: &str = "Unknown";

/// A raw record from the venue source.
#[rustfmt::skip]
#[derive(Default, Debug, Clone)]
pub struct NewVenue {
    pub name         : Option<String>,
    pub address1     : Option<String>,
    pub address2     : Option<String>,
    pub town         : Option<String>,
    pub post_code    : Option<String>,
    pub country      : Option<String>,
    pub category     : Option<String>,
    pub region       : Option<String>,
    pub contact_name : Option<String>,
    pub phone        : Option<String>,
    pub lat          : Option<f64>,
    pub lng          : Option<f64>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn address_parts(new_venue: NewVenue) -> AddressParts {
    let NewVenue {
        address1,
        address2,
        town,
        post_code,
        country,
        ..
    } = new_venue;
    let (address1, address2, town, post_code) = (
        non_blank(address1),
        non_blank(address2),
        non_blank(town),
        non_blank(post_code),
    );
    let has_address =
        address1.is_some() || address2.is_some() || town.is_some() || post_code.is_some();
    let country = has_address
        .then(|| non_blank(country).unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()));
    AddressParts {
        address1,
        address2,
        town,
        post_code,
        country,
    }
}

/// Turn a raw record into a venue.
///
/// Missing fields get their defaults, phone numbers are normalized and
/// coordinates outside of the service area are dropped.
pub fn prepare_venue(id: VenueId, new_venue: NewVenue, service_area: &MapBbox) -> Venue {
    let NewVenue {
        name,
        category,
        region,
        contact_name,
        phone,
        lat,
        lng,
        ..
    } = new_venue.clone();
    let parts = address_parts(new_venue);
    let pos = match (lat, lng) {
        (Some(lat), Some(lng)) => match MapPoint::try_from_lat_lng_deg(lat, lng) {
            Ok(pos) if is_within_area(pos, service_area) => Some(pos),
            Ok(pos) => {
                log::debug!("Dropping position {pos} of venue {id} outside of the service area");
                None
            }
            Err(err) => {
                log::debug!("Dropping position of venue {id}: {err}");
                None
            }
        },
        _ => None,
    };
    Venue {
        id,
        name: non_blank(name).unwrap_or_else(|| DEFAULT_VENUE_NAME.to_owned()),
        address: parts.full_address(),
        town: parts.town.unwrap_or_default(),
        category: non_blank(category).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        region: non_blank(region).unwrap_or_default(),
        contact_name: non_blank(contact_name),
        phone: phone.as_deref().and_then(normalize_phone),
        pos,
    }
}
