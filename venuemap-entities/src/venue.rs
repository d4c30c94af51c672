use crate::geo::MapPoint;

pub type VenueId = u64;

/// A named, addressable location that can be shown on the map.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id           : VenueId,
    pub name         : String,
    /// Full free-text postal address
    pub address      : String,
    pub town         : String,
    /// The venue type, e.g. a brand or an outlet kind
    pub category     : String,
    /// Administrative area, e.g. the county
    pub region       : String,
    pub contact_name : Option<String>,
    pub phone        : Option<String>,
    /// `None` until the address has been resolved
    pub pos          : Option<MapPoint>,
}

impl Venue {
    pub fn is_resolved(&self) -> bool {
        self.pos.is_some()
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressParts {
    pub address1  : Option<String>,
    pub address2  : Option<String>,
    pub town      : Option<String>,
    pub post_code : Option<String>,
    pub country   : Option<String>,
}

impl AddressParts {
    fn parts(&self) -> impl Iterator<Item = &str> {
        [
            &self.address1,
            &self.address2,
            &self.town,
            &self.post_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
    }

    /// Join all non-blank parts into a single line.
    pub fn full_address(&self) -> String {
        self.parts().collect::<Vec<_>>().join(", ")
    }
}
