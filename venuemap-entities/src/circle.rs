use crate::{
    geo::{Distance, MapPoint},
    venue::{Venue, VenueId},
};

pub type CircleId = u32;

/// A user-defined geofence that selects nearby venues.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: CircleId,
    pub center: MapPoint,
    pub radius: Distance,
    /// Whether the overlay can be dragged and resized on the map
    pub interactive: bool,
    /// Derived from the venues, ordered by distance
    pub members: Vec<Member>,
}

impl Circle {
    pub fn new(id: CircleId, center: MapPoint, radius: Distance) -> Self {
        Self {
            id,
            center,
            radius,
            interactive: true,
            members: vec![],
        }
    }

    /// The distance of `pos` from the center if it lies within the radius.
    pub fn covers(&self, pos: MapPoint) -> Option<Distance> {
        MapPoint::distance(self.center, pos).filter(|d| *d <= self.radius)
    }
}

/// The persistent part of a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSnapshot {
    pub id: CircleId,
    pub center: MapPoint,
    pub radius: Distance,
}

impl From<&Circle> for CircleSnapshot {
    fn from(from: &Circle) -> Self {
        let Circle {
            id, center, radius, ..
        } = *from;
        Self { id, center, radius }
    }
}

/// A venue that lies within a circle.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub venue_id     : VenueId,
    pub name         : String,
    pub address      : String,
    pub region       : String,
    pub contact_name : Option<String>,
    pub phone        : Option<String>,
    pub category     : String,
    pub pos          : MapPoint,
    /// Rounded to one decimal place
    pub distance_km  : f64,
}

impl Member {
    pub fn new(venue: &Venue, pos: MapPoint, distance: Distance) -> Self {
        Self {
            venue_id: venue.id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            region: venue.region.clone(),
            contact_name: venue.contact_name.clone(),
            phone: venue.phone.clone(),
            category: venue.category.clone(),
            pos,
            distance_km: (distance.to_kilometers() * 10.0).round() / 10.0,
        }
    }
}

/// The allowed range of circle radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusBounds {
    pub min: Distance,
    pub max: Distance,
}

impl RadiusBounds {
    pub const fn new(min: Distance, max: Distance) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.to_meters() > 0.0 && self.min <= self.max
    }

    pub fn clamp(&self, radius: Distance) -> Distance {
        debug_assert!(self.is_valid());
        if radius.to_meters().is_nan() {
            return self.min;
        }
        Distance::from_meters(
            radius
                .to_meters()
                .clamp(self.min.to_meters(), self.max.to_meters()),
        )
    }
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self::new(Distance::from_meters(100.0), Distance::from_meters(50_000.0))
    }
}
