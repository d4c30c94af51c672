use super::*;
use std::convert::TryFrom;
use thiserror::Error;
use venuemap_entities as e;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid coordinate of circle {0}: {1}")]
    Coordinate(u32, e::geo::ParseError),
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

impl From<e::circle::CircleSnapshot> for Circle {
    fn from(from: e::circle::CircleSnapshot) -> Self {
        let e::circle::CircleSnapshot { id, center, radius } = from;
        Self {
            id,
            center: center.into(),
            radius: radius.to_meters(),
        }
    }
}

impl TryFrom<Circle> for e::circle::CircleSnapshot {
    type Error = ConversionError;
    fn try_from(from: Circle) -> Result<Self, Self::Error> {
        let Circle { id, center, radius } = from;
        let center = e::geo::MapPoint::try_from_lat_lng_deg(center.lat, center.lng)
            .map_err(|err| ConversionError::Coordinate(id, err))?;
        Ok(Self {
            id,
            center,
            radius: e::geo::Distance::from_meters(radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_invalid_coordinates() {
        let circle = Circle {
            id: 3,
            center: Coordinate {
                lat: 95.0,
                lng: 0.0,
            },
            radius: 1_000.0,
        };
        assert!(matches!(
            e::circle::CircleSnapshot::try_from(circle),
            Err(ConversionError::Coordinate(3, _))
        ));
    }

    #[test]
    fn keep_coordinates_and_radius() {
        let snapshot = e::circle::CircleSnapshot {
            id: 1,
            center: e::geo::MapPoint::from_lat_lng_deg(51.5, -0.1),
            radius: e::geo::Distance::from_meters(2_000.0),
        };
        let circle = Circle::from(snapshot);
        assert_eq!(51.5, circle.center.lat);
        assert_eq!(2_000.0, circle.radius);
        assert_eq!(snapshot, e::circle::CircleSnapshot::try_from(circle).unwrap());
    }
}
