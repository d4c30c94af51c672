pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::venue_builder::*;

pub mod venue_builder {

    use super::*;
    use crate::{geo::*, venue::*};

    #[derive(Debug)]
    pub struct VenueBuild {
        venue: Venue,
    }

    impl VenueBuild {
        pub fn id(mut self, id: VenueId) -> Self {
            self.venue.id = id;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.venue.name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.venue.address = address.into();
            self
        }
        pub fn town(mut self, town: &str) -> Self {
            self.venue.town = town.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.venue.category = category.into();
            self
        }
        pub fn region(mut self, region: &str) -> Self {
            self.venue.region = region.into();
            self
        }
        pub fn contact_name(mut self, name: Option<&str>) -> Self {
            self.venue.contact_name = name.map(Into::into);
            self
        }
        pub fn phone(mut self, phone: Option<&str>) -> Self {
            self.venue.phone = phone.map(Into::into);
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.venue.pos = Some(pos);
            self
        }
        pub fn unresolved(mut self) -> Self {
            self.venue.pos = None;
            self
        }
        pub fn finish(self) -> Venue {
            self.venue
        }
    }

    impl Builder for Venue {
        type Build = VenueBuild;
        fn build() -> VenueBuild {
            VenueBuild {
                venue: Venue {
                    id: 0,
                    name: "".into(),
                    address: "".into(),
                    town: "".into(),
                    category: "Unknown".into(),
                    region: "".into(),
                    contact_name: None,
                    phone: None,
                    pos: Some(MapPoint::from_lat_lng_deg(0.0, 0.0)),
                },
            }
        }
    }
}
