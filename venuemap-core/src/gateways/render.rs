use crate::entities::*;

/// Instructions for the map surface and the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    ClearMarkers,
    AddMarker {
        venue_id: VenueId,
        pos: MapPoint,
        color: &'static str,
    },
    UpdateVenueList {
        venue_ids: Vec<VenueId>,
        selected: Option<VenueId>,
        label: String,
    },
    HighlightVenue {
        venue_id: VenueId,
        center_on: Option<MapPoint>,
        zoom: u8,
    },
    /// Add a circle overlay or replace an existing one with the same id
    DrawCircle {
        id: CircleId,
        center: MapPoint,
        radius: Distance,
        selected: bool,
        interactive: bool,
    },
    RemoveCircle(CircleId),
    ShowCircleMembers {
        circle_id: CircleId,
        venue_ids: Vec<VenueId>,
    },
    HideCircleMembers,
    FitBounds {
        bbox: MapBbox,
        max_zoom: Option<u8>,
    },
}

pub trait RenderingSurface {
    fn render(&self, instruction: RenderInstruction);

    /// The center of the current viewport.
    fn view_center(&self) -> MapPoint;
}
