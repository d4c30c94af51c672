//! The state of the map view.
//!
//! [`MapState`] owns the venues, the filter and the circles. User input
//! arrives as [`MapEvent`]s, the resulting changes are sent to the
//! [`RenderingSurface`] as [`RenderInstruction`]s and every change of the
//! circles is written through to the [`CircleRepo`].

use crate::{
    entities::*,
    gateways::render::{RenderInstruction, RenderingSurface},
    repositories::CircleRepo,
    usecases::{self, CircleSet, Document, Error, RegionSummary, ReportLayout, Result, Selection},
};
use std::collections::BTreeSet;
use strum::{Display, EnumDiscriminants};
use time::OffsetDateTime;

const FILTERED_BBOX_PADDING: f64 = 0.1;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub radius_bounds   : RadiusBounds,
    pub default_radius  : Distance,
    /// Maximum zoom when zooming to a region
    pub region_max_zoom : u8,
    /// Maximum zoom when zooming to all venues
    pub all_max_zoom    : u8,
    /// Zoom when a single venue is highlighted
    pub venue_zoom      : u8,
    pub legend_size     : usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius_bounds: RadiusBounds::default(),
            default_radius: usecases::DEFAULT_RADIUS,
            region_max_zoom: 12,
            all_max_zoom: 6,
            venue_zoom: 15,
            legend_size: 20,
        }
    }
}

/// User input from the map surface and the sidebar.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash, Display))]
pub enum MapEvent {
    SearchSubmitted(String),
    CategorySelected(Option<String>),
    RegionSelected(Option<String>),
    LegendRegionClicked(String),
    VenueClicked(VenueId),
    /// Create a circle at the center of the viewport
    CreateCircleClicked,
    CircleClicked(CircleId),
    MapBackgroundClicked,
    CircleDragged { id: CircleId, center: MapPoint },
    CircleDragEnded { id: CircleId, center: MapPoint },
    RadiusInput { id: CircleId, radius: Distance },
    RadiusSliderInput { id: CircleId, position: u16 },
    DeleteCircleClicked(CircleId),
    ClearCirclesClicked,
    InteractivityToggled { id: CircleId, interactive: bool },
}

#[derive(Debug)]
pub struct MapState<R, S> {
    config: MapConfig,
    venues: Vec<Venue>,
    regions: Vec<RegionSummary>,
    filter: FilterState,
    selected_venue: Option<VenueId>,
    circles: CircleSet,
    surface: R,
    store: S,
}

impl<R, S> MapState<R, S>
where
    R: RenderingSurface,
    S: CircleRepo,
{
    /// Set up the state and restore the stored circles.
    ///
    /// Unreadable or invalid stored circles are discarded.
    pub fn new(config: MapConfig, venues: Vec<Venue>, surface: R, store: S) -> Result<Self> {
        let circles = CircleSet::new(config.radius_bounds, config.default_radius)?;
        let regions = usecases::aggregate_regions(&venues);
        let mut state = Self {
            config,
            venues,
            regions,
            filter: FilterState::default(),
            selected_venue: None,
            circles,
            surface,
            store,
        };
        match state.store.load_circle_snapshot() {
            Ok(Some(snapshot)) => {
                let stored = snapshot.clone();
                match usecases::restore_circles(&mut state.circles, snapshot, &state.venues) {
                    Ok(()) => {
                        if state.circles.snapshot() != stored {
                            log::info!("Storing the repaired circles");
                            // A failure has already been logged
                            state.persist().ok();
                        }
                    }
                    Err(err) => {
                        log::warn!("Discarding the stored circles: {err}");
                    }
                }
            }
            Ok(None) => {
                log::debug!("No stored circles found");
            }
            Err(err) => {
                log::warn!("Failed to load the stored circles: {err}");
            }
        }
        log::info!(
            "Loaded {} venues in {} regions and {} circle(s)",
            state.venues.len(),
            state.regions.len(),
            state.circles.circles().len()
        );
        state.redraw_venues();
        state.redraw_circles();
        Ok(state)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn filtered_venues(&self) -> Vec<&Venue> {
        usecases::filter_venues(&self.venues, &self.filter)
    }

    pub fn venue_count_label(&self) -> String {
        usecases::venue_count_label(self.filtered_venues().len(), self.venues.len())
    }

    pub fn regions(&self) -> &[RegionSummary] {
        &self.regions
    }

    pub fn legend(&self) -> Vec<RegionSummary> {
        usecases::region_legend(&self.venues, self.config.legend_size)
    }

    pub fn region_options(&self) -> Vec<(String, String)> {
        usecases::region_options(&self.venues)
    }

    /// All distinct categories in alphabetical order.
    pub fn categories(&self) -> Vec<&str> {
        self.venues
            .iter()
            .map(|v| v.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn selected_venue(&self) -> Option<VenueId> {
        self.selected_venue
    }

    pub fn circles(&self) -> &CircleSet {
        &self.circles
    }

    pub fn selection(&self) -> Selection {
        self.circles.selection()
    }

    pub fn selected_circle(&self) -> Option<&Circle> {
        self.circles.selected()
    }

    pub fn snapshot(&self) -> Vec<CircleSnapshot> {
        self.circles.snapshot()
    }

    pub fn handle_event(&mut self, event: MapEvent) -> Result<()> {
        let kind = EventKind::from(&event);
        log::debug!("Handling event {kind}");
        let res = match event {
            MapEvent::SearchSubmitted(text) => {
                self.set_search_text(text);
                Ok(())
            }
            MapEvent::CategorySelected(category) => {
                self.set_category(category);
                Ok(())
            }
            MapEvent::RegionSelected(region) => {
                self.set_region(region);
                Ok(())
            }
            MapEvent::LegendRegionClicked(region) => {
                self.set_region(Some(region));
                Ok(())
            }
            MapEvent::VenueClicked(id) => self.select_venue(id),
            MapEvent::CreateCircleClicked => self.create_circle().map(|_| ()),
            MapEvent::CircleClicked(id) => self.select_circle(id),
            MapEvent::MapBackgroundClicked => {
                self.deselect_circle();
                Ok(())
            }
            MapEvent::CircleDragged { id, center } => self.drag_circle(id, center),
            MapEvent::CircleDragEnded { id, center } => self.end_drag(id, center),
            MapEvent::RadiusInput { id, radius } => self.set_radius(id, radius),
            MapEvent::RadiusSliderInput { id, position } => {
                self.set_radius_from_slider(id, position)
            }
            MapEvent::DeleteCircleClicked(id) => self.delete_circle(id),
            MapEvent::ClearCirclesClicked => self.clear_circles(),
            MapEvent::InteractivityToggled { id, interactive } => {
                self.set_circle_interactive(id, interactive)
            }
        };
        match res {
            Err(Error::NotInteractive(id)) => {
                log::debug!("Ignoring {kind} of non-interactive circle {id}");
                Ok(())
            }
            Err(Error::NotFound) => {
                log::debug!("Nothing found for {kind}");
                Err(Error::NotFound)
            }
            res => res,
        }
    }

    // ------ ------
    //    Filter
    // ------ ------

    pub fn set_search_text(&mut self, text: String) {
        self.filter.text = text;
        self.apply_filter();
        self.fit_filtered_venues();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
        self.apply_filter();
        self.fit_filtered_venues();
    }

    pub fn set_region(&mut self, region: Option<String>) {
        self.filter.region = region;
        self.apply_filter();
        match self.filter.region.as_deref() {
            Some(region) => match usecases::region_bbox(&self.venues, region) {
                Some(bbox) => self.surface.render(RenderInstruction::FitBounds {
                    bbox,
                    max_zoom: Some(self.config.region_max_zoom),
                }),
                None => log::debug!("No resolved venues in region {region}"),
            },
            None => {
                if let Some(bbox) = usecases::all_venues_bbox(&self.venues) {
                    self.surface.render(RenderInstruction::FitBounds {
                        bbox,
                        max_zoom: Some(self.config.all_max_zoom),
                    });
                }
            }
        }
    }

    fn apply_filter(&mut self) {
        if let Some(id) = self.selected_venue {
            if !self.filtered_venues().iter().any(|v| v.id == id) {
                self.selected_venue = None;
            }
        }
        self.redraw_venues();
    }

    fn fit_filtered_venues(&self) {
        let bbox = MapBbox::enclosing(self.filtered_venues().into_iter().filter_map(|v| v.pos));
        if let Some(bbox) = bbox {
            self.surface.render(RenderInstruction::FitBounds {
                bbox: bbox.pad(FILTERED_BBOX_PADDING),
                max_zoom: None,
            });
        }
    }

    pub fn select_venue(&mut self, id: VenueId) -> Result<()> {
        let venue = self
            .venues
            .iter()
            .find(|v| v.id == id)
            .ok_or(Error::NotFound)?;
        let center_on = venue.pos;
        self.selected_venue = Some(id);
        self.surface.render(RenderInstruction::HighlightVenue {
            venue_id: id,
            center_on,
            zoom: self.config.venue_zoom,
        });
        self.render_venue_list(&self.filtered_venues());
        Ok(())
    }

    // ------ ------
    //    Circles
    // ------ ------

    /// Create a circle at the center of the viewport.
    pub fn create_circle(&mut self) -> Result<CircleId> {
        let center = self.surface.view_center();
        self.create_circle_at(center)
    }

    pub fn create_circle_at(&mut self, center: MapPoint) -> Result<CircleId> {
        let previous = self.circles.selection();
        let id = self.circles.create(center, &self.venues).id;
        self.redraw_circle(previous.circle_id());
        self.redraw_circle(Some(id));
        self.show_selected_members();
        self.persist()?;
        Ok(id)
    }

    pub fn set_radius(&mut self, id: CircleId, radius: Distance) -> Result<()> {
        self.circles.set_radius(id, radius, &self.venues)?;
        self.redraw_circle(Some(id));
        self.show_members_if_selected(id);
        self.persist()
    }

    pub fn set_radius_from_slider(&mut self, id: CircleId, position: u16) -> Result<()> {
        let radius = usecases::slider_to_radius(self.circles.bounds(), position);
        self.set_radius(id, radius)
    }

    /// The slider position of a circle's radius.
    pub fn radius_slider_position(&self, id: CircleId) -> Option<u16> {
        self.circles
            .get(id)
            .map(|c| usecases::radius_to_slider(self.circles.bounds(), c.radius))
    }

    pub fn drag_circle(&mut self, id: CircleId, center: MapPoint) -> Result<()> {
        self.circles.drag(id, center)?;
        self.redraw_circle(Some(id));
        Ok(())
    }

    pub fn end_drag(&mut self, id: CircleId, center: MapPoint) -> Result<()> {
        self.circles.end_drag(id, center, &self.venues)?;
        self.redraw_circle(Some(id));
        self.show_members_if_selected(id);
        self.persist()
    }

    pub fn set_circle_interactive(&mut self, id: CircleId, interactive: bool) -> Result<()> {
        self.circles.set_interactive(id, interactive)?;
        self.redraw_circle(Some(id));
        Ok(())
    }

    pub fn delete_circle(&mut self, id: CircleId) -> Result<()> {
        let was_selected = self.circles.selection() == Selection::CircleSelected(id);
        self.circles.delete(id)?;
        self.surface.render(RenderInstruction::RemoveCircle(id));
        if was_selected {
            self.surface.render(RenderInstruction::HideCircleMembers);
        }
        self.persist()
    }

    pub fn clear_circles(&mut self) -> Result<()> {
        let removed = self.circles.clear();
        for circle in &removed {
            self.surface.render(RenderInstruction::RemoveCircle(circle.id));
        }
        self.surface.render(RenderInstruction::HideCircleMembers);
        log::info!("Removed {} circle(s)", removed.len());
        self.persist()
    }

    pub fn select_circle(&mut self, id: CircleId) -> Result<()> {
        let previous = self.circles.select(id)?;
        if previous != Selection::CircleSelected(id) {
            self.redraw_circle(previous.circle_id());
            self.redraw_circle(Some(id));
        }
        self.show_selected_members();
        Ok(())
    }

    pub fn deselect_circle(&mut self) {
        let previous = self.circles.deselect();
        if let Some(id) = previous.circle_id() {
            self.redraw_circle(Some(id));
            self.surface.render(RenderInstruction::HideCircleMembers);
        }
    }

    /// Replace all circles with a snapshot, e.g. from an imported file.
    ///
    /// Invalid data is rejected as a whole and leaves the circles untouched.
    pub fn restore(&mut self, snapshot: Vec<CircleSnapshot>) -> Result<()> {
        let previous: Vec<_> = self.circles.circles().iter().map(|c| c.id).collect();
        usecases::restore_circles(&mut self.circles, snapshot, &self.venues)?;
        for id in previous {
            self.surface.render(RenderInstruction::RemoveCircle(id));
        }
        self.surface.render(RenderInstruction::HideCircleMembers);
        self.redraw_circles();
        self.persist()
    }

    /// Lay out the member report of the selected circle.
    pub fn report(&self, layout: &ReportLayout, generated_at: OffsetDateTime) -> Result<Document> {
        usecases::circle_report(self.circles.selected(), layout, generated_at)
    }

    // ------ ------
    //   Geocoding
    // ------ ------

    /// Venues without a position and the address to look them up.
    pub fn unresolved_venues(&self) -> Vec<(VenueId, String)> {
        self.venues
            .iter()
            .filter(|v| !v.is_resolved() && !v.address.trim().is_empty())
            .map(|v| (v.id, v.address.clone()))
            .collect()
    }

    /// Store the position of a venue.
    ///
    /// Returns `false` if the venue does not exist (anymore).
    pub fn apply_resolved_position(&mut self, id: VenueId, pos: MapPoint) -> bool {
        match self.venues.iter_mut().find(|v| v.id == id) {
            Some(venue) => {
                venue.pos = Some(pos);
                true
            }
            None => {
                log::debug!("Ignoring the position of unknown venue {id}");
                false
            }
        }
    }

    /// Update everything that depends on venue positions.
    pub fn finish_geocoding_batch(&mut self) {
        self.circles.refresh_all_members(&self.venues);
        self.redraw_venues();
        self.show_selected_members();
    }

    // ------ ------
    //    Render
    // ------ ------

    fn render_venue_list(&self, filtered: &[&Venue]) {
        self.surface.render(RenderInstruction::UpdateVenueList {
            venue_ids: filtered.iter().map(|v| v.id).collect(),
            selected: self.selected_venue,
            label: usecases::venue_count_label(filtered.len(), self.venues.len()),
        });
    }

    fn redraw_venues(&self) {
        let filtered = self.filtered_venues();
        self.surface.render(RenderInstruction::ClearMarkers);
        for venue in &filtered {
            if let Some(pos) = venue.pos {
                self.surface.render(RenderInstruction::AddMarker {
                    venue_id: venue.id,
                    pos,
                    color: usecases::region_color(&self.regions, &venue.region),
                });
            }
        }
        self.render_venue_list(&filtered);
    }

    fn redraw_circle(&self, id: Option<CircleId>) {
        let Some(circle) = id.and_then(|id| self.circles.get(id)) else {
            return;
        };
        self.surface.render(RenderInstruction::DrawCircle {
            id: circle.id,
            center: circle.center,
            radius: circle.radius,
            selected: self.circles.selection() == Selection::CircleSelected(circle.id),
            interactive: circle.interactive,
        });
    }

    fn redraw_circles(&self) {
        for circle in self.circles.circles() {
            self.redraw_circle(Some(circle.id));
        }
        self.show_selected_members();
    }

    fn show_selected_members(&self) {
        if let Some(circle) = self.circles.selected() {
            self.surface.render(RenderInstruction::ShowCircleMembers {
                circle_id: circle.id,
                venue_ids: circle.members.iter().map(|m| m.venue_id).collect(),
            });
        }
    }

    fn show_members_if_selected(&self, id: CircleId) {
        if self.circles.selection() == Selection::CircleSelected(id) {
            self.show_selected_members();
        }
    }

    fn persist(&self) -> Result<()> {
        self.store
            .save_circle_snapshot(&self.circles.snapshot())
            .map_err(|err| {
                log::warn!("Failed to store the circles: {err}");
                Error::Store(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    type State = MapState<RecordingSurface, MemoryStore>;

    fn venues() -> Vec<Venue> {
        vec![
            Venue::build()
                .id(0)
                .name("A")
                .region("Greater London")
                .category("Pub")
                .address("1 Strand, London")
                .pos(MapPoint::from_lat_lng_deg(51.5, -0.1))
                .finish(),
            Venue::build()
                .id(1)
                .name("B")
                .region("Greater London")
                .category("Bar")
                .address("2 Fleet Street, London")
                .pos(MapPoint::from_lat_lng_deg(51.51, -0.11))
                .finish(),
            Venue::build()
                .id(2)
                .name("C")
                .region("Surrey")
                .category("Pub")
                .address("3 High Street, Guildford")
                .unresolved()
                .finish(),
            Venue::build()
                .id(3)
                .name("D")
                .region("Surrey")
                .category("Pub")
                .pos(MapPoint::from_lat_lng_deg(51.236, -0.570))
                .finish(),
        ]
    }

    fn state_with_store(store: MemoryStore) -> State {
        let state = MapState::new(
            MapConfig::default(),
            venues(),
            RecordingSurface::default(),
            store,
        )
        .unwrap();
        state.surface().take();
        state
    }

    fn state() -> State {
        state_with_store(MemoryStore::default())
    }

    fn london() -> MapPoint {
        MapPoint::from_lat_lng_deg(51.5, -0.1)
    }

    #[test]
    fn initial_render() {
        let state = MapState::new(
            MapConfig::default(),
            venues(),
            RecordingSurface::default(),
            MemoryStore::default(),
        )
        .unwrap();
        let rendered = state.surface().take();
        assert_eq!(RenderInstruction::ClearMarkers, rendered[0]);
        let markers = rendered
            .iter()
            .filter(|i| matches!(i, RenderInstruction::AddMarker { .. }))
            .count();
        assert_eq!(3, markers);
        assert!(rendered.contains(&RenderInstruction::UpdateVenueList {
            venue_ids: vec![0, 1, 2, 3],
            selected: None,
            label: "4 venues".into(),
        }));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut state = state();
        assert_eq!(1, state.create_circle_at(london()).unwrap());
        assert_eq!(2, state.create_circle_at(london()).unwrap());
        assert_eq!(3, state.create_circle_at(london()).unwrap());
        state.delete_circle(2).unwrap();
        assert_eq!(4, state.create_circle_at(london()).unwrap());
        assert_eq!(
            vec![1, 3, 4],
            state
                .store()
                .stored()
                .unwrap()
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn create_circle_in_the_view_center() {
        let mut state = state();
        state.handle_event(MapEvent::CreateCircleClicked).unwrap();
        let circle = state.selected_circle().unwrap();
        assert_eq!(london(), circle.center);
        assert_eq!(
            vec![0, 1],
            circle.members.iter().map(|m| m.venue_id).collect::<Vec<_>>()
        );
        let rendered = state.surface().take();
        assert!(rendered.contains(&RenderInstruction::DrawCircle {
            id: 1,
            center: london(),
            radius: usecases::DEFAULT_RADIUS,
            selected: true,
            interactive: true,
        }));
        assert!(rendered.contains(&RenderInstruction::ShowCircleMembers {
            circle_id: 1,
            venue_ids: vec![0, 1],
        }));
        assert_eq!(1, state.store().save_count.get());
    }

    #[test]
    fn selection_follows_create_select_and_delete() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        state.create_circle_at(london()).unwrap();
        assert_eq!(Selection::CircleSelected(2), state.selection());
        state.handle_event(MapEvent::CircleClicked(1)).unwrap();
        assert_eq!(Selection::CircleSelected(1), state.selection());
        state.surface().take();
        state.handle_event(MapEvent::MapBackgroundClicked).unwrap();
        assert_eq!(Selection::NoneSelected, state.selection());
        assert!(state
            .surface()
            .take()
            .contains(&RenderInstruction::HideCircleMembers));
        state.select_circle(2).unwrap();
        state.handle_event(MapEvent::DeleteCircleClicked(2)).unwrap();
        assert_eq!(Selection::NoneSelected, state.selection());
    }

    #[test]
    fn unknown_circles_are_not_found() {
        let mut state = state();
        assert!(matches!(
            state.handle_event(MapEvent::CircleClicked(7)),
            Err(Error::NotFound)
        ));
        assert!(matches!(
            state.handle_event(MapEvent::DeleteCircleClicked(7)),
            Err(Error::NotFound)
        ));
        assert_eq!(0, state.store().save_count.get());
    }

    #[test]
    fn drag_is_persisted_when_the_gesture_ends() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        let saves = state.store().save_count.get();
        let guildford = MapPoint::from_lat_lng_deg(51.236, -0.570);
        state
            .handle_event(MapEvent::CircleDragged {
                id: 1,
                center: guildford,
            })
            .unwrap();
        assert_eq!(saves, state.store().save_count.get());
        assert_eq!(2, state.selected_circle().unwrap().members.len());
        state
            .handle_event(MapEvent::CircleDragEnded {
                id: 1,
                center: guildford,
            })
            .unwrap();
        assert_eq!(saves + 1, state.store().save_count.get());
        assert_eq!(
            vec![3],
            state
                .selected_circle()
                .unwrap()
                .members
                .iter()
                .map(|m| m.venue_id)
                .collect::<Vec<_>>()
        );
        assert_eq!(guildford, state.store().stored().unwrap()[0].center);
    }

    #[test]
    fn drag_of_non_interactive_circle_is_ignored() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        state
            .handle_event(MapEvent::InteractivityToggled {
                id: 1,
                interactive: false,
            })
            .unwrap();
        state
            .handle_event(MapEvent::CircleDragged {
                id: 1,
                center: MapPoint::from_lat_lng_deg(52.0, 0.0),
            })
            .unwrap();
        assert_eq!(london(), state.circles().get(1).unwrap().center);
        assert!(!state.circles().get(1).unwrap().interactive);
    }

    #[test]
    fn radius_changes_are_clamped_and_persisted() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        state
            .handle_event(MapEvent::RadiusInput {
                id: 1,
                radius: Distance::from_meters(10.0),
            })
            .unwrap();
        let circle = state.circles().get(1).unwrap();
        assert_eq!(Distance::from_meters(100.0), circle.radius);
        assert_eq!(1, circle.members.len());
        assert_eq!(
            Distance::from_meters(100.0),
            state.store().stored().unwrap()[0].radius
        );
        state
            .handle_event(MapEvent::RadiusSliderInput {
                id: 1,
                position: 1000,
            })
            .unwrap();
        assert_eq!(Some(1000), state.radius_slider_position(1));
        assert_eq!(3, state.circles().get(1).unwrap().members.len());
    }

    #[test]
    fn clear_resets_ids() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        state.create_circle_at(london()).unwrap();
        state.handle_event(MapEvent::ClearCirclesClicked).unwrap();
        assert!(state.circles().is_empty());
        assert_eq!(Some(vec![]), state.store().stored());
        assert_eq!(1, state.create_circle_at(london()).unwrap());
    }

    #[test]
    fn store_failures_keep_the_change() {
        let mut state = state();
        state.store().fail.set(true);
        assert!(matches!(
            state.create_circle_at(london()),
            Err(Error::Store(_))
        ));
        assert_eq!(1, state.circles().circles().len());
    }

    #[test]
    fn restore_stored_circles_on_startup() {
        let stored = vec![
            CircleSnapshot {
                id: 5,
                center: london(),
                radius: Distance::from_meters(2_000.0),
            },
            CircleSnapshot {
                id: 9,
                center: MapPoint::from_lat_lng_deg(51.236, -0.570),
                radius: Distance::from_meters(1_000.0),
            },
        ];
        let mut state = state_with_store(MemoryStore::with_snapshot(stored));
        assert_eq!(
            vec![1, 2],
            state
                .snapshot()
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        );
        assert_eq!(2, state.circles().get(1).unwrap().members.len());
        assert_eq!(Selection::NoneSelected, state.selection());
        assert_eq!(3, state.create_circle_at(london()).unwrap());
    }

    #[test]
    fn repaired_ids_are_written_back_on_startup() {
        let stored = vec![CircleSnapshot {
            id: 5,
            center: london(),
            radius: Distance::from_meters(2_000.0),
        }];
        let state = state_with_store(MemoryStore::with_snapshot(stored));
        assert_eq!(Some(state.snapshot()), state.store().stored());
        assert_eq!(1, state.store().stored().unwrap()[0].id);
        assert_eq!(1, state.store().save_count.get());
    }

    #[test]
    fn contiguous_stored_circles_are_not_rewritten() {
        let stored = vec![CircleSnapshot {
            id: 1,
            center: london(),
            radius: Distance::from_meters(2_000.0),
        }];
        let state = state_with_store(MemoryStore::with_snapshot(stored.clone()));
        assert_eq!(Some(stored), state.store().stored());
        assert_eq!(0, state.store().save_count.get());
    }

    #[test]
    fn invalid_stored_circles_are_discarded() {
        let stored = vec![CircleSnapshot {
            id: 1,
            center: london(),
            radius: Distance::from_meters(-1.0),
        }];
        let state = state_with_store(MemoryStore::with_snapshot(stored));
        assert!(state.circles().is_empty());
    }

    #[test]
    fn import_replaces_all_circles() {
        let mut state = state();
        state.create_circle_at(london()).unwrap();
        state.surface().take();
        state
            .restore(vec![
                CircleSnapshot {
                    id: 5,
                    center: london(),
                    radius: Distance::from_meters(1_000.0),
                },
                CircleSnapshot {
                    id: 7,
                    center: london(),
                    radius: Distance::from_meters(2_000.0),
                },
                CircleSnapshot {
                    id: 2,
                    center: london(),
                    radius: Distance::from_meters(3_000.0),
                },
            ])
            .unwrap();
        let rendered = state.surface().take();
        assert!(rendered.contains(&RenderInstruction::RemoveCircle(1)));
        assert_eq!(
            vec![(2, 1_000.0), (3, 2_000.0), (1, 3_000.0)],
            state
                .snapshot()
                .iter()
                .map(|c| (c.id, c.radius.to_meters()))
                .collect::<Vec<_>>()
        );
        assert_eq!(Some(state.snapshot()), state.store().stored());

        let before = state.snapshot();
        let invalid = vec![CircleSnapshot {
            id: 1,
            center: london(),
            radius: Distance::from_meters(f64::NAN),
        }];
        assert!(matches!(
            state.restore(invalid),
            Err(Error::InvalidImportData(_))
        ));
        assert_eq!(before, state.snapshot());
    }

    #[test]
    fn report_requires_a_selected_circle() {
        let mut state = state();
        assert!(matches!(
            state.report(&ReportLayout::default(), OffsetDateTime::UNIX_EPOCH),
            Err(Error::ExportPrecondition(_))
        ));
        state.create_circle_at(london()).unwrap();
        let doc = state
            .report(&ReportLayout::default(), OffsetDateTime::UNIX_EPOCH)
            .unwrap();
        assert_eq!(1, doc.page_count());
        state.deselect_circle();
        assert!(matches!(
            state.report(&ReportLayout::default(), OffsetDateTime::UNIX_EPOCH),
            Err(Error::ExportPrecondition(_))
        ));
    }

    #[test]
    fn filter_events_redraw_the_venues() {
        let mut state = state();
        state
            .handle_event(MapEvent::CategorySelected(Some("Pub".into())))
            .unwrap();
        let rendered = state.surface().take();
        assert_eq!(RenderInstruction::ClearMarkers, rendered[0]);
        assert!(rendered.contains(&RenderInstruction::UpdateVenueList {
            venue_ids: vec![0, 2, 3],
            selected: None,
            label: "3 of 4 venues".into(),
        }));
        assert!(matches!(
            rendered.last(),
            Some(RenderInstruction::FitBounds { max_zoom: None, .. })
        ));

        state
            .handle_event(MapEvent::SearchSubmitted("  GUILDFORD ".into()))
            .unwrap();
        assert_eq!(vec![2], state.filtered_venues().iter().map(|v| v.id).collect::<Vec<_>>());
        assert_eq!("1 of 4 venues", state.venue_count_label());
    }

    #[test]
    fn region_events_zoom_to_the_region() {
        let mut state = state();
        state
            .handle_event(MapEvent::LegendRegionClicked("Surrey".into()))
            .unwrap();
        assert_eq!(Some("Surrey"), state.filter().region.as_deref());
        let rendered = state.surface().take();
        assert!(matches!(
            rendered.last(),
            Some(RenderInstruction::FitBounds {
                max_zoom: Some(12),
                ..
            })
        ));
        state.handle_event(MapEvent::RegionSelected(None)).unwrap();
        let rendered = state.surface().take();
        assert!(matches!(
            rendered.last(),
            Some(RenderInstruction::FitBounds {
                max_zoom: Some(6),
                ..
            })
        ));
        assert_eq!(4, state.filtered_venues().len());
    }

    #[test]
    fn highlight_clicked_venue() {
        let mut state = state();
        state.handle_event(MapEvent::VenueClicked(1)).unwrap();
        let rendered = state.surface().take();
        assert_eq!(
            RenderInstruction::HighlightVenue {
                venue_id: 1,
                center_on: Some(MapPoint::from_lat_lng_deg(51.51, -0.11)),
                zoom: 15,
            },
            rendered[0]
        );
        assert_eq!(Some(1), state.selected_venue());
        state
            .handle_event(MapEvent::RegionSelected(Some("Surrey".into())))
            .unwrap();
        assert_eq!(None, state.selected_venue());
        assert!(matches!(
            state.handle_event(MapEvent::VenueClicked(99)),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn geocoding_results_update_memberships() {
        let mut state = state();
        let guildford = MapPoint::from_lat_lng_deg(51.236, -0.570);
        state.create_circle_at(guildford).unwrap();
        assert_eq!(
            vec![(2, "3 High Street, Guildford".to_string())],
            state.unresolved_venues()
        );
        assert!(state.apply_resolved_position(2, MapPoint::from_lat_lng_deg(51.237, -0.571)));
        assert!(!state.apply_resolved_position(42, guildford));
        state.finish_geocoding_batch();
        assert!(state.unresolved_venues().is_empty());
        assert_eq!(
            vec![3, 2],
            state
                .selected_circle()
                .unwrap()
                .members
                .iter()
                .map(|m| m.venue_id)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn region_and_category_lists() {
        let state = state();
        assert_eq!(vec!["Bar", "Pub"], state.categories());
        assert_eq!(
            vec![
                ("Greater London".to_string(), "Greater London - 2 venues".to_string()),
                ("Surrey".to_string(), "Surrey - 2 venues".to_string()),
            ],
            state.region_options()
        );
        assert_eq!(2, state.legend().len());
    }

    #[test]
    fn event_kinds() {
        assert_eq!(
            EventKind::CircleDragEnded,
            EventKind::from(&MapEvent::CircleDragEnded {
                id: 1,
                center: london()
            })
        );
        assert_eq!("ClearCirclesClicked", EventKind::ClearCirclesClicked.to_string());
    }
}
