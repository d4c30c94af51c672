use super::{membership::refresh_members, prelude::*};

pub const DEFAULT_RADIUS: Distance = Distance::from_meters(10_000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    NoneSelected,
    CircleSelected(CircleId),
}

impl Selection {
    pub fn circle_id(self) -> Option<CircleId> {
        match self {
            Self::NoneSelected => None,
            Self::CircleSelected(id) => Some(id),
        }
    }
}

/// The live set of circles with their selection state.
#[derive(Debug, Clone)]
pub struct CircleSet {
    circles: Vec<Circle>,
    last_id: CircleId,
    selection: Selection,
    bounds: RadiusBounds,
    default_radius: Distance,
}

impl Default for CircleSet {
    fn default() -> Self {
        Self {
            circles: vec![],
            last_id: 0,
            selection: Selection::NoneSelected,
            bounds: RadiusBounds::default(),
            default_radius: DEFAULT_RADIUS,
        }
    }
}

impl CircleSet {
    pub fn new(bounds: RadiusBounds, default_radius: Distance) -> Result<Self> {
        if !bounds.is_valid() {
            return Err(Error::RadiusBounds);
        }
        Ok(Self {
            bounds,
            default_radius: bounds.clamp(default_radius),
            ..Default::default()
        })
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn get(&self, id: CircleId) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: CircleId) -> Result<&mut Circle> {
        self.circles
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<&Circle> {
        self.selection.circle_id().and_then(|id| self.get(id))
    }

    /// The id the next created circle will get.
    pub fn next_id(&self) -> CircleId {
        self.circles
            .iter()
            .map(|c| c.id)
            .fold(self.last_id, CircleId::max)
            + 1
    }

    /// Create a new circle with the default radius and select it.
    pub fn create(&mut self, center: MapPoint, venues: &[Venue]) -> &Circle {
        let id = self.next_id();
        self.last_id = id;
        let mut circle = Circle::new(id, center, self.default_radius);
        refresh_members(&mut circle, venues);
        log::debug!("Created circle {id} at {center}");
        self.circles.push(circle);
        self.selection = Selection::CircleSelected(id);
        let idx = self.circles.len() - 1;
        &self.circles[idx]
    }

    /// Change the radius within the allowed bounds.
    pub fn set_radius(
        &mut self,
        id: CircleId,
        radius: Distance,
        venues: &[Venue],
    ) -> Result<&Circle> {
        let radius = self.bounds.clamp(radius);
        let circle = self.get_mut(id)?;
        circle.radius = radius;
        refresh_members(circle, venues);
        Ok(circle)
    }

    /// Move the center while a drag gesture is in progress.
    ///
    /// The members are left untouched until [`CircleSet::end_drag`].
    pub fn drag(&mut self, id: CircleId, center: MapPoint) -> Result<&Circle> {
        let circle = self.get_mut(id)?;
        if !circle.interactive {
            return Err(Error::NotInteractive(id));
        }
        circle.center = center;
        Ok(circle)
    }

    pub fn end_drag(&mut self, id: CircleId, center: MapPoint, venues: &[Venue]) -> Result<&Circle> {
        let circle = self.get_mut(id)?;
        if !circle.interactive {
            return Err(Error::NotInteractive(id));
        }
        circle.center = center;
        refresh_members(circle, venues);
        Ok(circle)
    }

    pub fn set_interactive(&mut self, id: CircleId, interactive: bool) -> Result<&Circle> {
        let circle = self.get_mut(id)?;
        circle.interactive = interactive;
        Ok(circle)
    }

    pub fn delete(&mut self, id: CircleId) -> Result<Circle> {
        let idx = self
            .circles
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound)?;
        let circle = self.circles.remove(idx);
        if self.selection == Selection::CircleSelected(id) {
            self.selection = Selection::NoneSelected;
        }
        Ok(circle)
    }

    /// Remove all circles and reset the id counter.
    pub fn clear(&mut self) -> Vec<Circle> {
        self.selection = Selection::NoneSelected;
        self.last_id = 0;
        std::mem::take(&mut self.circles)
    }

    /// Select a circle and return the previous selection.
    pub fn select(&mut self, id: CircleId) -> Result<Selection> {
        if self.get(id).is_none() {
            return Err(Error::NotFound);
        }
        let previous = self.selection;
        self.selection = Selection::CircleSelected(id);
        Ok(previous)
    }

    pub fn deselect(&mut self) -> Selection {
        std::mem::replace(&mut self.selection, Selection::NoneSelected)
    }

    pub fn refresh_all_members(&mut self, venues: &[Venue]) {
        for circle in &mut self.circles {
            refresh_members(circle, venues);
        }
    }

    pub fn snapshot(&self) -> Vec<CircleSnapshot> {
        self.circles.iter().map(CircleSnapshot::from).collect()
    }

    /// Replace all circles.
    ///
    /// The snapshot must have been checked and repaired before.
    pub(crate) fn replace(&mut self, snapshot: Vec<CircleSnapshot>, venues: &[Venue]) {
        self.selection = Selection::NoneSelected;
        self.circles = snapshot
            .into_iter()
            .map(|CircleSnapshot { id, center, radius }| {
                let mut circle = Circle::new(id, center, self.bounds.clamp(radius));
                refresh_members(&mut circle, venues);
                circle
            })
            .collect();
        self.last_id = self.circles.iter().map(|c| c.id).max().unwrap_or(0);
    }
}
