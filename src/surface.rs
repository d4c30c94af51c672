use std::cell::Cell;
use venuemap_core::gateways::render::{RenderInstruction, RenderingSurface};
use venuemap_entities::geo::MapPoint;

/// A map surface without a map.
///
/// Instructions are only logged, the results are
/// printed by the commands themselves.
#[derive(Debug)]
pub struct ConsoleSurface {
    view_center: MapPoint,
    rendered: Cell<usize>,
}

impl ConsoleSurface {
    pub fn new(view_center: MapPoint) -> Self {
        Self {
            view_center,
            rendered: Cell::new(0),
        }
    }

    pub fn rendered(&self) -> usize {
        self.rendered.get()
    }
}

impl RenderingSurface for ConsoleSurface {
    fn render(&self, instruction: RenderInstruction) {
        self.rendered.set(self.rendered.get() + 1);
        match &instruction {
            RenderInstruction::AddMarker { .. } => log::trace!("{instruction:?}"),
            _ => log::debug!("{instruction:?}"),
        }
    }

    fn view_center(&self) -> MapPoint {
        self.view_center
    }
}
