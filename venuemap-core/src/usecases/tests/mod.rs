//! In-memory gateways for testing.

use crate::{
    entities::*,
    gateways::render::{RenderInstruction, RenderingSurface},
    repositories::{self, CircleRepo},
};
use std::cell::{Cell, RefCell};

pub use venuemap_entities::builders::*;

#[derive(Debug)]
pub struct RecordingSurface {
    pub center: MapPoint,
    pub rendered: RefCell<Vec<RenderInstruction>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            center: MapPoint::from_lat_lng_deg(51.5, -0.1),
            rendered: RefCell::new(vec![]),
        }
    }
}

impl RecordingSurface {
    pub fn take(&self) -> Vec<RenderInstruction> {
        self.rendered.take()
    }
}

impl RenderingSurface for RecordingSurface {
    fn render(&self, instruction: RenderInstruction) {
        self.rendered.borrow_mut().push(instruction);
    }

    fn view_center(&self) -> MapPoint {
        self.center
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub snapshot: RefCell<Option<Vec<CircleSnapshot>>>,
    pub save_count: Cell<usize>,
    pub fail: Cell<bool>,
}

impl MemoryStore {
    pub fn with_snapshot(snapshot: Vec<CircleSnapshot>) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
            ..Default::default()
        }
    }

    pub fn stored(&self) -> Option<Vec<CircleSnapshot>> {
        self.snapshot.borrow().clone()
    }
}

impl CircleRepo for MemoryStore {
    fn load_circle_snapshot(&self) -> repositories::Result<Option<Vec<CircleSnapshot>>> {
        if self.fail.get() {
            return Err(repositories::Error::InvalidData("unreadable".into()));
        }
        Ok(self.snapshot.borrow().clone())
    }

    fn save_circle_snapshot(&self, circles: &[CircleSnapshot]) -> repositories::Result<()> {
        if self.fail.get() {
            return Err(repositories::Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.save_count.set(self.save_count.get() + 1);
        *self.snapshot.borrow_mut() = Some(circles.to_vec());
        Ok(())
    }
}
