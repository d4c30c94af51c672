// Low-level storage access traits.
// The circle repository persists a single named snapshot
// of all circles. Memberships are never stored.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The stored data is invalid: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait CircleRepo {
    /// `None` if nothing has been stored yet.
    fn load_circle_snapshot(&self) -> Result<Option<Vec<CircleSnapshot>>>;
    fn save_circle_snapshot(&self, circles: &[CircleSnapshot]) -> Result<()>;
}
