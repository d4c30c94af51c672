use jfs::Store;
use std::{convert::TryFrom, io, path::Path};
use venuemap_boundary as json;
use venuemap_core::{
    entities::CircleSnapshot,
    repositories::{CircleRepo, Error as RepoError, Result as RepoResult},
};

pub const CIRCLES_KEY: &str = "venuemap.circles";

/// Key-value storage with one JSON file per key.
#[derive(Clone)]
pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

impl CircleRepo for JsonFileStore {
    fn load_circle_snapshot(&self) -> RepoResult<Option<Vec<CircleSnapshot>>> {
        let circles: Vec<json::Circle> = match self.json_store.get(CIRCLES_KEY) {
            Ok(circles) => circles,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(RepoError::InvalidData(err.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        circles
            .into_iter()
            .map(CircleSnapshot::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    fn save_circle_snapshot(&self, circles: &[CircleSnapshot]) -> RepoResult<()> {
        let circles: Vec<_> = circles.iter().copied().map(json::Circle::from).collect();
        self.json_store.save_with_id(&circles, CIRCLES_KEY)?;
        log::debug!("Stored {} circle(s)", circles.len());
        Ok(())
    }
}
