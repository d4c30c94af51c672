use std::{
    fs, io,
    path::{Path, PathBuf},
};
use venuemap_core::gateways::file::FileGateway;

/// Files in a local directory.
///
/// Relative file names are resolved against the directory,
/// absolute file names are used as they are.
#[derive(Debug, Clone)]
pub struct FsFileGateway {
    dir: PathBuf,
}

impl FsFileGateway {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl FileGateway for FsFileGateway {
    fn save_as(&self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.resolve(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    fn open(&self, file_name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(file_name))
    }
}
