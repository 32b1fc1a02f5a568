use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::*;
use crate::resource::InputStream;

use super::Lookup;

/// Maps a local host directory into a module lookup.
#[derive(Debug, Clone)]
pub struct DirectoryLookup {
    root: PathBuf,
}

impl DirectoryLookup {
    /// Creates a new directory lookup at `root`.
    pub fn new<T: Into<PathBuf>>(root: T) -> Result<Self> {
        let root = root.into();
        info!("Creates directory based module lookup at {:?}.", root);

        let metadata = fs::metadata(&root)?;
        if metadata.is_dir() {
            // native paths must be absolute to be addressable.
            let root = fs::canonicalize(&root)?;
            Ok(DirectoryLookup { root })
        } else {
            Err(Error::NotFound(format!(
                "Directory lookup must be associated with a readable directory, found {:?}.",
                root
            )))
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    fn locate(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Lookup for DirectoryLookup {
    fn exists(&self, name: &str) -> bool {
        fs::metadata(self.locate(name)).is_ok()
    }

    fn is_dir(&self, name: &str) -> bool {
        self.locate(name).is_dir()
    }

    fn open(&self, name: &str) -> io::Result<InputStream> {
        let file = fs::File::open(self.locate(name))?;
        Ok(Box::new(io::BufReader::new(file)))
    }

    fn len(&self, name: &str) -> io::Result<u64> {
        fs::metadata(self.locate(name)).map(|v| v.len())
    }

    fn modified(&self, name: &str) -> io::Result<SystemTime> {
        fs::metadata(self.locate(name))?.modified()
    }

    fn native_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.locate(name);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}
