use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use zip::ZipArchive;

use crate::errors::*;
use crate::resource::InputStream;

use super::Lookup;

/// A module lookup that builds on a zip archive.
#[derive(Debug)]
pub struct ZipLookup {
    path: PathBuf,
    archive: Mutex<ZipArchive<fs::File>>,
}

impl ZipLookup {
    /// Opens the zip archive at `path`.
    pub fn new<T: Into<PathBuf>>(path: T) -> Result<Self> {
        let path = path.into();
        info!("Creates zip based module lookup at {:?}.", path);

        let file = fs::File::open(&path)?;
        let archive = ZipArchive::new(file)?;
        Ok(ZipLookup {
            path,
            archive: Mutex::new(archive),
        })
    }

    /// Returns the path of the archive file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_entry<T, F>(&self, name: &str, func: F) -> io::Result<T>
    where
        F: FnOnce(&mut zip::read::ZipFile) -> io::Result<T>,
    {
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "zip archive lock poisoned."))?;

        let mut file = archive.by_name(name).map_err(|err| match err {
            zip::result::ZipError::FileNotFound => io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not an entry of {:?}.", name, self.path),
            ),
            zip::result::ZipError::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        })?;

        func(&mut file)
    }
}

impl Lookup for ZipLookup {
    fn exists(&self, name: &str) -> bool {
        self.with_entry(name, |_| Ok(())).is_ok() || self.is_dir(name)
    }

    fn is_dir(&self, name: &str) -> bool {
        if name.ends_with('/') {
            return self.with_entry(name, |v| Ok(v.is_dir())).unwrap_or(false);
        }

        self.with_entry(&format!("{}/", name), |v| Ok(v.is_dir()))
            .unwrap_or(false)
    }

    fn open(&self, name: &str) -> io::Result<InputStream> {
        let bytes = self.with_entry(name, |file| {
            let mut buf = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut buf)?;
            Ok(buf)
        })?;

        Ok(Box::new(io::Cursor::new(bytes)))
    }

    fn len(&self, name: &str) -> io::Result<u64> {
        self.with_entry(name, |file| Ok(file.size()))
    }

    fn modified(&self, name: &str) -> io::Result<SystemTime> {
        self.with_entry(name, |_| Ok(()))?;
        fs::metadata(&self.path)?.modified()
    }
}
