//! Resources backed by the filesystem.
//!
//! A `FileSystemResource` is constructed either from a native file handle (a
//! plain host path, operated through `std::fs`) or from a `PathHandle` bound to
//! a `FileSystem` context. The path handle is the more capable of the two and is
//! used for all streams, channels and sizes; the native handle answers the
//! remaining queries whenever it is present.

use std::env;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use url::Url;

use crate::errors::*;
use crate::fs::{is_readable_file, FileSystem, PathHandle};
use crate::utils;

use super::{base, InputStream, OutputStream, Resource, WritableResource};

#[derive(Debug, Clone)]
enum Backing {
    /// A native file. The path handle is derived from it on the host
    /// filesystem.
    Native { file: PathBuf, handle: PathHandle },
    /// A path handle within its filesystem context.
    Path(PathHandle),
}

/// A resource backed by a file or directory.
#[derive(Debug, Clone)]
pub struct FileSystemResource {
    path: String,
    backing: Backing,
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_owned();
    }

    env::current_dir()
        .map(|v| v.join(path))
        .unwrap_or_else(|_| path.to_owned())
}

impl FileSystemResource {
    /// Creates a new resource from a path string, backed by a native file.
    pub fn new<T: AsRef<str>>(path: T) -> Self {
        // the native file keeps the raw input, cleaning may collapse it to "".
        FileSystemResource::from_file(PathBuf::from(path.as_ref()))
    }

    /// Creates a new resource from a native file handle.
    pub fn from_file<T: Into<PathBuf>>(file: T) -> Self {
        let file = file.into();
        FileSystemResource {
            path: utils::clean_path(&file.to_string_lossy()),
            backing: Backing::Native {
                handle: PathHandle::local(file.clone()),
                file,
            },
        }
    }

    /// Creates a new resource from a path handle. All filesystem interactions
    /// go through the context of `handle`.
    pub fn from_path_handle(handle: PathHandle) -> Self {
        FileSystemResource {
            path: utils::clean_path(&handle.path().to_string_lossy()),
            backing: Backing::Path(handle),
        }
    }

    /// Creates a new resource locating `path` within the filesystem context
    /// `fs`.
    pub fn with_filesystem<T: AsRef<str>>(fs: Arc<dyn FileSystem>, path: T) -> Self {
        let path = utils::clean_path(path.as_ref());
        FileSystemResource {
            backing: Backing::Path(PathHandle::new(fs, path.clone())),
            path,
        }
    }

    /// Returns the normalized path of this resource.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this resource is backed by a native file handle.
    #[inline]
    pub fn is_native(&self) -> bool {
        match self.backing {
            Backing::Native { .. } => true,
            Backing::Path(_) => false,
        }
    }

    #[inline]
    fn handle(&self) -> &PathHandle {
        match self.backing {
            Backing::Native { ref handle, .. } => handle,
            Backing::Path(ref handle) => handle,
        }
    }

    fn translate(&self, err: io::Error, action: &str) -> Error {
        translate(err, &self.description(), action)
    }
}

impl Resource for FileSystemResource {
    fn exists(&self) -> bool {
        match self.backing {
            Backing::Native { ref file, .. } => file.exists(),
            Backing::Path(ref handle) => handle.exists(),
        }
    }

    fn is_readable(&self) -> bool {
        match self.backing {
            Backing::Native { ref file, .. } => is_readable_file(file),
            Backing::Path(ref handle) => handle.is_readable(),
        }
    }

    fn is_file(&self) -> bool {
        true
    }

    fn url(&self) -> Result<Url> {
        let file = match self.backing {
            Backing::Native { ref file, .. } => absolute(file),
            Backing::Path(ref handle) => absolute(&handle.locate()),
        };

        Url::from_file_path(&file).map_err(|_| unsupported(&self.description(), "URL"))
    }

    fn file(&self) -> Result<PathBuf> {
        match self.backing {
            Backing::Native { ref file, .. } => Ok(file.clone()),
            Backing::Path(ref handle) => Ok(handle.locate()),
        }
    }

    fn input_stream(&self) -> Result<InputStream> {
        let file = self
            .handle()
            .open_read()
            .map_err(|err| self.translate(err, "opened"))?;
        Ok(Box::new(io::BufReader::new(file)))
    }

    fn readable_channel(&self) -> Result<InputStream> {
        let file = self
            .handle()
            .open_read()
            .map_err(|err| self.translate(err, "opened"))?;
        Ok(Box::new(file))
    }

    fn content_length(&self) -> Result<u64> {
        match self.backing {
            Backing::Native { ref file, .. } => {
                let len = fs::metadata(file).map(|v| v.len()).unwrap_or(0);
                if len == 0 && !file.exists() {
                    return Err(Error::NotFound(format!(
                        "{} cannot be resolved in the file system for checking its content length",
                        self.description()
                    )));
                }

                Ok(len)
            }
            Backing::Path(ref handle) => handle
                .size()
                .map_err(|err| self.translate(err, "resolved for checking its content length")),
        }
    }

    fn last_modified(&self) -> Result<SystemTime> {
        match self.backing {
            Backing::Native { .. } => base::last_modified(self),
            Backing::Path(ref handle) => handle.modified().map_err(|err| {
                self.translate(err, "resolved for checking its last-modified timestamp")
            }),
        }
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn Resource>> {
        let path = utils::clean_path(&utils::apply_relative_path(&self.path, relative));
        let resource = match self.backing {
            Backing::Native { .. } => FileSystemResource::new(path),
            Backing::Path(ref handle) => {
                FileSystemResource::with_filesystem(handle.filesystem().clone(), path)
            }
        };

        Ok(Box::new(resource))
    }

    fn filename(&self) -> Option<String> {
        let path = match self.backing {
            Backing::Native { ref file, .. } => file,
            Backing::Path(ref handle) => handle.path(),
        };

        path.file_name().map(|v| v.to_string_lossy().into_owned())
    }

    fn description(&self) -> String {
        let path = match self.backing {
            Backing::Native { ref file, .. } => absolute(file),
            Backing::Path(ref handle) => absolute(&handle.locate()),
        };

        format!("file [{}]", path.display())
    }

    fn equals(&self, other: &dyn Resource) -> bool {
        other
            .as_any()
            .downcast_ref::<FileSystemResource>()
            .map(|v| v.path == self.path)
            .unwrap_or(false)
    }

    fn hash_code(&self, mut state: &mut dyn Hasher) {
        self.path.hash(&mut state);
    }

    fn as_writable(&self) -> Option<&dyn WritableResource> {
        Some(self)
    }
}

impl WritableResource for FileSystemResource {
    fn is_writable(&self) -> bool {
        match self.backing {
            Backing::Native { ref file, .. } => {
                fs::metadata(file)
                    .map(|v| !v.permissions().readonly())
                    .unwrap_or(false)
                    && !file.is_dir()
            }
            Backing::Path(ref handle) => handle.is_writable() && !handle.is_dir(),
        }
    }

    fn output_stream(&self) -> Result<OutputStream> {
        let file = self
            .handle()
            .open_write()
            .map_err(|err| self.translate(err, "opened for writing"))?;
        Ok(Box::new(io::BufWriter::new(file)))
    }

    fn writable_channel(&self) -> Result<OutputStream> {
        let file = self
            .handle()
            .open_write_existing()
            .map_err(|err| self.translate(err, "opened for writing"))?;
        Ok(Box::new(file))
    }
}
