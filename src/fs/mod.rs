//! Filesystem contexts backing path handles.
//!
//! A `PathHandle` pairs a path with the `FileSystem` context it should be
//! resolved in. `LocalFileSystem` resolves paths against the host as-is, while a
//! `RootedFileSystem` maps absolute paths under a host directory, much like a
//! mounted drive.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::errors::*;

/// `FileSystem` enumerates the operations a path handle is resolved through.
///
/// Every operation is expressed in terms of `locate`, which maps a path of this
/// context onto the host filesystem. Contexts can override individual
/// operations when they know better.
pub trait FileSystem: Debug + Send + Sync + 'static {
    /// Maps `path` onto a host path.
    fn locate(&self, path: &Path) -> PathBuf;

    /// Returns true if `path` points at an existing entry.
    fn exists(&self, path: &Path) -> bool {
        self.locate(path).exists()
    }

    /// Returns true if `path` points at a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.locate(path).is_dir()
    }

    /// Returns true if `path` is a regular file that could be read.
    fn is_readable(&self, path: &Path) -> bool {
        is_readable_file(&self.locate(path))
    }

    /// Returns true if `path` exists and is not write protected.
    fn is_writable(&self, path: &Path) -> bool {
        fs::metadata(self.locate(path))
            .map(|v| !v.permissions().readonly())
            .unwrap_or(false)
    }

    /// Opens `path` in read-only mode.
    fn open_read(&self, path: &Path) -> io::Result<fs::File> {
        fs::File::open(self.locate(path))
    }

    /// Opens `path` for writing, creating it or truncating an existing entry.
    fn open_write(&self, path: &Path) -> io::Result<fs::File> {
        fs::File::create(self.locate(path))
    }

    /// Opens an existing `path` in write-only mode, without truncating it.
    fn open_write_existing(&self, path: &Path) -> io::Result<fs::File> {
        fs::OpenOptions::new().write(true).open(self.locate(path))
    }

    /// Returns the size in bytes of `path`.
    fn size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(self.locate(path)).map(|v| v.len())
    }

    /// Returns the last modification time of `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(self.locate(path))?.modified()
    }
}

/// Checks readability from metadata alone. Entries are never opened, since
/// opening special files like FIFOs may block.
pub fn is_readable_file(path: &Path) -> bool {
    fs::metadata(path).map(|v| v.is_file()).unwrap_or(false)
}

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }

    /// Returns a shared instance suitable for `PathHandle`s.
    pub fn shared() -> Arc<dyn FileSystem> {
        Arc::new(LocalFileSystem)
    }
}

impl FileSystem for LocalFileSystem {
    #[inline]
    fn locate(&self, path: &Path) -> PathBuf {
        path.to_owned()
    }
}

/// Maps a host directory into a filesystem context. Absolute paths are resolved
/// against the root directory instead of the host root.
#[derive(Debug, Clone)]
pub struct RootedFileSystem {
    root: PathBuf,
}

impl RootedFileSystem {
    /// Creates a new rooted filesystem at `root`, which must be an existing
    /// directory.
    pub fn new<T: Into<PathBuf>>(root: T) -> Result<Self> {
        let root = root.into();
        info!("Creates rooted filesystem at {:?}.", root);

        let metadata = fs::metadata(&root)?;
        if metadata.is_dir() {
            Ok(RootedFileSystem { root })
        } else {
            Err(Error::NotFound(format!(
                "{:?} is not a decent directory.",
                root
            )))
        }
    }

    /// Returns the host directory this context is rooted at.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSystem for RootedFileSystem {
    fn locate(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("/") {
            Ok(relative) => self.root.join(relative),
            Err(_) => self.root.join(path),
        }
    }
}

/// A path bound to the filesystem context it lives in.
#[derive(Debug, Clone)]
pub struct PathHandle {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl PathHandle {
    /// Creates a path handle within `fs`.
    pub fn new<T: Into<PathBuf>>(fs: Arc<dyn FileSystem>, path: T) -> Self {
        PathHandle {
            fs,
            path: path.into(),
        }
    }

    /// Creates a path handle on the host filesystem.
    pub fn local<T: Into<PathBuf>>(path: T) -> Self {
        PathHandle::new(LocalFileSystem::shared(), path)
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// The host path this handle resolves to.
    #[inline]
    pub fn locate(&self) -> PathBuf {
        self.fs.locate(&self.path)
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.fs.is_dir(&self.path)
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.fs.is_readable(&self.path)
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.fs.is_writable(&self.path)
    }

    #[inline]
    pub fn open_read(&self) -> io::Result<fs::File> {
        self.fs.open_read(&self.path)
    }

    #[inline]
    pub fn open_write(&self) -> io::Result<fs::File> {
        self.fs.open_write(&self.path)
    }

    #[inline]
    pub fn open_write_existing(&self) -> io::Result<fs::File> {
        self.fs.open_write_existing(&self.path)
    }

    #[inline]
    pub fn size(&self) -> io::Result<u64> {
        self.fs.size(&self.path)
    }

    #[inline]
    pub fn modified(&self) -> io::Result<SystemTime> {
        self.fs.modified(&self.path)
    }
}
