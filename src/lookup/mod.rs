//! The module lookup facility behind `ModuleResource`s.
//!
//! A `Lookup` maps a symbolic, `/` separated name onto a byte stream or reports
//! that nothing is found. Names never start with a separator; anchoring to a
//! namespace happens before a name reaches the lookup.
//!
//! Several backing stores are provided: `DirectoryLookup` mounts a local host
//! directory, `ZipLookup` serves a zip archive, and `MemoryLookup` holds data
//! compiled into the program. A `LookupChain` merges them, searching in the
//! order they were registered.

pub mod archive;
pub mod dir;
pub mod memory;

pub use self::archive::ZipLookup;
pub use self::dir::DirectoryLookup;
pub use self::memory::MemoryLookup;

use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use url::Url;

use crate::resource::InputStream;

pub trait Lookup: Debug + Send + Sync + 'static {
    /// Checks if an entry named `name` exists.
    fn exists(&self, name: &str) -> bool;

    /// Checks whether or not `name` is a directory.
    fn is_dir(&self, _name: &str) -> bool {
        false
    }

    /// Opens a readable stream of entry `name`.
    fn open(&self, name: &str) -> io::Result<InputStream>;

    /// Returns the length in bytes of entry `name`.
    fn len(&self, name: &str) -> io::Result<u64>;

    /// Returns the last modification time of entry `name`.
    fn modified(&self, name: &str) -> io::Result<SystemTime> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("modification time of {} is not tracked", name),
        ))
    }

    /// Returns the native file that entry `name` resolves to, if any.
    fn native_path(&self, _name: &str) -> Option<PathBuf> {
        None
    }

    /// Returns the address of entry `name`, if it has one.
    fn url(&self, name: &str) -> Option<Url> {
        self.native_path(name)
            .and_then(|v| Url::from_file_path(v).ok())
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("can't find {} in any registered lookup.", name),
    )
}

/// Merges multiple lookups. The search order is same as the order user
/// registers lookups.
#[derive(Debug, Default, Clone)]
pub struct LookupChain {
    lookups: Vec<Arc<dyn Lookup>>,
}

impl LookupChain {
    pub fn new() -> Self {
        LookupChain { lookups: vec![] }
    }

    pub fn register<T: Lookup>(&mut self, lookup: T) {
        self.lookups.push(Arc::new(lookup));
    }

    pub fn register_shared(&mut self, lookup: Arc<dyn Lookup>) {
        self.lookups.push(lookup);
    }

    /// Returns the registered lookups in search order.
    #[inline]
    pub fn lookups(&self) -> &[Arc<dyn Lookup>] {
        &self.lookups
    }

    fn find(&self, name: &str) -> Option<&Arc<dyn Lookup>> {
        self.lookups.iter().find(|v| v.exists(name))
    }
}

impl Lookup for LookupChain {
    fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn is_dir(&self, name: &str) -> bool {
        self.find(name).map(|v| v.is_dir(name)).unwrap_or(false)
    }

    fn open(&self, name: &str) -> io::Result<InputStream> {
        self.find(name)
            .ok_or_else(|| not_found(name))
            .and_then(|v| v.open(name))
    }

    fn len(&self, name: &str) -> io::Result<u64> {
        self.find(name)
            .ok_or_else(|| not_found(name))
            .and_then(|v| v.len(name))
    }

    fn modified(&self, name: &str) -> io::Result<SystemTime> {
        self.find(name)
            .ok_or_else(|| not_found(name))
            .and_then(|v| v.modified(name))
    }

    fn native_path(&self, name: &str) -> Option<PathBuf> {
        self.find(name).and_then(|v| v.native_path(name))
    }

    fn url(&self, name: &str) -> Option<Url> {
        self.find(name).and_then(|v| v.url(name))
    }
}
