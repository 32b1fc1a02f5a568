use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use crate::resource::InputStream;

use super::Lookup;

/// A lookup over data compiled into the program, usually with `include_bytes!`.
#[derive(Debug, Default, Clone)]
pub struct MemoryLookup {
    entries: HashMap<String, Arc<[u8]>>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        MemoryLookup {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces entry `name`.
    pub fn insert<T1, T2>(&mut self, name: T1, bytes: T2)
    where
        T1: Into<String>,
        T2: Into<Arc<[u8]>>,
    {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Builder flavored `insert`.
    pub fn with<T1, T2>(mut self, name: T1, bytes: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<Arc<[u8]>>,
    {
        self.insert(name, bytes);
        self
    }

    fn get(&self, name: &str) -> io::Result<&Arc<[u8]>> {
        self.entries.get(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a packaged entry.", name),
            )
        })
    }
}

impl Lookup for MemoryLookup {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn open(&self, name: &str) -> io::Result<InputStream> {
        let bytes = self.get(name)?.clone();
        Ok(Box::new(io::Cursor::new(bytes)))
    }

    fn len(&self, name: &str) -> io::Result<u64> {
        self.get(name).map(|v| v.len() as u64)
    }
}
