use std::hash::{Hash, Hasher};
use std::io;
use std::sync::Arc;

use crate::errors::*;

use super::{InputStream, Resource};

const DEFAULT_DESCRIPTION: &str = "resource loaded from byte array";

/// A resource over an immutable in-memory buffer. It always exists and can be
/// read any number of times.
#[derive(Debug, Clone)]
pub struct ByteArrayResource {
    bytes: Arc<[u8]>,
    description: String,
}

impl ByteArrayResource {
    pub fn new<T: Into<Arc<[u8]>>>(bytes: T) -> Self {
        ByteArrayResource::with_description(bytes, DEFAULT_DESCRIPTION)
    }

    pub fn with_description<T1, T2>(bytes: T1, description: T2) -> Self
    where
        T1: Into<Arc<[u8]>>,
        T2: Into<String>,
    {
        ByteArrayResource {
            bytes: bytes.into(),
            description: description.into(),
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Resource for ByteArrayResource {
    fn exists(&self) -> bool {
        true
    }

    fn input_stream(&self) -> Result<InputStream> {
        Ok(Box::new(io::Cursor::new(self.bytes.clone())))
    }

    fn content_length(&self) -> Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn last_modified(&self) -> Result<std::time::SystemTime> {
        Err(Error::Unsupported(format!(
            "{} has no last-modified timestamp",
            self.description()
        )))
    }

    fn description(&self) -> String {
        format!("Byte array resource [{}]", self.description)
    }

    // Identity is the content.
    fn equals(&self, other: &dyn Resource) -> bool {
        other
            .as_any()
            .downcast_ref::<ByteArrayResource>()
            .map(|v| v.bytes == self.bytes)
            .unwrap_or(false)
    }

    fn hash_code(&self, mut state: &mut dyn Hasher) {
        self.bytes.hash(&mut state);
    }
}
