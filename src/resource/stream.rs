use std::fmt;
use std::sync::Mutex;
use std::time::SystemTime;

use crate::errors::*;

use super::{InputStream, Resource};

const DEFAULT_DESCRIPTION: &str = "resource loaded through InputStream";

/// A resource over an already opened stream. The stream is handed out exactly
/// once; later requests fail with `Error::IllegalState`.
pub struct StreamResource {
    stream: Mutex<Option<InputStream>>,
    description: String,
}

impl StreamResource {
    pub fn new(stream: InputStream) -> Self {
        StreamResource::with_description(stream, DEFAULT_DESCRIPTION)
    }

    pub fn with_description<T: Into<String>>(stream: InputStream, description: T) -> Self {
        StreamResource {
            stream: Mutex::new(Some(stream)),
            description: description.into(),
        }
    }

    fn is_consumed(&self) -> bool {
        self.stream.lock().map(|v| v.is_none()).unwrap_or(true)
    }
}

impl fmt::Debug for StreamResource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StreamResource")
            .field("description", &self.description)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl Resource for StreamResource {
    fn exists(&self) -> bool {
        !self.is_consumed()
    }

    fn is_open(&self) -> bool {
        true
    }

    fn input_stream(&self) -> Result<InputStream> {
        let consumed = || {
            Error::IllegalState(format!(
                "InputStream has already been read - do not use {} more than once",
                self.description()
            ))
        };

        let mut stream = self.stream.lock().map_err(|_| consumed())?;
        stream.take().ok_or_else(consumed)
    }

    fn content_length(&self) -> Result<u64> {
        Err(Error::Unsupported(format!(
            "Content length of {} is unknown without consuming it",
            self.description()
        )))
    }

    fn last_modified(&self) -> Result<SystemTime> {
        Err(Error::Unsupported(format!(
            "{} has no last-modified timestamp",
            self.description()
        )))
    }

    fn description(&self) -> String {
        format!("InputStream resource [{}]", self.description)
    }
}
