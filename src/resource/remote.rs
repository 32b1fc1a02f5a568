//! Resources addressed by URL.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use url::Url;

use crate::errors::*;
use crate::fs::is_readable_file;
use crate::net::{HttpConnector, UrlConnector, UrlMetadata};

use super::{base, InputStream, Resource};

const FILE_SCHEME: &str = "file";

/// A resource at a network address. Addresses with the `file` scheme are
/// operated on the local host directly, others go through a `UrlConnector`.
#[derive(Debug, Clone)]
pub struct UrlResource {
    url: Url,
    connector: Arc<dyn UrlConnector>,
}

impl UrlResource {
    /// Creates a new resource at `url`, connected over HTTP(S).
    pub fn new(url: Url) -> Self {
        UrlResource::with_connector(url, Arc::new(HttpConnector::default()))
    }

    pub fn with_connector(url: Url, connector: Arc<dyn UrlConnector>) -> Self {
        UrlResource { url, connector }
    }

    /// Parses `location` into a new resource.
    pub fn parse<T: AsRef<str>>(location: T) -> Result<Self> {
        let location = location.as_ref();
        let url = Url::parse(location)
            .map_err(|_| Error::MalformedLocation(location.to_owned()))?;
        Ok(UrlResource::new(url))
    }

    #[inline]
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    fn native(&self) -> Option<PathBuf> {
        if self.url.scheme() == FILE_SCHEME {
            self.url.to_file_path().ok()
        } else {
            None
        }
    }

    fn probe(&self) -> io::Result<UrlMetadata> {
        self.connector.probe(&self.url)
    }

    fn translate(&self, err: io::Error, action: &str) -> Error {
        translate(err, &self.description(), action)
    }
}

impl Resource for UrlResource {
    fn exists(&self) -> bool {
        if let Some(path) = self.native() {
            return path.exists();
        }

        match self.probe() {
            Ok(_) => true,
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => {
                warn!("Failed to probe {}: {}.", self.url, err);
                false
            }
        }
    }

    fn is_readable(&self) -> bool {
        match self.native() {
            Some(path) => is_readable_file(&path),
            None => self.exists(),
        }
    }

    fn is_file(&self) -> bool {
        self.native().is_some()
    }

    fn url(&self) -> Result<Url> {
        Ok(self.url.clone())
    }

    fn file(&self) -> Result<PathBuf> {
        self.native()
            .ok_or_else(|| unsupported(&self.description(), "absolute file path"))
    }

    fn input_stream(&self) -> Result<InputStream> {
        if let Some(path) = self.native() {
            let file = fs::File::open(&path).map_err(|err| self.translate(err, "opened"))?;
            return Ok(Box::new(io::BufReader::new(file)));
        }

        self.connector
            .open(&self.url)
            .map_err(|err| self.translate(err, "opened"))
    }

    fn content_length(&self) -> Result<u64> {
        if let Some(path) = self.native() {
            return fs::metadata(&path)
                .map(|v| v.len())
                .map_err(|err| self.translate(err, "resolved for checking its content length"));
        }

        let metadata = self
            .probe()
            .map_err(|err| self.translate(err, "resolved for checking its content length"))?;

        match metadata.content_length {
            Some(len) => Ok(len),
            None => base::content_length(self),
        }
    }

    fn last_modified(&self) -> Result<SystemTime> {
        if self.native().is_some() {
            return base::last_modified(self);
        }

        let metadata = self.probe().map_err(|err| {
            self.translate(err, "resolved for checking its last-modified timestamp")
        })?;

        metadata.last_modified.ok_or_else(|| {
            Error::Unsupported(format!(
                "{} does not report its last-modified timestamp",
                self.description()
            ))
        })
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn Resource>> {
        let relative = relative.trim_start_matches('/');
        let url = self
            .url
            .join(relative)
            .map_err(|_| Error::MalformedLocation(relative.to_owned()))?;

        Ok(Box::new(UrlResource::with_connector(
            url,
            self.connector.clone(),
        )))
    }

    fn filename(&self) -> Option<String> {
        self.url
            .path_segments()
            .and_then(|mut v| v.next_back())
            .map(|v| v.to_owned())
    }

    fn description(&self) -> String {
        format!("URL [{}]", self.url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative() {
        let r = UrlResource::parse("http://localhost/a/b.txt").unwrap();
        assert_eq!(r.filename(), Some("b.txt".to_owned()));

        let relative = r.create_relative("/c/d.txt").unwrap();
        assert_eq!(
            relative.url().unwrap().as_str(),
            "http://localhost/a/c/d.txt"
        );
        assert_eq!(relative.description(), "URL [http://localhost/a/c/d.txt]");
    }

    #[test]
    fn file_scheme() {
        let r = UrlResource::parse("file:///_locus_missing_/a.txt").unwrap();
        assert!(r.is_file());
        assert!(!r.exists());
        assert!(r.file().is_ok());
        match r.content_length() {
            Err(Error::NotFound(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
