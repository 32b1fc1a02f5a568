//! Network connections behind `UrlResource`s.

use std::fmt::Debug;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use chrono::DateTime;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, LAST_MODIFIED};
use reqwest::StatusCode;
use url::Url;

use crate::resource::InputStream;
use crate::settings::HttpParams;

/// What a connector learned about an address without transferring its body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UrlMetadata {
    pub content_length: Option<u64>,
    pub last_modified: Option<SystemTime>,
}

/// Opens connections to network addresses.
pub trait UrlConnector: Debug + Send + Sync + 'static {
    /// Checks if addresses with `scheme` could be handled by this connector.
    fn supports(&self, scheme: &str) -> bool;

    /// Probes `url` for its metadata. Fails with `io::ErrorKind::NotFound` if
    /// there is nothing at that address.
    fn probe(&self, url: &Url) -> io::Result<UrlMetadata>;

    /// Opens a readable stream over the body of `url`.
    fn open(&self, url: &Url) -> io::Result<InputStream>;
}

/// A blocking HTTP(S) connector. The underlying client is built on first use
/// and shared by every later request.
#[derive(Debug)]
pub struct HttpConnector {
    timeout: Duration,
    user_agent: String,
    client: Mutex<Option<Client>>,
}

impl Default for HttpConnector {
    fn default() -> Self {
        HttpConnector::new(&HttpParams::default())
    }
}

fn other<E: ToString>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

fn check(url: &Url, status: StatusCode) -> io::Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} responds with {}", url, status),
        )),
        _ => Err(other(format!("{} responds with {}", url, status))),
    }
}

impl HttpConnector {
    pub fn new(params: &HttpParams) -> Self {
        HttpConnector {
            timeout: Duration::from_secs(params.timeout_secs),
            user_agent: params.user_agent.clone(),
            client: Mutex::new(None),
        }
    }

    fn client(&self) -> io::Result<Client> {
        let mut client = self
            .client
            .lock()
            .map_err(|_| other("http client lock poisoned."))?;

        if let Some(ref v) = *client {
            return Ok(v.clone());
        }

        info!("Creates http client with timeout {:?}.", self.timeout);
        let v = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(other)?;

        *client = Some(v.clone());
        Ok(v)
    }
}

impl UrlConnector for HttpConnector {
    fn supports(&self, scheme: &str) -> bool {
        scheme == "http" || scheme == "https"
    }

    fn probe(&self, url: &Url) -> io::Result<UrlMetadata> {
        debug!("Probes {}.", url);

        let response = self.client()?.head(url.clone()).send().map_err(other)?;
        check(url, response.status())?;

        let headers = response.headers();
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let last_modified = headers
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| match DateTime::parse_from_rfc2822(v) {
                Ok(v) => Some(SystemTime::from(v)),
                Err(err) => {
                    warn!("Ignores malformed Last-Modified of {}: {}.", url, err);
                    None
                }
            });

        Ok(UrlMetadata {
            content_length,
            last_modified,
        })
    }

    fn open(&self, url: &Url) -> io::Result<InputStream> {
        debug!("Opens connection to {}.", url);

        let response = self.client()?.get(url.clone()).send().map_err(other)?;
        check(url, response.status())?;
        Ok(Box::new(response))
    }
}
