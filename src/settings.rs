//! Configurations of `DefaultResourceLoader`.
//!
//! ```json
//! {
//!     "roots": ["assets"],
//!     "archives": ["packs/base.zip"],
//!     "shortcuts": { "res:": "classpath:textures/" },
//!     "http": { "timeout_secs": 10 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::*;

/// Parameters of the HTTP(S) connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpParams {
    /// The timeout of every request, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpParams {
    fn default() -> Self {
        HttpParams {
            timeout_secs: 30,
            user_agent: concat!("locus/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// The settings of a resource loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Directories mounted as module lookups, in search order.
    pub roots: Vec<PathBuf>,
    /// Zip archives mounted as module lookups, searched after `roots`.
    pub archives: Vec<PathBuf>,
    /// Shortcut definitions, from shortcut to full name.
    pub shortcuts: BTreeMap<String, String>,
    pub http: HttpParams,
}

impl LoaderSettings {
    /// Deserializes settings from json.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads settings from the json file at `path`.
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        info!("Loads loader settings from {:?}.", path);

        let file = fs::File::open(path)?;
        LoaderSettings::from_json(file)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial() {
        let json = r#"{ "roots": ["a", "b"], "http": { "timeout_secs": 5 } }"#;
        let settings = LoaderSettings::from_json(json.as_bytes()).unwrap();

        assert_eq!(settings.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(settings.archives.is_empty());
        assert_eq!(settings.http.timeout_secs, 5);
        assert_eq!(settings.http.user_agent, HttpParams::default().user_agent);
    }

    #[test]
    fn malformed() {
        match LoaderSettings::from_json(&b"{ \"roots\": 1 }"[..]) {
            Err(Error::Settings(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
