extern crate locus;
extern crate url;

use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use url::Url;

use locus::errors::Error;
use locus::prelude::*;
use locus::resource::InputStream;

#[derive(Debug, Default)]
struct MockConnector {
    entries: HashMap<String, (Vec<u8>, UrlMetadata)>,
}

impl MockConnector {
    fn with(mut self, url: &str, bytes: &[u8], metadata: UrlMetadata) -> Self {
        self.entries
            .insert(url.to_owned(), (bytes.to_vec(), metadata));
        self
    }

    fn get(&self, url: &Url) -> io::Result<&(Vec<u8>, UrlMetadata)> {
        self.entries
            .get(url.as_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, url.to_string()))
    }
}

impl UrlConnector for MockConnector {
    fn supports(&self, scheme: &str) -> bool {
        scheme == "mock"
    }

    fn probe(&self, url: &Url) -> io::Result<UrlMetadata> {
        self.get(url).map(|v| v.1)
    }

    fn open(&self, url: &Url) -> io::Result<InputStream> {
        let bytes = self.get(url)?.0.clone();
        Ok(Box::new(io::Cursor::new(bytes)))
    }
}

fn connector() -> Arc<dyn UrlConnector> {
    let modified = UNIX_EPOCH + Duration::from_secs(1_500_000_000);

    let connector = MockConnector::default()
        .with(
            "mock://host/a/b.txt",
            b"remote",
            UrlMetadata {
                content_length: Some(6),
                last_modified: Some(modified),
            },
        )
        .with("mock://host/a/c.txt", b"unsized", UrlMetadata::default());

    Arc::new(connector)
}

#[test]
fn remote() {
    let url = Url::parse("mock://host/a/b.txt").unwrap();
    let r = UrlResource::with_connector(url.clone(), connector());

    assert!(r.exists());
    assert!(r.is_readable());
    assert!(!r.is_file());
    assert_eq!(r.url().unwrap(), url);
    assert_eq!(r.uri().unwrap(), url);
    assert_eq!(r.content_length().unwrap(), 6);
    assert_eq!(
        r.last_modified().unwrap(),
        UNIX_EPOCH + Duration::from_secs(1_500_000_000)
    );
    assert_eq!(r.filename(), Some("b.txt".to_owned()));
    assert_eq!(r.description(), "URL [mock://host/a/b.txt]");

    let mut buf = String::new();
    r.input_stream()
        .unwrap()
        .read_to_string(&mut buf)
        .unwrap();
    assert_eq!(buf, "remote");

    match r.file() {
        Err(Error::Unsupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn without_metadata() {
    let r = UrlResource::with_connector(Url::parse("mock://host/a/c.txt").unwrap(), connector());

    // counts the body instead.
    assert_eq!(r.content_length().unwrap(), 7);

    match r.last_modified() {
        Err(Error::Unsupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn missing() {
    let r = UrlResource::with_connector(Url::parse("mock://host/a/d.txt").unwrap(), connector());

    assert!(!r.exists());
    assert!(!r.is_readable());

    match r.content_length() {
        Err(Error::NotFound(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match r.input_stream() {
        Err(Error::NotFound(_)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("opened a missing address"),
    }
}

#[test]
fn relative() {
    let r = UrlResource::with_connector(Url::parse("mock://host/a/b.txt").unwrap(), connector());

    let c = r.create_relative("c.txt").unwrap();
    assert!(c.exists());
    assert_eq!(c.url().unwrap().as_str(), "mock://host/a/c.txt");

    let c = r.create_relative("/c.txt").unwrap();
    assert_eq!(c.url().unwrap().as_str(), "mock://host/a/c.txt");

    let same = UrlResource::with_connector(Url::parse("mock://host/a/c.txt").unwrap(), connector());
    assert!(c.equals(&same));
}

#[test]
fn local_file() {
    let path = std::env::current_dir()
        .unwrap()
        .join("tests")
        .join("assets")
        .join("mock.txt");

    let r = UrlResource::new(Url::from_file_path(&path).unwrap());
    assert!(r.exists());
    assert!(r.is_readable());
    assert!(r.is_file());
    assert_eq!(r.file().unwrap(), path);
    assert_eq!(r.content_length().unwrap(), 13);
    assert!(r.last_modified().unwrap() <= SystemTime::now());

    let texture = r.create_relative("textures/crate.txt").unwrap();
    assert!(texture.exists());
    assert!(texture.is_file());
}

#[test]
fn malformed() {
    match UrlResource::parse("not a url") {
        Err(Error::MalformedLocation(_)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("parsed a malformed location"),
    }
}
