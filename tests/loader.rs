extern crate env_logger;
extern crate locus;
extern crate tempfile;

use std::fs;
use std::io::Read;
use std::sync::Arc;

use locus::errors::Error;
use locus::prelude::*;

fn read(resource: &dyn Resource) -> String {
    let mut buf = String::new();
    resource
        .input_stream()
        .unwrap()
        .read_to_string(&mut buf)
        .unwrap();
    buf
}

fn loader() -> DefaultResourceLoader {
    let _ = env_logger::try_init();

    let lookup = MemoryLookup::new()
        .with("tests/assets/mock.txt", &b"packaged"[..])
        .with("textures/crate.txt", &b"packaged crate"[..])
        .with("app/ui/button.json", &b"button"[..]);
    DefaultResourceLoader::new(Arc::new(lookup))
}

fn is<T: Resource>(resource: &dyn Resource) -> bool {
    resource.as_any().downcast_ref::<T>().is_some()
}

#[test]
fn module_prefix_wins_over_disk() {
    let loader = loader();
    assert!(fs::metadata("tests/assets/mock.txt").is_ok());

    let r = loader.resource("classpath:tests/assets/mock.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));
    assert_eq!(read(&*r), "packaged");

    let r = loader.resource("classpath:/textures/crate.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));
    assert_eq!(r.description(), "class path resource [textures/crate.txt]");
}

#[test]
fn file_scheme() {
    let loader = loader();
    let path = std::env::current_dir()
        .unwrap()
        .join("tests")
        .join("assets")
        .join("mock.txt");
    let location = format!("file://{}", path.display());

    let r = loader.resource(&location).unwrap();
    assert!(is::<FileSystemResource>(&*r));
    assert!(r.as_writable().is_some());
    assert_eq!(read(&*r), "Hello, World!");
}

#[test]
fn url_schemes() {
    let loader = loader();

    let r = loader.resource("https://localhost/a.txt").unwrap();
    assert!(is::<UrlResource>(&*r));
    assert_eq!(r.description(), "URL [https://localhost/a.txt]");

    match loader.resource("gopher://localhost/a.txt") {
        Err(Error::MalformedLocation(_)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(v) => panic!("resolved {}", v),
    }
}

#[test]
fn bare_paths() {
    let loader = loader();

    let r = loader.resource("textures/crate.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));
    assert_eq!(read(&*r), "packaged crate");

    let r = loader.resource("/textures/crate.txt").unwrap();
    assert_eq!(read(&*r), "packaged crate");

    // dos drives are not schemes.
    let r = loader.resource("C:/textures/crate.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));

    // resolving never checks existence.
    let r = loader.resource("missing.txt").unwrap();
    assert!(!r.exists());
}

#[test]
fn anchored() {
    let loader = loader().anchored(Anchor::new("app/ui"));
    assert_eq!(loader.anchor().namespace(), "app/ui");

    let r = loader.resource("button.json").unwrap();
    assert_eq!(read(&*r), "button");

    let r = loader.resource("/textures/crate.txt").unwrap();
    assert_eq!(read(&*r), "packaged crate");

    let r = loader.resource("classpath:app/ui/button.json").unwrap();
    assert_eq!(read(&*r), "button");

    let r = loader.resource("textures/crate.txt").unwrap();
    assert!(!r.exists());
}

#[test]
fn shortcuts() {
    let mut loader = loader();
    loader.add_shortcut("res:", "classpath:textures/").unwrap();
    loader.add_shortcut("tex:", "res:").unwrap();
    assert!(loader.shortcuts().has("res:"));

    let r = loader.resource("tex:crate.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));
    assert_eq!(read(&*r), "packaged crate");

    match loader.add_shortcut("res", "classpath:") {
        Err(Error::InvalidShortcut(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[derive(Debug)]
struct MemoryProtocol;

impl ProtocolResolver for MemoryProtocol {
    fn resolve(&self, location: &str, loader: &dyn ResourceLoader) -> Option<Box<dyn Resource>> {
        if let Some(v) = location.strip_prefix("mem:") {
            return Some(Box::new(ByteArrayResource::with_description(
                v.as_bytes().to_vec(),
                "mem",
            )));
        }

        if let Some(v) = location.strip_prefix("alias:") {
            return loader.resource(&format!("classpath:{}", v)).ok();
        }

        None
    }
}

#[test]
fn protocol_resolvers() {
    let mut loader = loader();
    loader.add_protocol_resolver(MemoryProtocol);

    let r = loader.resource("mem:inline").unwrap();
    assert!(is::<ByteArrayResource>(&*r));
    assert_eq!(read(&*r), "inline");

    let r = loader.resource("alias:textures/crate.txt").unwrap();
    assert_eq!(read(&*r), "packaged crate");

    // other locations fall through.
    let r = loader.resource("textures/crate.txt").unwrap();
    assert!(is::<ModuleResource>(&*r));

    // anchored loaders consult the same resolvers.
    let anchored = loader.anchored(Anchor::new("app"));
    let r = anchored.resource("mem:anchored").unwrap();
    assert_eq!(read(&*r), "anchored");
}

#[test]
fn settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locus.json");
    fs::write(
        &path,
        r#"{
            "roots": ["tests/assets"],
            "shortcuts": { "res:": "classpath:textures/" },
            "http": { "timeout_secs": 5 }
        }"#,
    )
    .unwrap();

    let settings = LoaderSettings::load(&path).unwrap();
    assert_eq!(settings.http.timeout_secs, 5);

    let loader = DefaultResourceLoader::with_settings(&settings).unwrap();
    let r = loader.resource("res:crate.txt").unwrap();
    assert!(r.exists());
    assert!(r.is_file());
    assert_eq!(read(&*r), "crate");

    let r = loader.resource("mock.txt").unwrap();
    assert_eq!(read(&*r), "Hello, World!");
    assert!(loader.lookup().exists("mock.txt"));
}

#[test]
fn settings_with_missing_root() {
    let mut settings = LoaderSettings::default();
    settings.roots.push("tests/_invalid_path_".into());
    assert!(DefaultResourceLoader::with_settings(&settings).is_err());
}
