//! Resolution of location strings into resource descriptors.
//!
//! A location is resolved in the following order:
//!
//! 1. Registered `ProtocolResolver`s are asked first, in registration order.
//! 2. Shortcuts like `res:` are expanded recursively.
//! 3. A `classpath:` prefix yields a `ModuleResource` on the module lookup.
//! 4. A url with a scheme longer than one char yields a `FileSystemResource`
//! for `file:`, or a `UrlResource` if the connector supports the scheme.
//! Other schemes are rejected as malformed.
//! 5. Anything else is a bare path, which yields a `ModuleResource` as well.
//! An anchored loader resolves it relative to its anchor, unless it starts
//! with `/`.
//!
//! Resolution never checks whether the target actually exists.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use locus::prelude::*;
//!
//! let lookup = DirectoryLookup::new("assets").unwrap();
//! let loader = DefaultResourceLoader::new(Arc::new(lookup));
//!
//! let texture = loader.resource("classpath:textures/crate.png").unwrap();
//! let config = loader.resource("file:///etc/locus.json").unwrap();
//! assert!(texture.is_readable() || !config.exists());
//! ```

pub mod shortcut;
pub use self::shortcut::ShortcutResolver;

use std::fmt::Debug;
use std::sync::Arc;

use url::Url;

use crate::errors::*;
use crate::lookup::{DirectoryLookup, Lookup, LookupChain, ZipLookup};
use crate::net::{HttpConnector, UrlConnector};
use crate::resource::{Anchor, FileSystemResource, ModuleResource, Resource, UrlResource};
use crate::settings::LoaderSettings;

/// The prefix of locations resolved through the module lookup.
pub const MODULE_URL_PREFIX: &str = "classpath:";

const FILE_SCHEME: &str = "file";

/// Strategy that maps location strings onto resources.
pub trait ResourceLoader {
    /// Resolves `location` into a resource. The resource is not guaranteed to
    /// exist.
    fn resource(&self, location: &str) -> Result<Box<dyn Resource>>;

    /// Returns the module lookup `ModuleResource`s are created with.
    fn lookup(&self) -> &Arc<dyn Lookup>;
}

/// Resolution strategy for custom location protocols, consulted before any
/// built-in rule.
pub trait ProtocolResolver: Debug + Send + Sync + 'static {
    /// Resolves `location` with `loader`, or returns `None` to pass it on.
    fn resolve(&self, location: &str, loader: &dyn ResourceLoader) -> Option<Box<dyn Resource>>;
}

/// The default `ResourceLoader`.
#[derive(Debug, Clone)]
pub struct DefaultResourceLoader {
    lookup: Arc<dyn Lookup>,
    connector: Arc<dyn UrlConnector>,
    shortcuts: ShortcutResolver,
    resolvers: Vec<Arc<dyn ProtocolResolver>>,
}

impl DefaultResourceLoader {
    /// Creates a new loader on `lookup`. Network locations are connected over
    /// HTTP(S).
    pub fn new(lookup: Arc<dyn Lookup>) -> Self {
        DefaultResourceLoader {
            lookup,
            connector: Arc::new(HttpConnector::default()),
            shortcuts: ShortcutResolver::new(),
            resolvers: Vec::new(),
        }
    }

    /// Creates a new loader with `settings`, mounting its roots and archives in
    /// order.
    pub fn with_settings(settings: &LoaderSettings) -> Result<Self> {
        let mut chain = LookupChain::new();
        for v in &settings.roots {
            chain.register(DirectoryLookup::new(v.clone())?);
        }

        for v in &settings.archives {
            chain.register(ZipLookup::new(v.clone())?);
        }

        let mut loader = DefaultResourceLoader::new(Arc::new(chain));
        loader.connector = Arc::new(HttpConnector::new(&settings.http));

        for (k, v) in &settings.shortcuts {
            loader.shortcuts.add(k.clone(), v.clone())?;
        }

        info!(
            "Creates resource loader with {} lookup(s) and {} shortcut(s).",
            settings.roots.len() + settings.archives.len(),
            settings.shortcuts.len()
        );

        Ok(loader)
    }

    /// Registers a protocol resolver. Resolvers are consulted in the order they
    /// were added.
    pub fn add_protocol_resolver<T: ProtocolResolver>(&mut self, resolver: T) {
        self.resolvers.push(Arc::new(resolver));
    }

    /// Add or replace a shortcut definition.
    pub fn add_shortcut<T1, T2>(&mut self, shortcut: T1, fullname: T2) -> Result<()>
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        self.shortcuts.add(shortcut, fullname)
    }

    #[inline]
    pub fn shortcuts(&self) -> &ShortcutResolver {
        &self.shortcuts
    }

    /// Replaces the connector of network locations.
    pub fn set_connector(&mut self, connector: Arc<dyn UrlConnector>) {
        self.connector = connector;
    }

    /// Creates a loader that resolves bare paths relative to `anchor`.
    pub fn anchored(&self, anchor: Anchor) -> AnchoredResourceLoader {
        AnchoredResourceLoader::new(self.clone(), anchor)
    }

    fn resolve(
        &self,
        loader: &dyn ResourceLoader,
        location: &str,
        anchor: Option<&Anchor>,
    ) -> Result<Box<dyn Resource>> {
        for v in &self.resolvers {
            if let Some(resource) = v.resolve(location, loader) {
                debug!("Resolves {} with protocol resolver {:?}.", location, v);
                return Ok(resource);
            }
        }

        let location = self.shortcuts.resolve(location)?;

        if let Some(name) = location.strip_prefix(MODULE_URL_PREFIX) {
            trace!("Resolves {} as module resource.", location);
            return Ok(Box::new(ModuleResource::new(self.lookup.clone(), name)));
        }

        if let Ok(url) = Url::parse(&location) {
            // single letters are DOS drives rather than schemes.
            if url.scheme().len() > 1 {
                return self.resolve_url(url, &location);
            }
        }

        trace!("Resolves {} as bare path.", location);
        let resource = match anchor {
            Some(anchor) => ModuleResource::anchored(self.lookup.clone(), anchor.clone(), location),
            None => ModuleResource::new(self.lookup.clone(), location),
        };

        Ok(Box::new(resource))
    }

    fn resolve_url(&self, url: Url, location: &str) -> Result<Box<dyn Resource>> {
        if url.scheme() == FILE_SCHEME {
            trace!("Resolves {} as file.", location);
            let file = url
                .to_file_path()
                .map_err(|_| Error::MalformedLocation(location.to_owned()))?;
            return Ok(Box::new(FileSystemResource::from_file(file)));
        }

        if self.connector.supports(url.scheme()) {
            trace!("Resolves {} as url.", location);
            return Ok(Box::new(UrlResource::with_connector(
                url,
                self.connector.clone(),
            )));
        }

        Err(Error::MalformedLocation(location.to_owned()))
    }
}

impl ResourceLoader for DefaultResourceLoader {
    fn resource(&self, location: &str) -> Result<Box<dyn Resource>> {
        self.resolve(self, location, None)
    }

    #[inline]
    fn lookup(&self) -> &Arc<dyn Lookup> {
        &self.lookup
    }
}

/// A loader that resolves bare paths relative to an `Anchor`.
#[derive(Debug, Clone)]
pub struct AnchoredResourceLoader {
    inner: DefaultResourceLoader,
    anchor: Anchor,
}

impl AnchoredResourceLoader {
    pub fn new(inner: DefaultResourceLoader, anchor: Anchor) -> Self {
        AnchoredResourceLoader { inner, anchor }
    }

    #[inline]
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }
}

impl ResourceLoader for AnchoredResourceLoader {
    fn resource(&self, location: &str) -> Result<Box<dyn Resource>> {
        self.inner.resolve(self, location, Some(&self.anchor))
    }

    #[inline]
    fn lookup(&self) -> &Arc<dyn Lookup> {
        &self.inner.lookup
    }
}
