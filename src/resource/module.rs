//! Resources packaged with the program and located through a module `Lookup`.

use std::any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use url::Url;

use crate::errors::*;
use crate::lookup::Lookup;
use crate::utils;

use super::{InputStream, Resource};

/// A namespace that relative module names are resolved against, e.g.
/// `locus/resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    namespace: String,
}

impl Anchor {
    pub fn new<T: AsRef<str>>(namespace: T) -> Self {
        let namespace = utils::clean_path(namespace.as_ref());
        Anchor {
            namespace: namespace.trim_matches('/').to_owned(),
        }
    }

    /// Derives the namespace from the module path of type `T`. For example,
    /// `locus::resource::ModuleResource` anchors at `locus/resource`.
    pub fn of<T: ?Sized>() -> Self {
        let name = any::type_name::<T>();
        let name = match name.find('<') {
            Some(index) => &name[..index],
            None => name,
        };

        let namespace = match name.rfind("::") {
            Some(index) => name[..index].replace("::", "/"),
            None => String::new(),
        };

        Anchor { namespace }
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolves `name` against this namespace. `..` segments of `name` may
    /// climb out of it.
    pub fn resolve(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            utils::clean_path(name)
        } else {
            utils::clean_path(&format!("{}/{}", self.namespace, name))
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.namespace)
    }
}

/// A resource located by name through a module `Lookup`.
///
/// Without an anchor, names are always resolved from the root of the lookup.
/// With an anchor, names are resolved relative to its namespace unless they
/// start with `/`.
#[derive(Debug, Clone)]
pub struct ModuleResource {
    path: String,
    anchor: Option<Anchor>,
    lookup: Arc<dyn Lookup>,
}

impl ModuleResource {
    /// Creates a resource named `path` at the root of `lookup`.
    pub fn new<T: AsRef<str>>(lookup: Arc<dyn Lookup>, path: T) -> Self {
        let path = utils::clean_path(path.as_ref());
        let path = match path.strip_prefix('/') {
            Some(v) => v.to_owned(),
            None => path,
        };

        ModuleResource {
            path,
            anchor: None,
            lookup,
        }
    }

    /// Creates a resource named `path` relative to `anchor`.
    pub fn anchored<T: AsRef<str>>(lookup: Arc<dyn Lookup>, anchor: Anchor, path: T) -> Self {
        ModuleResource {
            path: utils::clean_path(path.as_ref()),
            anchor: Some(anchor),
            lookup,
        }
    }

    /// Returns the path this resource was created with.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Returns the name which is actually passed to the lookup.
    pub fn resolved_name(&self) -> String {
        if let Some(v) = self.path.strip_prefix('/') {
            return v.to_owned();
        }

        match self.anchor {
            Some(ref anchor) => anchor.resolve(&self.path),
            None => self.path.clone(),
        }
    }

    fn translate(&self, err: ::std::io::Error, action: &str) -> Error {
        translate(err, &self.description(), action)
    }
}

impl Resource for ModuleResource {
    fn exists(&self) -> bool {
        self.lookup.exists(&self.resolved_name())
    }

    fn is_readable(&self) -> bool {
        let name = self.resolved_name();
        self.lookup.exists(&name) && !self.lookup.is_dir(&name)
    }

    fn is_file(&self) -> bool {
        self.lookup.native_path(&self.resolved_name()).is_some()
    }

    fn url(&self) -> Result<Url> {
        let name = self.resolved_name();
        if !self.lookup.exists(&name) {
            return Err(Error::NotFound(format!(
                "{} cannot be resolved to URL because it does not exist",
                self.description()
            )));
        }

        self.lookup
            .url(&name)
            .ok_or_else(|| unsupported(&self.description(), "URL"))
    }

    fn file(&self) -> Result<PathBuf> {
        let name = self.resolved_name();
        if !self.lookup.exists(&name) {
            return Err(Error::NotFound(format!(
                "{} cannot be resolved to absolute file path because it does not exist",
                self.description()
            )));
        }

        self.lookup
            .native_path(&name)
            .ok_or_else(|| unsupported(&self.description(), "absolute file path"))
    }

    fn input_stream(&self) -> Result<InputStream> {
        trace!("Opens {}.", self.description());
        self.lookup
            .open(&self.resolved_name())
            .map_err(|err| self.translate(err, "opened"))
    }

    fn content_length(&self) -> Result<u64> {
        self.lookup
            .len(&self.resolved_name())
            .map_err(|err| self.translate(err, "resolved for checking its content length"))
    }

    fn last_modified(&self) -> Result<SystemTime> {
        self.lookup.modified(&self.resolved_name()).map_err(|err| {
            self.translate(err, "resolved for checking its last-modified timestamp")
        })
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn Resource>> {
        let path = utils::apply_relative_path(&self.path, relative);
        let resource = match self.anchor {
            Some(ref anchor) => ModuleResource::anchored(self.lookup.clone(), anchor.clone(), path),
            None => ModuleResource::new(self.lookup.clone(), path),
        };

        Ok(Box::new(resource))
    }

    fn filename(&self) -> Option<String> {
        utils::filename(&self.path).map(|v| v.to_owned())
    }

    fn description(&self) -> String {
        format!("class path resource [{}]", self.resolved_name())
    }

    // Same name over the same lookup instance.
    fn equals(&self, other: &dyn Resource) -> bool {
        other
            .as_any()
            .downcast_ref::<ModuleResource>()
            .map(|v| {
                v.resolved_name() == self.resolved_name()
                    && Arc::as_ptr(&v.lookup) as *const () == Arc::as_ptr(&self.lookup) as *const ()
            })
            .unwrap_or(false)
    }

    fn hash_code(&self, mut state: &mut dyn Hasher) {
        self.resolved_name().hash(&mut state);
    }
}
