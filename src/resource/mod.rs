//! Resource descriptors.
//!
//! A `Resource` is a handle to some piece of byte-bearing data, regardless of
//! where that data actually lives. It could be a file on the local host, an entry
//! packaged with the program and located through a module `Lookup`, a network
//! address, or just a buffer in memory. Consumers query and read it through the
//! same contract and never need to know which backing store produced it.
//!
//! # Variants
//!
//! | Variant | Backing store |
//! |---|---|
//! | `FileSystemResource` | A native file handle or a path handle bound to a `FileSystem`. |
//! | `ModuleResource` | An entry of a module `Lookup`, optionally anchored to a namespace. |
//! | `UrlResource` | A network address, opened through a `UrlConnector`. |
//! | `ByteArrayResource` | An immutable in-memory buffer. |
//! | `StreamResource` | An already opened stream that can be read exactly once. |
//!
//! Each variant supports a different combination of capabilities. Operations
//! which are not meaningful for a variant fail with `Error::Unsupported`, and
//! operations on data that is absent at the moment of the call fail with
//! `Error::NotFound`.
//!
//! # Writable resources
//!
//! Variants that also expose an output channel implement `WritableResource`,
//! which is reached with `Resource::as_writable`.
//!
//! # Ownership
//!
//! Every stream returned by a resource is owned by the caller and released when
//! dropped. Descriptors never track or close what they hand out.

pub mod base;
pub mod bytes;
pub mod filesystem;
pub mod module;
pub mod remote;
pub mod stream;

pub use self::bytes::ByteArrayResource;
pub use self::filesystem::FileSystemResource;
pub use self::module::{Anchor, ModuleResource};
pub use self::remote::UrlResource;
pub use self::stream::StreamResource;

use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use ::url::Url;

use crate::errors::*;

/// A readable stream handed out by resources.
pub type InputStream = Box<dyn Read + Send>;

/// A writable stream handed out by writable resources.
pub type OutputStream = Box<dyn Write + Send>;

/// Upcasts resources to `Any`, so that implementations can compare concrete
/// types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The contract every resource descriptor implements.
pub trait Resource: AsAny + Debug + Send + Sync {
    /// Returns true if the resource actually exists in physical form right now.
    fn exists(&self) -> bool;

    /// Returns true if the contents could be read through `input_stream`.
    fn is_readable(&self) -> bool {
        self.exists()
    }

    /// Returns true if this resource wraps an open stream, which could only be
    /// read once.
    fn is_open(&self) -> bool {
        false
    }

    /// Returns true if this resource resolves to a native file.
    fn is_file(&self) -> bool {
        false
    }

    /// Returns the address of this resource.
    fn url(&self) -> Result<Url> {
        Err(unsupported(&self.description(), "URL"))
    }

    /// Returns the identifier of this resource. Addresses and identifiers share
    /// the same representation, so this defaults to `url`.
    fn uri(&self) -> Result<Url> {
        self.url()
    }

    /// Returns the native file this resource resolves to.
    fn file(&self) -> Result<PathBuf> {
        Err(unsupported(&self.description(), "absolute file path"))
    }

    /// Opens a fresh stream over the contents.
    fn input_stream(&self) -> Result<InputStream>;

    /// Opens a channel over the contents.
    fn readable_channel(&self) -> Result<InputStream> {
        base::readable_channel(self)
    }

    /// Returns the length of the contents in bytes.
    fn content_length(&self) -> Result<u64> {
        base::content_length(self)
    }

    /// Returns the last modification time.
    fn last_modified(&self) -> Result<SystemTime> {
        base::last_modified(self)
    }

    /// Creates a resource of the same kind, relative to this one.
    fn create_relative(&self, _relative: &str) -> Result<Box<dyn Resource>> {
        Err(Error::Unsupported(format!(
            "Cannot create a relative resource for {}",
            self.description()
        )))
    }

    /// Returns the last segment of the path, if there is one.
    fn filename(&self) -> Option<String> {
        None
    }

    /// Returns a human readable description, used for logging and identity.
    fn description(&self) -> String;

    /// Returns true if `other` is considered the same resource.
    fn equals(&self, other: &dyn Resource) -> bool {
        base::equals(self, other)
    }

    /// Feeds the identity of this resource into `state`.
    fn hash_code(&self, state: &mut dyn Hasher) {
        base::hash_code(self, state)
    }

    /// Returns the writable capability, if this resource supports it.
    fn as_writable(&self) -> Option<&dyn WritableResource> {
        None
    }
}

/// Resources that additionally expose an output channel.
pub trait WritableResource: Resource {
    /// Returns true if the contents could be written through `output_stream`.
    fn is_writable(&self) -> bool {
        true
    }

    /// Opens a stream for writing, creating or truncating the contents.
    fn output_stream(&self) -> Result<OutputStream>;

    /// Opens a channel for writing over existing contents.
    fn writable_channel(&self) -> Result<OutputStream> {
        self.output_stream()
    }
}

impl PartialEq for dyn Resource {
    fn eq(&self, other: &dyn Resource) -> bool {
        self.equals(other)
    }
}

impl Eq for dyn Resource {}

impl Hash for dyn Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_code(state)
    }
}

impl fmt::Display for dyn Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

macro_rules! impl_resource_traits {
    ($name: ident) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::resource::Resource::equals(self, other)
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $crate::resource::Resource::hash_code(self, state)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", $crate::resource::Resource::description(self))
            }
        }
    };
}

impl_resource_traits!(FileSystemResource);
impl_resource_traits!(ModuleResource);
impl_resource_traits!(UrlResource);
impl_resource_traits!(ByteArrayResource);
impl_resource_traits!(StreamResource);
