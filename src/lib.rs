//! # Locus
//!
//! Locus gives one polymorphic handle, the resource descriptor, to byte-bearing
//! data regardless of where it lives: files on the local host, data packaged
//! with the program, network addresses or in-memory buffers.
//!
//! Resources are usually created by resolving location strings with a
//! `ResourceLoader`:
//!
//! | Location | Resource |
//! |---|---|
//! | `classpath:textures/crate.png` | `ModuleResource` on the module lookup |
//! | `file:///etc/locus.json` | `FileSystemResource` |
//! | `https://example.com/crate.png` | `UrlResource` |
//! | `textures/crate.png` | `ModuleResource`, relative to the anchor if any |
//!
//! Shortcuts like `res:` could be registered to expand into full locations, and
//! custom protocols are plugged in with `ProtocolResolver`s.
//!
//! All interaction afterwards goes through the `Resource` contract, and
//! resources that could be written to are reached with
//! `Resource::as_writable`.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod errors;
pub mod fs;
pub mod loader;
pub mod lookup;
pub mod net;
pub mod resource;
pub mod settings;
pub mod utils;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::fs::{FileSystem, LocalFileSystem, PathHandle, RootedFileSystem};
    pub use crate::loader::{
        AnchoredResourceLoader, DefaultResourceLoader, ProtocolResolver, ResourceLoader,
    };
    pub use crate::lookup::{DirectoryLookup, Lookup, LookupChain, MemoryLookup, ZipLookup};
    pub use crate::net::{HttpConnector, UrlConnector, UrlMetadata};
    pub use crate::resource::{
        Anchor, AsAny, ByteArrayResource, FileSystemResource, ModuleResource, Resource,
        StreamResource, UrlResource, WritableResource,
    };
    pub use crate::settings::LoaderSettings;
}
