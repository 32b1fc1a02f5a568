//! Fallback behavior shared by resource variants.
//!
//! The default methods of `Resource` delegate here, and variants call these
//! helpers directly when they only need to refine part of the behavior.

use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::time::SystemTime;

use crate::errors::*;

use super::{InputStream, Resource};

/// Adapts `input_stream` into a channel.
#[inline]
pub fn readable_channel<R: Resource + ?Sized>(resource: &R) -> Result<InputStream> {
    resource.input_stream()
}

/// Determines the content length by draining one stream and counting its
/// bytes. Only meant for variants which have no cheaper way to get it.
pub fn content_length<R: Resource + ?Sized>(resource: &R) -> Result<u64> {
    let mut stream = resource.input_stream()?;
    io::copy(&mut stream, &mut io::sink())
        .map_err(|err| translate(err, &resource.description(), "read"))
}

/// Determines the last modification time from the native file of `resource`.
pub fn last_modified<R: Resource + ?Sized>(resource: &R) -> Result<SystemTime> {
    let file = resource.file()?;
    fs::metadata(&file)
        .and_then(|v| v.modified())
        .map_err(|err| {
            translate(
                err,
                &resource.description(),
                "resolved in the file system for checking its last-modified timestamp",
            )
        })
}

/// Two resources are equal if they have the same concrete type and
/// description.
pub fn equals<R: Resource + ?Sized>(resource: &R, other: &dyn Resource) -> bool {
    resource.as_any().type_id() == other.as_any().type_id()
        && resource.description() == other.description()
}

/// Hashes the description of `resource`.
pub fn hash_code<R: Resource + ?Sized>(resource: &R, mut state: &mut dyn Hasher) {
    resource.description().hash(&mut state);
}
