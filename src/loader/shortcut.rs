//! Central registry for shortcut definitions. Shortcuts are location aliases
//! that could be expanded into full locations, e.g. `res:` into
//! `classpath:assets/`.

use std::collections::HashMap;

use crate::errors::*;

/// The maximum number of expansions applied to a single location.
const MAX_DEPTH: usize = 32;

/// Central registry for shortcut definitions.
#[derive(Debug, Default, Clone)]
pub struct ShortcutResolver {
    registry: HashMap<String, String>,
}

impl ShortcutResolver {
    /// Creates a new shortcut registry.
    pub fn new() -> Self {
        ShortcutResolver {
            registry: HashMap::new(),
        }
    }

    /// Add or replace a shortcut definition.
    pub fn add<T1, T2>(&mut self, shortcut: T1, fullname: T2) -> Result<()>
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        let shortcut = shortcut.into();
        let fullname = fullname.into();

        if !shortcut.ends_with(':') {
            return Err(Error::InvalidShortcut(format!(
                "Shortcut {} MUST ends with a colon (':').",
                shortcut
            )));
        }

        if shortcut.len() < 2 {
            return Err(Error::InvalidShortcut(
                "Shortcut MUST be at least 2 chars to not be confused with DOS drive letters."
                    .to_owned(),
            ));
        }

        if !fullname.ends_with(':') && !fullname.ends_with('/') {
            return Err(Error::InvalidShortcut(format!(
                "Fullname {} must end in a '/' (dir) or ':' (other shortcut).",
                fullname
            )));
        }

        debug!("Adds shortcut {} -> {}.", shortcut, fullname);
        self.registry.insert(shortcut, fullname);
        Ok(())
    }

    /// Checks if a shortcut exists.
    #[inline]
    pub fn has<T: AsRef<str>>(&self, shortcut: T) -> bool {
        self.registry.contains_key(shortcut.as_ref())
    }

    /// Expands shortcuts in `src` recursively. Locations with an unregistered
    /// prefix, or none at all, are returned untouched.
    pub fn resolve<T: AsRef<str>>(&self, src: T) -> Result<String> {
        let src = src.as_ref();
        let mut dst = src.to_owned();

        for _ in 0..MAX_DEPTH {
            // urls with authority are never expanded.
            if dst.contains("://") {
                return Ok(dst);
            }

            let index = match dst.find(':') {
                Some(index) => index,
                None => return Ok(dst),
            };

            match self.registry.get(&dst[..=index]) {
                Some(fullname) => dst.replace_range(..=index, fullname),
                None => return Ok(dst),
            }
        }

        Err(Error::MalformedLocation(format!(
            "{} (shortcuts are expanded recursively more than {} times)",
            src, MAX_DEPTH
        )))
    }
}
