//! Commonly used utilities for path strings.

pub mod path;

pub use self::path::{apply_relative_path, clean_path, filename};
