//! String based path manipulation shared by every resource variant.
//!
//! Paths are handled as `/` separated strings rather than `std::path::Path`, so
//! that module names, URL paths and native paths normalize the same way on every
//! platform.

use smallvec::SmallVec;

const SEPARATOR: char = '/';
const CURRENT: &str = ".";
const TOP: &str = "..";

/// Normalizes a path by collapsing redundant separators and resolving `.` and
/// `..` segments.
///
/// Windows separators are converted to `/`. A prefix like `file:` or `C:` that
/// appears before the first separator is kept untouched. Absolute paths stay
/// absolute, and a trailing separator (which marks a directory) is kept.
/// Leading `..` segments survive in relative paths, while in absolute paths
/// they are dropped since nothing sits above the root.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let normalized = path.replace('\\', "/");
    let mut rest = normalized.as_str();
    let mut prefix = String::new();

    if let Some(index) = rest.find(':') {
        let candidate = &rest[..=index];
        if !candidate.contains(SEPARATOR) {
            prefix.push_str(candidate);
            rest = &rest[(index + 1)..];
        }
    }

    let absolute = rest.starts_with(SEPARATOR);
    if absolute {
        prefix.push(SEPARATOR);
    }

    let mut tops = 0;
    let mut segments: SmallVec<[&str; 16]> = SmallVec::new();
    for segment in rest.split(SEPARATOR) {
        match segment {
            "" | CURRENT => continue,
            TOP => {
                if segments.pop().is_none() && !absolute {
                    tops += 1;
                }
            }
            v => segments.push(v),
        }
    }

    let mut body = String::with_capacity(rest.len());
    for (i, segment) in ::std::iter::repeat(TOP)
        .take(tops)
        .chain(segments.iter().cloned())
        .enumerate()
    {
        if i > 0 {
            body.push(SEPARATOR);
        }
        body.push_str(segment);
    }

    if !body.is_empty() && rest.ends_with(SEPARATOR) {
        body.push(SEPARATOR);
    }

    prefix + &body
}

/// Applies `relative` to `base`, replacing everything after the last separator
/// of `base`. The result is not cleaned.
pub fn apply_relative_path(base: &str, relative: &str) -> String {
    match base.rfind(SEPARATOR) {
        Some(index) => {
            let mut path = String::with_capacity(index + 1 + relative.len());
            path.push_str(&base[..index]);
            if !relative.starts_with(SEPARATOR) {
                path.push(SEPARATOR);
            }
            path.push_str(relative);
            path
        }
        None => relative.to_owned(),
    }
}

/// Returns the last segment of `path`, or `None` if `path` is empty.
pub fn filename(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }

    match path.rfind(SEPARATOR) {
        Some(index) => Some(&path[(index + 1)..]),
        None => Some(path),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clean() {
        assert_eq!(clean_path("/a/b/c.txt"), "/a/b/c.txt");
        assert_eq!(clean_path("/a//b///c.txt"), "/a/b/c.txt");
        assert_eq!(clean_path("/a/./b/../c.txt"), "/a/c.txt");
        assert_eq!(clean_path("a/b/../../c.txt"), "c.txt");
        assert_eq!(clean_path("./a/b"), "a/b");
        assert_eq!(clean_path("a/x/"), "a/x/");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("."), "");
        assert_eq!(clean_path(""), "");
    }

    #[test]
    fn clean_tops() {
        assert_eq!(clean_path("../a"), "../a");
        assert_eq!(clean_path("a/../../b"), "../b");
        assert_eq!(clean_path("/../a"), "/a");
    }

    #[test]
    fn clean_prefix() {
        assert_eq!(clean_path("file:/a/../b"), "file:/b");
        assert_eq!(clean_path("classpath:a//b"), "classpath:a/b");
        assert_eq!(clean_path("C:\\x\\..\\y.txt"), "C:/y.txt");
        assert_eq!(clean_path("a/b:c/d"), "a/b:c/d");
    }

    #[test]
    fn relative() {
        assert_eq!(apply_relative_path("/a/b.txt", "c.txt"), "/a/c.txt");
        assert_eq!(apply_relative_path("/a/b.txt", "/c.txt"), "/a/c.txt");
        assert_eq!(apply_relative_path("/a/x/", "y"), "/a/x/y");
        assert_eq!(apply_relative_path("b.txt", "c.txt"), "c.txt");
    }

    #[test]
    fn last_segment() {
        assert_eq!(filename("/a/b.txt"), Some("b.txt"));
        assert_eq!(filename("b.txt"), Some("b.txt"));
        assert_eq!(filename("a/"), Some(""));
        assert_eq!(filename(""), None);
    }
}
