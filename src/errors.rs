use std::io;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    NotFound(String),
    #[fail(display = "{}", _0)]
    Unsupported(String),
    #[fail(display = "{}", _0)]
    IllegalState(String),
    #[fail(display = "{}", _0)]
    IO(io::Error),
    #[fail(display = "Location {} is malformed.", _0)]
    MalformedLocation(String),
    #[fail(display = "{}", _0)]
    InvalidShortcut(String),
    #[fail(display = "{}", _0)]
    Settings(serde_json::Error),
    #[fail(display = "{}", _0)]
    Zip(zip::result::ZipError),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IO(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err)
    }
}

/// Translates a native io error raised while a resource was being `action`ed.
///
/// Absent entries always surface as `Error::NotFound`, so callers can tell a
/// missing resource apart from other io faults.
pub fn translate(err: io::Error, description: &str, action: &str) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::NotFound(format!(
            "{} cannot be {} because it does not exist",
            description, action
        )),
        io::ErrorKind::Unsupported => {
            Error::Unsupported(format!("{} cannot be {}: {}", description, action, err))
        }
        _ => Error::IO(err),
    }
}

/// Builds the error returned when `description` has no notion of `what`.
pub fn unsupported(description: &str, what: &str) -> Error {
    Error::Unsupported(format!("{} cannot be resolved to {}", description, what))
}
