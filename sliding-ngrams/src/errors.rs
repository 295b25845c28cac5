//! Error definitions.
use std::error::Error;
use std::{fmt, io, result};

/// A specialized Result type for this library.
pub type Result<T, E = NgramError> = result::Result<T, E>;

/// Errors in this library.
///
/// Reaching the end of the token stream is not an error; it is reported as `Ok(None)`.
#[derive(Debug)]
pub enum NgramError {
    /// Contains [`InputError`].
    Input(InputError),
    /// An I/O failure raised by the token source, passed through unchanged.
    Io(io::Error),
}

impl fmt::Display for NgramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input(e) => e.fmt(f),
            Self::Io(e) => write!(f, "IoError: {e}"),
        }
    }
}

impl Error for NgramError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(_) => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for NgramError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl NgramError {
    pub(crate) const fn input(msg: &'static str) -> Self {
        Self::Input(InputError { msg })
    }
}

/// Error used when the input argument is invalid.
#[derive(Debug)]
pub struct InputError {
    msg: &'static str,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", self.msg)
    }
}
