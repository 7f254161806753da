//! Histopatch error handling

use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Error types within Histopatch
#[derive(std::fmt::Debug)]
pub enum PatchError {
    /// A sample index outside of the image listing
    IndexOutOfRange {
        /// The requested index, possibly counting from the end
        index: isize,
        /// Number of samples at the time of the request
        len: usize,
    },
    /// Errors interacting with I/O
    IoError(std::io::Error),
    /// Errors from the image library
    ImageError(Arc<image::error::ImageError>),
    /// Errors compiling a listing pattern
    PatternError(glob::PatternError),
    /// The dataset root cannot be turned into a listing pattern
    NonUnicodeRoot(PathBuf),
    /// Errors reading the configuration
    ConfigError(::config::ConfigError),
    /// Errors locating the configuration directory
    XdgError(xdg::BaseDirectoriesError),
}

/// Result type for `PatchError`
pub type PatchResult<T> = Result<T, PatchError>;

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            PatchError::IndexOutOfRange { index, len } => write!(
                f,
                "Index {} out of range for dataset with {} samples",
                index, len
            ),
            PatchError::IoError(err) => err.fmt(f),
            PatchError::ImageError(err) => err.fmt(f),
            PatchError::PatternError(err) => err.fmt(f),
            PatchError::NonUnicodeRoot(path) => {
                write!(f, "Dataset root is not valid unicode: {:?}", path)
            }
            PatchError::ConfigError(err) => err.fmt(f),
            PatchError::XdgError(err) => err.fmt(f),
        }
    }
}

impl Error for PatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PatchError::IoError(err) => Some(err),
            PatchError::ImageError(err) => Some(err.as_ref()),
            PatchError::PatternError(err) => Some(err),
            PatchError::ConfigError(err) => Some(err),
            PatchError::XdgError(err) => Some(err),
            PatchError::IndexOutOfRange { .. } | PatchError::NonUnicodeRoot(_) => None,
        }
    }
}

impl From<std::io::Error> for PatchError {
    fn from(err: std::io::Error) -> Self {
        PatchError::IoError(err)
    }
}

impl From<image::error::ImageError> for PatchError {
    fn from(err: image::error::ImageError) -> Self {
        PatchError::ImageError(Arc::new(err))
    }
}

impl From<glob::PatternError> for PatchError {
    fn from(err: glob::PatternError) -> Self {
        PatchError::PatternError(err)
    }
}

impl From<::config::ConfigError> for PatchError {
    fn from(err: ::config::ConfigError) -> Self {
        PatchError::ConfigError(err)
    }
}

impl From<xdg::BaseDirectoriesError> for PatchError {
    fn from(err: xdg::BaseDirectoriesError) -> Self {
        PatchError::XdgError(err)
    }
}
