//! Error types for the chalkmd vault backend.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Every variant that concerns a concrete location carries the path, so the
//! UI shell can render a useful message without extra context.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all vault operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// An operation needed a vault but none has been opened
    #[error("no vault opened")]
    NoVaultOpen,

    /// The path given to `open_vault` does not exist
    #[error("vault path not found: {}: {source}", path.display())]
    VaultNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path given to `open_vault` exists but is not a directory
    #[error("vault path must be a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A vault-relative path resolved outside the vault root
    #[error("invalid path: outside vault: {}", path.display())]
    OutsideVault { path: PathBuf },

    /// Target of a read does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Malformed base64 payload on a binary write
    #[error("failed to decode base64 data for {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },

    /// Underlying filesystem failure
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category, for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoVaultOpen,
    VaultNotFound,
    NotADirectory,
    OutsideVault,
    NotFound,
    Decode,
    Io,
    Config,
}

impl Error {
    /// Wrap an I/O error with the operation and path it happened on.
    ///
    /// `NotFound` I/O errors are kept as [`Error::Io`]; only reads promote
    /// them to [`Error::NotFound`] (see [`Error::read_io`]).
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Like [`Error::io`], but a missing file becomes [`Error::NotFound`]
    pub fn read_io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::not_found(path)
        } else {
            Error::io(op, path, source)
        }
    }

    /// Create an outside-vault error
    pub fn outside_vault(path: impl Into<PathBuf>) -> Self {
        Error::OutsideVault { path: path.into() }
    }

    /// Create a not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoVaultOpen => ErrorKind::NoVaultOpen,
            Error::VaultNotFound { .. } => ErrorKind::VaultNotFound,
            Error::NotADirectory { .. } => ErrorKind::NotADirectory,
            Error::OutsideVault { .. } => ErrorKind::OutsideVault,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Io { .. } => ErrorKind::Io,
            Error::ConfigError { .. } => ErrorKind::Config,
        }
    }
}
