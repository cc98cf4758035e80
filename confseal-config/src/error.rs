//! Key resolution and substitution error types.

use crate::path::FieldPath;
use confseal_crypto::CryptoError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for key resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors raised while locating keys or decrypting a single value.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no key found in environment variable {0}")]
    MissingKey(String),

    #[error("key file not found: {}", .0.display())]
    KeyFileNotFound(PathBuf),

    #[error("key file I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// One token that could not be replaced during a document walk.
#[derive(Debug)]
pub struct SubstitutionFailure {
    pub field_path: FieldPath,
    pub original_token: String,
    pub cause: ResolveError,
}

impl fmt::Display for SubstitutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The value '{}' for field '{}' could not be replaced with its unencrypted value. \
             Underlying error - {}",
            self.original_token, self.field_path, self.cause
        )
    }
}

/// Errors raised while loading or substituting a whole document.
#[derive(Debug, Error)]
pub enum SubstitutionError {
    /// Every failure of one walk, in document order.
    #[error("{}", aggregate_message(label, failures))]
    Aggregate {
        label: String,
        failures: Vec<SubstitutionFailure>,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {label}: {source}")]
    Parse {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to bind {label}: {source}")]
    Bind {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SubstitutionError {
    /// The recorded failures, empty for anything but [`SubstitutionError::Aggregate`].
    pub fn failures(&self) -> &[SubstitutionFailure] {
        match self {
            Self::Aggregate { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn aggregate_message(label: &str, failures: &[SubstitutionFailure]) -> String {
    let lines: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!("{label} has the following errors:\n{}", lines.join("\n"))
}
