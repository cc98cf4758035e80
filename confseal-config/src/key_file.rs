//! Key files.
//!
//! A key file holds one key in its text form. An RSA pair is stored as two
//! files: the public key at the given path and the private key next to it
//! with a `.private` suffix.

use crate::error::{ResolveError, ResolveResult};
use confseal_crypto::{CryptoError, KeyPair, KeyType, KeyWithType};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to the key path for the RSA private key.
pub const PRIVATE_KEY_SUFFIX: &str = ".private";

/// Path of the private half belonging to the key file at `path`.
pub fn private_key_path(path: &Path) -> PathBuf {
    let mut private = path.as_os_str().to_owned();
    private.push(PRIVATE_KEY_SUFFIX);
    PathBuf::from(private)
}

/// Reads a single key.
pub fn read_key(path: &Path) -> ResolveResult<KeyWithType> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ResolveError::KeyFileNotFound(path.to_path_buf()),
        _ => ResolveError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let key = KeyWithType::parse(&text)?;
    debug!(path = %path.display(), key_type = %key.key_type(), "read key file");
    Ok(key)
}

/// Reads the key pair rooted at `path`.
///
/// An AES key is used for both directions. An RSA public key pulls in the
/// private key from [`private_key_path`].
pub fn read_key_pair(path: &Path) -> ResolveResult<KeyPair> {
    let key = read_key(path)?;

    match key.key_type() {
        KeyType::Aes => Ok(KeyPair::symmetric(key)?),
        KeyType::RsaPublic => {
            let private = read_key(&private_key_path(path))?;
            Ok(KeyPair::of(key, private)?)
        }
        KeyType::RsaPrivate => Err(CryptoError::WrongKeyType {
            expected: KeyType::RsaPublic,
            actual: KeyType::RsaPrivate,
        }
        .into()),
    }
}

/// Writes `pair` to `path` (and the private half to [`private_key_path`]).
///
/// Parent directories are created. Existing files are never overwritten.
pub fn write_key_pair(pair: &KeyPair, path: &Path) -> ResolveResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ResolveError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    write_key(pair.encryption_key(), path)?;
    if !pair.is_symmetric() {
        write_key(pair.decryption_key(), &private_key_path(path))?;
    }
    Ok(())
}

fn write_key(key: &KeyWithType, path: &Path) -> ResolveResult<()> {
    let io_error = |source: io::Error| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Owner-only permissions from the moment the file exists (Unix)
    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(path)
            .map_err(io_error)?
    };

    #[cfg(not(unix))]
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_error)?;

    file.write_all(key.serialize().as_bytes()).map_err(io_error)?;
    debug!(path = %path.display(), key_type = %key.key_type(), "wrote key file");
    Ok(())
}
