//! Crypto error types.

use crate::key::KeyType;
use thiserror::Error;

/// Result type for key, token and cipher operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised by the key model, the token codec and the ciphers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("malformed encrypted value: {0}")]
    MalformedToken(String),

    #[error("incompatible key types: encryption key is {encryption}, decryption key is {decryption}")]
    IncompatibleKeyTypes {
        encryption: KeyType,
        decryption: KeyType,
    },

    #[error("wrong key type: expected {expected}, got {actual}")]
    WrongKeyType { expected: KeyType, actual: KeyType },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}
