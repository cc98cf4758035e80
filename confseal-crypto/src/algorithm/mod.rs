//! The two supported cipher families.
//!
//! [`Algorithm`] is a closed set and every capability is an exhaustive `match`.

mod asymmetric;
mod symmetric;

pub use self::asymmetric::{RsaOaepCipher, RSA_KEY_BITS};
pub use self::symmetric::{AesGcmCipher, AES_KEY_SIZE};

use crate::error::CryptoResult;
use crate::key::{KeyPair, KeyWithType};
use crate::token::EncryptedToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encrypts plaintext configuration values into tokens.
pub trait Encrypter: Send + Sync {
    fn encrypt(&self, key: &KeyWithType, plaintext: &str) -> CryptoResult<EncryptedToken>;
}

/// Decrypts tokens back into plaintext configuration values.
pub trait Decrypter: Send + Sync {
    fn decrypt(&self, key: &KeyWithType, token: &EncryptedToken) -> CryptoResult<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "RSA")]
    Rsa,
}

impl Algorithm {
    /// Generates a fresh key pair: one 128-bit key for AES, a 2048-bit
    /// public/private pair for RSA.
    pub fn generate_key_pair(self) -> CryptoResult<KeyPair> {
        match self {
            Self::Aes => symmetric::generate_key_pair(),
            Self::Rsa => asymmetric::generate_key_pair(),
        }
    }

    /// An encrypter using this algorithm's default parameters.
    pub fn new_encrypter(self) -> Box<dyn Encrypter> {
        match self {
            Self::Aes => Box::new(AesGcmCipher),
            Self::Rsa => Box::new(RsaOaepCipher::default()),
        }
    }

    /// A decrypter for tokens produced by this algorithm.
    pub fn new_decrypter(self) -> Box<dyn Decrypter> {
        match self {
            Self::Aes => Box::new(AesGcmCipher),
            Self::Rsa => Box::new(RsaOaepCipher::default()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aes => "AES",
            Self::Rsa => "RSA",
        })
    }
}

impl EncryptedToken {
    /// Decrypts this token with the decrypter matching its own algorithm tag.
    pub fn decrypt(&self, key: &KeyWithType) -> CryptoResult<String> {
        self.algorithm().new_decrypter().decrypt(key, self)
    }
}

/// Encrypts `plaintext` with the algorithm implied by the key's type.
pub fn encrypt_with_key(key: &KeyWithType, plaintext: &str) -> CryptoResult<EncryptedToken> {
    key.key_type()
        .algorithm()
        .new_encrypter()
        .encrypt(key, plaintext)
}
