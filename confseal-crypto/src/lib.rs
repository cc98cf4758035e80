//! Encryption layer for confseal.
//!
//! Provides the pieces needed to embed secrets in configuration files:
//! - Typed keys (`AES:…`, `RSA-PUB:…`, `RSA-PRIV:…`) and key pairs
//! - AES-GCM and RSA-OAEP ciphers behind one [`Algorithm`] enum
//! - The `enc:` token codec
//!
//! # Token format
//!
//! A token is `enc:` followed by base64. AES tokens carry `iv ‖ ciphertext`;
//! RSA tokens carry a small JSON envelope that records the OAEP digests:
//!
//! ```text
//! {"ciphertext":"…","mode":"OAEP","type":"RSA","mdf1-alg":"SHA-256","oaep-alg":"SHA-256"}
//! ```
//!
//! Tokens never contain key material, and can be recognized without a key.

pub mod algorithm;
mod error;
mod key;
pub mod token;

pub use algorithm::{
    encrypt_with_key, Algorithm, AesGcmCipher, Decrypter, Encrypter, RsaOaepCipher,
    AES_KEY_SIZE, RSA_KEY_BITS,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{KeyPair, KeyType, KeyWithType};
pub use token::{
    has_token_prefix, is_encrypted_token, DigestAlgorithm, EncryptedToken, RsaMode,
    TOKEN_PREFIX,
};
