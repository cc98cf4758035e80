//! AES-GCM with a 256-bit random IV per value.

use super::{Decrypter, Encrypter};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{KeyPair, KeyType, KeyWithType};
use crate::token::{EncryptedToken, AES_IV_SIZE};
use aes_gcm::aead::consts::U32;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::{Aes128, Aes256};
use aes_gcm::{AesGcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroize;

/// Size of generated AES keys in bytes (AES-128).
pub const AES_KEY_SIZE: usize = 16;

type Aes128Gcm = AesGcm<Aes128, U32>;
type Aes256Gcm = AesGcm<Aes256, U32>;

/// AES-GCM cipher. Accepts 128-bit and 256-bit keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct AesGcmCipher;

enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl Cipher {
    fn for_key(key: &KeyWithType) -> CryptoResult<Self> {
        key.expect_type(KeyType::Aes)?;

        let material = key.material();
        match material.len() {
            16 => Aes128Gcm::new_from_slice(material)
                .map(|c| Self::Aes128(Box::new(c)))
                .map_err(|e| CryptoError::MalformedKey(format!("invalid AES key: {e}"))),
            32 => Aes256Gcm::new_from_slice(material)
                .map(|c| Self::Aes256(Box::new(c)))
                .map_err(|e| CryptoError::MalformedKey(format!("invalid AES key: {e}"))),
            other => Err(CryptoError::MalformedKey(format!(
                "AES key must be 16 or 32 bytes, got {other}"
            ))),
        }
    }

    fn encrypt(&self, iv: &[u8; AES_IV_SIZE], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = Nonce::<U32>::from_slice(iv);
        let result = match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        };
        result.map_err(|e| CryptoError::Encryption(format!("AES-GCM encryption failed: {e}")))
    }

    fn decrypt(&self, iv: &[u8; AES_IV_SIZE], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        let nonce = Nonce::<U32>::from_slice(iv);
        let result = match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Self::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        };
        result.map_err(|_| {
            CryptoError::Decryption("authentication failed (wrong key or tampered data)".to_string())
        })
    }
}

pub(super) fn generate_key_pair() -> CryptoResult<KeyPair> {
    let mut material = [0u8; AES_KEY_SIZE];
    OsRng.fill_bytes(&mut material);
    let key = KeyWithType::new(KeyType::Aes, material.to_vec());
    material.zeroize();

    KeyPair::symmetric(key)
}

impl Encrypter for AesGcmCipher {
    fn encrypt(&self, key: &KeyWithType, plaintext: &str) -> CryptoResult<EncryptedToken> {
        let cipher = Cipher::for_key(key)?;

        let mut iv = [0u8; AES_IV_SIZE];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = cipher.encrypt(&iv, plaintext.as_bytes())?;
        trace!(len = ciphertext.len(), "encrypted value with AES-GCM");

        Ok(EncryptedToken::Aes { iv, ciphertext })
    }
}

impl Decrypter for AesGcmCipher {
    fn decrypt(&self, key: &KeyWithType, token: &EncryptedToken) -> CryptoResult<String> {
        let EncryptedToken::Aes { iv, ciphertext } = token else {
            return Err(CryptoError::Decryption(format!(
                "expected an AES value, got {}",
                token.algorithm()
            )));
        };

        let cipher = Cipher::for_key(key)?;
        let plaintext = cipher.decrypt(iv, ciphertext)?;

        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::Decryption(format!("plaintext is not UTF-8: {e}")))
    }
}
