//! RSA with OAEP padding.
//!
//! The OAEP and MGF1 digests are recorded in every token and decryption
//! rebuilds the padding from the token, never from the current defaults.

use super::{Decrypter, Encrypter};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{KeyPair, KeyType, KeyWithType};
use crate::token::{DigestAlgorithm, EncryptedToken, RsaMode};
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::digest::DynDigest;
use tracing::debug;

/// Modulus size of generated RSA keys.
pub const RSA_KEY_BITS: usize = 2048;

/// RSA-OAEP cipher.
///
/// The digests only affect encryption; decryption always follows the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsaOaepCipher {
    oaep_digest: DigestAlgorithm,
    mgf1_digest: DigestAlgorithm,
}

impl Default for RsaOaepCipher {
    fn default() -> Self {
        Self {
            oaep_digest: DigestAlgorithm::Sha256,
            mgf1_digest: DigestAlgorithm::Sha256,
        }
    }
}

impl RsaOaepCipher {
    pub fn with_digests(oaep_digest: DigestAlgorithm, mgf1_digest: DigestAlgorithm) -> Self {
        Self {
            oaep_digest,
            mgf1_digest,
        }
    }

    pub fn oaep_digest(&self) -> DigestAlgorithm {
        self.oaep_digest
    }

    pub fn mgf1_digest(&self) -> DigestAlgorithm {
        self.mgf1_digest
    }
}

fn boxed_digest(digest: DigestAlgorithm) -> Box<dyn DynDigest + Send + Sync> {
    match digest {
        DigestAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
        DigestAlgorithm::Sha384 => Box::new(sha2::Sha384::default()),
        DigestAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
    }
}

fn oaep_padding(oaep_digest: DigestAlgorithm, mgf1_digest: DigestAlgorithm) -> Oaep {
    Oaep {
        digest: boxed_digest(oaep_digest),
        mgf_digest: boxed_digest(mgf1_digest),
        label: None,
    }
}

fn public_key(key: &KeyWithType) -> CryptoResult<RsaPublicKey> {
    key.expect_type(KeyType::RsaPublic)?;
    RsaPublicKey::from_public_key_der(key.material())
        .map_err(|e| CryptoError::MalformedKey(format!("invalid RSA public key: {e}")))
}

fn private_key(key: &KeyWithType) -> CryptoResult<RsaPrivateKey> {
    key.expect_type(KeyType::RsaPrivate)?;
    RsaPrivateKey::from_pkcs8_der(key.material())
        .map_err(|e| CryptoError::MalformedKey(format!("invalid RSA private key: {e}")))
}

pub(super) fn generate_key_pair() -> CryptoResult<KeyPair> {
    let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public = RsaPublicKey::from(&private);

    let private_der = private
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyGeneration(format!("PKCS#8 encoding failed: {e}")))?;
    let public_der = public
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyGeneration(format!("SPKI encoding failed: {e}")))?;

    debug!(bits = RSA_KEY_BITS, "generated RSA key pair");

    KeyPair::of(
        KeyWithType::new(KeyType::RsaPublic, public_der.as_bytes().to_vec()),
        KeyWithType::new(KeyType::RsaPrivate, private_der.as_bytes().to_vec()),
    )
}

impl Encrypter for RsaOaepCipher {
    fn encrypt(&self, key: &KeyWithType, plaintext: &str) -> CryptoResult<EncryptedToken> {
        let public = public_key(key)?;
        let padding = oaep_padding(self.oaep_digest, self.mgf1_digest);

        let ciphertext = public
            .encrypt(&mut OsRng, padding, plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(format!("RSA-OAEP encryption failed: {e}")))?;

        Ok(EncryptedToken::Rsa {
            ciphertext,
            mode: RsaMode::Oaep,
            oaep_digest: self.oaep_digest,
            mgf1_digest: self.mgf1_digest,
        })
    }
}

impl Decrypter for RsaOaepCipher {
    fn decrypt(&self, key: &KeyWithType, token: &EncryptedToken) -> CryptoResult<String> {
        let EncryptedToken::Rsa {
            ciphertext,
            mode: RsaMode::Oaep,
            oaep_digest,
            mgf1_digest,
        } = token
        else {
            return Err(CryptoError::Decryption(format!(
                "expected an RSA value, got {}",
                token.algorithm()
            )));
        };

        let private = private_key(key)?;
        let padding = oaep_padding(*oaep_digest, *mgf1_digest);

        let plaintext = private.decrypt(padding, ciphertext).map_err(|_| {
            CryptoError::Decryption("RSA-OAEP decryption failed (wrong key or tampered data)".to_string())
        })?;

        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::Decryption(format!("plaintext is not UTF-8: {e}")))
    }
}
