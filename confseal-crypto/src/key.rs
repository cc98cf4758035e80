//! Typed key material and key pairs.
//!
//! Keys travel as text in environment variables and key files, so every key
//! carries its type: `AES:<base64>`, `RSA-PUB:<base64>` or `RSA-PRIV:<base64>`.
//! RSA public keys are DER `SubjectPublicKeyInfo`, RSA private keys are DER
//! PKCS#8.

use crate::algorithm::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Separator between the type tag and the base64 material.
const TYPE_SEPARATOR: char = ':';

/// The kind of key material held by a [`KeyWithType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Aes,
    RsaPublic,
    RsaPrivate,
}

impl KeyType {
    /// Text tag used in the serialized key form.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Aes => "AES",
            Self::RsaPublic => "RSA-PUB",
            Self::RsaPrivate => "RSA-PRIV",
        }
    }

    /// The algorithm family this key belongs to.
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Aes => Algorithm::Aes,
            Self::RsaPublic | Self::RsaPrivate => Algorithm::Rsa,
        }
    }

    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::Aes)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for KeyType {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s {
            "AES" => Ok(Self::Aes),
            "RSA-PUB" => Ok(Self::RsaPublic),
            "RSA-PRIV" => Ok(Self::RsaPrivate),
            other => Err(CryptoError::MalformedKey(format!(
                "unknown key type '{other}'"
            ))),
        }
    }
}

/// Raw key material tagged with its [`KeyType`].
///
/// The material is zeroized on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyWithType {
    #[zeroize(skip)]
    key_type: KeyType,
    material: Vec<u8>,
}

impl KeyWithType {
    pub fn new(key_type: KeyType, material: Vec<u8>) -> Self {
        Self { key_type, material }
    }

    /// Parses the canonical `<TYPE>:<base64>` form.
    pub fn parse(text: &str) -> CryptoResult<Self> {
        let text = text.trim();
        let (tag, encoded) = text.split_once(TYPE_SEPARATOR).ok_or_else(|| {
            CryptoError::MalformedKey("expected '<TYPE>:<base64 key material>'".to_string())
        })?;

        let key_type: KeyType = tag.parse()?;
        if encoded.is_empty() {
            return Err(CryptoError::MalformedKey(format!(
                "{key_type} key has no material"
            )));
        }

        let material = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedKey(format!("invalid base64: {e}")))?;

        Ok(Self { key_type, material })
    }

    /// Canonical `<TYPE>:<base64>` form.
    pub fn serialize(&self) -> String {
        format!(
            "{}{TYPE_SEPARATOR}{}",
            self.key_type,
            STANDARD.encode(&self.material)
        )
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn material(&self) -> &[u8] {
        &self.material
    }

    /// Fails with [`CryptoError::WrongKeyType`] unless this key is of `expected` type.
    pub fn expect_type(&self, expected: KeyType) -> CryptoResult<()> {
        if self.key_type == expected {
            Ok(())
        } else {
            Err(CryptoError::WrongKeyType {
                expected,
                actual: self.key_type,
            })
        }
    }
}

impl fmt::Debug for KeyWithType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyWithType")
            .field("key_type", &self.key_type)
            .field("material", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for KeyWithType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for KeyWithType {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        Self::parse(s)
    }
}

/// An encryption half and a decryption half.
///
/// For AES both halves are the same key. For RSA the encryption half is the
/// public key and the decryption half the matching private key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    encryption_key: KeyWithType,
    decryption_key: KeyWithType,
}

impl KeyPair {
    /// Uses a single AES key for both directions.
    pub fn symmetric(key: KeyWithType) -> CryptoResult<Self> {
        if !key.key_type().is_symmetric() {
            return Err(CryptoError::IncompatibleKeyTypes {
                encryption: key.key_type(),
                decryption: key.key_type(),
            });
        }

        Ok(Self {
            decryption_key: key.clone(),
            encryption_key: key,
        })
    }

    /// Pairs an encryption key with a decryption key of the same family.
    pub fn of(encryption_key: KeyWithType, decryption_key: KeyWithType) -> CryptoResult<Self> {
        match (encryption_key.key_type(), decryption_key.key_type()) {
            (KeyType::Aes, KeyType::Aes) if encryption_key == decryption_key => {
                Self::symmetric(encryption_key)
            }
            (KeyType::RsaPublic, KeyType::RsaPrivate) => Ok(Self {
                encryption_key,
                decryption_key,
            }),
            (encryption, decryption) => Err(CryptoError::IncompatibleKeyTypes {
                encryption,
                decryption,
            }),
        }
    }

    pub fn encryption_key(&self) -> &KeyWithType {
        &self.encryption_key
    }

    pub fn decryption_key(&self) -> &KeyWithType {
        &self.decryption_key
    }

    pub fn is_symmetric(&self) -> bool {
        self.encryption_key.key_type().is_symmetric()
    }
}
