//! Text codec for encrypted configuration values.
//!
//! Every token starts with `enc:` followed by standard base64:
//!
//! - AES tokens encode `iv ‖ ciphertext` (the ciphertext carries the GCM tag).
//! - RSA tokens encode a compact JSON envelope holding the ciphertext and the
//!   OAEP parameters used to produce it, so a token stays decryptable when the
//!   encrypter defaults change.
//!
//! Recognition is purely syntactic. No key is needed to tell whether a string
//! is a token.

use crate::algorithm::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal prefix shared by every token.
pub const TOKEN_PREFIX: &str = "enc:";

/// Length of the random AES-GCM initialization vector, in bytes.
pub const AES_IV_SIZE: usize = 32;

/// Length of the AES-GCM authentication tag, in bytes.
pub const AES_TAG_SIZE: usize = 16;

/// Digest identifiers recorded in RSA tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        })
    }
}

/// RSA padding modes. Only OAEP is produced or accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsaMode {
    #[default]
    #[serde(rename = "OAEP")]
    Oaep,
}

/// A parsed encrypted configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncryptedToken {
    Aes {
        iv: [u8; AES_IV_SIZE],
        /// Ciphertext followed by the GCM tag.
        ciphertext: Vec<u8>,
    },
    Rsa {
        ciphertext: Vec<u8>,
        mode: RsaMode,
        oaep_digest: DigestAlgorithm,
        mgf1_digest: DigestAlgorithm,
    },
}

/// Wire form of an RSA token before base64 wrapping.
///
/// Field names and order are part of the token format.
#[derive(Serialize, Deserialize)]
struct RsaEnvelope {
    ciphertext: String,
    mode: RsaMode,
    #[serde(rename = "type")]
    algorithm: Algorithm,
    #[serde(rename = "mdf1-alg")]
    mgf1_digest: DigestAlgorithm,
    #[serde(rename = "oaep-alg")]
    oaep_digest: DigestAlgorithm,
}

impl EncryptedToken {
    /// The algorithm that produced this token.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Aes { .. } => Algorithm::Aes,
            Self::Rsa { .. } => Algorithm::Rsa,
        }
    }

    /// Encodes the token as `enc:<base64>`.
    pub fn encode(&self) -> String {
        let payload = match self {
            Self::Aes { iv, ciphertext } => {
                let mut bytes = Vec::with_capacity(iv.len() + ciphertext.len());
                bytes.extend_from_slice(iv);
                bytes.extend_from_slice(ciphertext);
                bytes
            }
            Self::Rsa {
                ciphertext,
                mode,
                oaep_digest,
                mgf1_digest,
            } => {
                let envelope = RsaEnvelope {
                    ciphertext: STANDARD.encode(ciphertext),
                    mode: *mode,
                    algorithm: Algorithm::Rsa,
                    mgf1_digest: *mgf1_digest,
                    oaep_digest: *oaep_digest,
                };
                // Plain strings and unit enums only, serialization cannot fail.
                serde_json::to_vec(&envelope).unwrap_or_default()
            }
        };

        format!("{TOKEN_PREFIX}{}", STANDARD.encode(payload))
    }

    /// Decodes `enc:<base64>` text.
    pub fn decode(text: &str) -> CryptoResult<Self> {
        let encoded = text.strip_prefix(TOKEN_PREFIX).ok_or_else(|| {
            CryptoError::MalformedToken(format!("missing '{TOKEN_PREFIX}' prefix"))
        })?;

        let payload = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedToken(format!("invalid base64: {e}")))?;

        // A JSON object payload is always an RSA envelope; random IV bytes never
        // form one.
        if let Ok(value @ serde_json::Value::Object(_)) =
            serde_json::from_slice::<serde_json::Value>(&payload)
        {
            let envelope: RsaEnvelope = serde_json::from_value(value).map_err(|e| {
                CryptoError::MalformedToken(format!("invalid RSA envelope: {e}"))
            })?;
            return Self::from_envelope(envelope);
        }

        Self::from_aes_payload(&payload)
    }

    fn from_envelope(envelope: RsaEnvelope) -> CryptoResult<Self> {
        if envelope.algorithm != Algorithm::Rsa {
            return Err(CryptoError::MalformedToken(format!(
                "unsupported envelope algorithm {}",
                envelope.algorithm
            )));
        }

        let ciphertext = STANDARD.decode(&envelope.ciphertext).map_err(|e| {
            CryptoError::MalformedToken(format!("invalid base64 ciphertext: {e}"))
        })?;

        Ok(Self::Rsa {
            ciphertext,
            mode: envelope.mode,
            oaep_digest: envelope.oaep_digest,
            mgf1_digest: envelope.mgf1_digest,
        })
    }

    fn from_aes_payload(payload: &[u8]) -> CryptoResult<Self> {
        if payload.len() < AES_IV_SIZE + AES_TAG_SIZE {
            return Err(CryptoError::MalformedToken(format!(
                "payload too short: {} bytes, expected at least {}",
                payload.len(),
                AES_IV_SIZE + AES_TAG_SIZE
            )));
        }

        let (iv_bytes, ciphertext) = payload.split_at(AES_IV_SIZE);
        let mut iv = [0u8; AES_IV_SIZE];
        iv.copy_from_slice(iv_bytes);

        Ok(Self::Aes {
            iv,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

impl fmt::Display for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for EncryptedToken {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        Self::decode(s)
    }
}

/// Returns `true` if `text` carries the token prefix, without validating the payload.
pub fn has_token_prefix(text: &str) -> bool {
    text.starts_with(TOKEN_PREFIX)
}

/// Returns `true` if `text` is a syntactically valid token.
pub fn is_encrypted_token(text: &str) -> bool {
    has_token_prefix(text) && EncryptedToken::decode(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AES_TOKEN: &str =
        "enc:INNv4cGkVF45MLWZhgVZdIsgQ4zKvbMoJ978Es3MIKgrtz5eeTuOCLM1vPbQm97ejz2EK6M=";

    fn rsa_token() -> EncryptedToken {
        EncryptedToken::Rsa {
            ciphertext: vec![7u8; 256],
            mode: RsaMode::Oaep,
            oaep_digest: DigestAlgorithm::Sha256,
            mgf1_digest: DigestAlgorithm::Sha512,
        }
    }

    #[test]
    fn decodes_aes_token() {
        let token = EncryptedToken::decode(AES_TOKEN).unwrap();
        match &token {
            EncryptedToken::Aes { ciphertext, .. } => {
                // "value" plus the 16-byte tag
                assert_eq!(ciphertext.len(), 5 + AES_TAG_SIZE);
            }
            other => panic!("expected AES token, got {other:?}"),
        }
        assert_eq!(token.algorithm(), Algorithm::Aes);
        assert_eq!(token.encode(), AES_TOKEN);
    }

    #[test]
    fn rsa_envelope_layout() {
        let encoded = rsa_token().encode();
        let payload = STANDARD
            .decode(encoded.strip_prefix(TOKEN_PREFIX).unwrap())
            .unwrap();
        let json = String::from_utf8(payload).unwrap();

        assert!(json.starts_with(r#"{"ciphertext":""#));
        assert!(json.ends_with(
            r#""mode":"OAEP","type":"RSA","mdf1-alg":"SHA-512","oaep-alg":"SHA-256"}"#
        ));
    }

    #[test]
    fn rsa_token_round_trips() {
        let token = rsa_token();
        assert_eq!(token.to_string().parse::<EncryptedToken>().unwrap(), token);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(
            EncryptedToken::decode("INNv4cGkVF45"),
            Err(CryptoError::MalformedToken(_))
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            EncryptedToken::decode("enc:invalid-contents"),
            Err(CryptoError::MalformedToken(_))
        ));
    }

    #[test]
    fn rejects_short_aes_payload() {
        let short = format!("{TOKEN_PREFIX}{}", STANDARD.encode([0u8; 40]));
        assert!(matches!(
            EncryptedToken::decode(&short),
            Err(CryptoError::MalformedToken(msg)) if msg.contains("too short")
        ));
    }

    #[test]
    fn rejects_unknown_digest() {
        let json = r#"{"ciphertext":"AAAA","mode":"OAEP","type":"RSA","mdf1-alg":"MD5","oaep-alg":"SHA-256"}"#;
        let text = format!("{TOKEN_PREFIX}{}", STANDARD.encode(json));
        assert!(matches!(
            EncryptedToken::decode(&text),
            Err(CryptoError::MalformedToken(msg)) if msg.contains("RSA envelope")
        ));
    }

    #[test]
    fn rejects_aes_envelope() {
        let json = r#"{"ciphertext":"AAAA","mode":"OAEP","type":"AES","mdf1-alg":"SHA-256","oaep-alg":"SHA-256"}"#;
        let text = format!("{TOKEN_PREFIX}{}", STANDARD.encode(json));
        assert!(matches!(
            EncryptedToken::decode(&text),
            Err(CryptoError::MalformedToken(msg)) if msg.contains("unsupported")
        ));
    }

    #[test]
    fn recognition_is_shape_only() {
        assert!(is_encrypted_token(AES_TOKEN));
        assert!(is_encrypted_token(&rsa_token().encode()));
        assert!(!is_encrypted_token("enc:ERROR"));
        assert!(!is_encrypted_token("abc"));
        assert!(!is_encrypted_token(""));
        assert!(!is_encrypted_token("ENC:INNv4cGkVF45"));
        assert!(has_token_prefix("enc:ERROR"));
    }
}
