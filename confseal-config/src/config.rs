//! Key resolver configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the key file, relative to the working directory.
pub const DEFAULT_KEY_PATH: &str = "var/conf/encrypted-config-value.key";

/// Environment variable holding the encryption key (or the AES key).
pub const DEFAULT_ENCRYPTION_KEY_VAR: &str = "CONFIG_ENCRYPTION_KEY";

/// Environment variable holding the RSA private key.
pub const DEFAULT_DECRYPTION_KEY_VAR: &str = "CONFIG_DECRYPTION_KEY";

/// Where the key resolver looks for keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Key file used when the encryption-key variable is unset. An RSA
    /// private key is read from the same path with a `.private` suffix.
    pub key_path: PathBuf,

    /// Variable that selects the environment strategy when non-empty.
    pub encryption_key_var: String,

    /// Optional variable with the decryption half of an RSA pair.
    pub decryption_key_var: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            encryption_key_var: DEFAULT_ENCRYPTION_KEY_VAR.to_string(),
            decryption_key_var: DEFAULT_DECRYPTION_KEY_VAR.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn with_key_path(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.key_path = key_path.into();
        self
    }
}
