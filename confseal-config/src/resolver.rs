//! Key resolution.
//!
//! Keys come from one of two places, chosen per call:
//! - the environment, when the encryption-key variable is set and non-empty
//! - otherwise the key file at [`ResolverConfig::key_path`]

use crate::config::ResolverConfig;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::{ResolveError, ResolveResult};
use crate::key_file;
use confseal_crypto::{encrypt_with_key, EncryptedToken, KeyPair, KeyWithType};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Where keys are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyStrategy {
    Environment,
    File(PathBuf),
}

/// Resolves key pairs and decrypts single values.
///
/// Immutable and cheap to clone; independent documents may share one.
#[derive(Clone, Debug)]
pub struct KeyResolver {
    config: ResolverConfig,
    env: Arc<dyn EnvSource>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default(), ProcessEnv)
    }
}

impl KeyResolver {
    pub fn new(config: ResolverConfig, env: impl EnvSource + 'static) -> Self {
        Self {
            config,
            env: Arc::new(env),
        }
    }

    /// A resolver backed by the real process environment.
    pub fn from_process_env(config: ResolverConfig) -> Self {
        Self::new(config, ProcessEnv)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn strategy(&self) -> KeyStrategy {
        if self
            .env
            .non_empty_var(&self.config.encryption_key_var)
            .is_some()
        {
            KeyStrategy::Environment
        } else {
            KeyStrategy::File(self.config.key_path.clone())
        }
    }

    /// Resolves the full key pair with the current strategy.
    pub fn resolve(&self) -> ResolveResult<KeyPair> {
        let strategy = self.strategy();
        debug!(?strategy, "resolving key pair");

        match strategy {
            KeyStrategy::Environment => self.resolve_from_env(),
            KeyStrategy::File(path) => key_file::read_key_pair(&path),
        }
    }

    /// Builds the key pair from the configured environment variables.
    ///
    /// With only the encryption variable set the key must be AES.
    pub fn resolve_from_env(&self) -> ResolveResult<KeyPair> {
        let encryption_var = &self.config.encryption_key_var;
        let encryption_text = self
            .env
            .non_empty_var(encryption_var)
            .ok_or_else(|| ResolveError::MissingKey(encryption_var.clone()))?;
        let encryption_key = KeyWithType::parse(&encryption_text)?;

        let pair = match self.env.non_empty_var(&self.config.decryption_key_var) {
            Some(decryption_text) => {
                KeyPair::of(encryption_key, KeyWithType::parse(&decryption_text)?)?
            }
            None => KeyPair::symmetric(encryption_key)?,
        };

        debug!(
            env_var = %encryption_var,
            symmetric = pair.is_symmetric(),
            "resolved key pair from environment"
        );
        Ok(pair)
    }

    /// Resolves only the encryption half.
    ///
    /// With the file strategy the `.private` file is never read, so an
    /// operator holding just the public key can still encrypt.
    pub fn encryption_key(&self) -> ResolveResult<KeyWithType> {
        match self.strategy() {
            KeyStrategy::Environment => {
                Ok(self.resolve_from_env()?.encryption_key().clone())
            }
            KeyStrategy::File(path) => key_file::read_key(&path),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> ResolveResult<EncryptedToken> {
        let key = self.encryption_key()?;
        Ok(encrypt_with_key(&key, plaintext)?)
    }

    pub fn decrypt(&self, token: &EncryptedToken) -> ResolveResult<String> {
        let pair = self.resolve()?;
        Ok(token.decrypt(pair.decryption_key())?)
    }

    /// Parses `text` as a token and decrypts it.
    pub fn decrypt_str(&self, text: &str) -> ResolveResult<String> {
        let token: EncryptedToken = text.parse()?;
        self.decrypt(&token)
    }
}
