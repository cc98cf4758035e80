//! Shared keys and resolvers for integration tests.

#![allow(dead_code)]

use confseal_config::{KeyResolver, MapEnv, ResolverConfig};
use confseal_crypto::{Algorithm, KeyPair};
use std::path::Path;
use std::sync::LazyLock;

pub const AES_KEY: &str = "AES:vgwWG0UUo39Hhfru2dD7Nw==";

/// `"value"` encrypted under [`AES_KEY`].
pub const AES_TOKEN: &str =
    "enc:INNv4cGkVF45MLWZhgVZdIsgQ4zKvbMoJ978Es3MIKgrtz5eeTuOCLM1vPbQm97ejz2EK6M=";

pub const ENCRYPTION_VAR: &str = "CONFIG_ENCRYPTION_KEY";
pub const DECRYPTION_VAR: &str = "CONFIG_DECRYPTION_KEY";

/// Generated once per test binary.
pub static RSA_PAIR: LazyLock<KeyPair> =
    LazyLock::new(|| Algorithm::Rsa.generate_key_pair().unwrap());

/// Resolver reading [`AES_KEY`] from the environment.
pub fn aes_env_resolver() -> KeyResolver {
    KeyResolver::new(
        ResolverConfig::default(),
        MapEnv::new().with(ENCRYPTION_VAR, AES_KEY),
    )
}

/// Resolver reading the RSA pair from the environment.
pub fn rsa_env_resolver() -> KeyResolver {
    KeyResolver::new(
        ResolverConfig::default(),
        MapEnv::new()
            .with(ENCRYPTION_VAR, RSA_PAIR.encryption_key().serialize())
            .with(DECRYPTION_VAR, RSA_PAIR.decryption_key().serialize()),
    )
}

/// Resolver with an empty environment and the given key file.
pub fn file_resolver(key_path: &Path) -> KeyResolver {
    KeyResolver::new(ResolverConfig::default().with_key_path(key_path), MapEnv::new())
}
