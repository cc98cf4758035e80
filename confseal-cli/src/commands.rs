use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use confseal_config::config::DEFAULT_KEY_PATH;
use confseal_config::key_file::{private_key_path, write_key_pair};
use confseal_config::{load_json_file, EnvSource, KeyResolver, ResolverConfig};
use confseal_crypto::Algorithm;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct EncryptValueArgs {
    /// Key file, used when CONFIG_ENCRYPTION_KEY is unset
    #[arg(short, long = "keyfile", default_value = DEFAULT_KEY_PATH)]
    pub keyfile: PathBuf,

    /// Plaintext to encrypt
    #[arg(short, long)]
    pub value: String,
}

#[derive(Args, Debug)]
pub struct DecryptValueArgs {
    /// Key file, used when CONFIG_ENCRYPTION_KEY is unset
    #[arg(short, long = "keyfile", default_value = DEFAULT_KEY_PATH)]
    pub keyfile: PathBuf,

    /// Encrypted value, `enc:...`
    #[arg(short, long)]
    pub value: String,
}

#[derive(Args, Debug)]
pub struct GenerateKeyArgs {
    /// Key algorithm
    #[arg(short, long, value_enum, default_value_t = KeyAlgorithm::Aes)]
    pub algorithm: KeyAlgorithm,

    /// Where to write the key; RSA private keys go to `<keyfile>.private`
    #[arg(short, long = "keyfile", default_value = DEFAULT_KEY_PATH)]
    pub keyfile: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecryptConfigArgs {
    /// Key file, used when CONFIG_ENCRYPTION_KEY is unset
    #[arg(short, long = "keyfile", default_value = DEFAULT_KEY_PATH)]
    pub keyfile: PathBuf,

    /// JSON document to decrypt
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyAlgorithm {
    Aes,
    Rsa,
}

impl From<KeyAlgorithm> for Algorithm {
    fn from(algorithm: KeyAlgorithm) -> Self {
        match algorithm {
            KeyAlgorithm::Aes => Algorithm::Aes,
            KeyAlgorithm::Rsa => Algorithm::Rsa,
        }
    }
}

/// Environment keys still take precedence over `keyfile`.
pub fn resolver_for(keyfile: &Path, env: impl EnvSource + 'static) -> KeyResolver {
    KeyResolver::new(ResolverConfig::default().with_key_path(keyfile), env)
}

pub fn encrypt_value(
    args: &EncryptValueArgs,
    resolver: &KeyResolver,
    out: &mut impl Write,
) -> Result<()> {
    let token = resolver
        .encrypt(&args.value)
        .context("failed to encrypt value")?;
    writeln!(out, "{token}")?;
    Ok(())
}

pub fn decrypt_value(
    args: &DecryptValueArgs,
    resolver: &KeyResolver,
    out: &mut impl Write,
) -> Result<()> {
    let plaintext = resolver
        .decrypt_str(args.value.trim())
        .context("failed to decrypt value")?;
    writeln!(out, "{plaintext}")?;
    Ok(())
}

pub fn generate_key(args: &GenerateKeyArgs, out: &mut impl Write) -> Result<()> {
    let algorithm = Algorithm::from(args.algorithm);
    let pair = algorithm
        .generate_key_pair()
        .with_context(|| format!("failed to generate {algorithm} key"))?;

    write_key_pair(&pair, &args.keyfile)
        .with_context(|| format!("failed to write key to {}", args.keyfile.display()))?;
    info!(%algorithm, path = %args.keyfile.display(), "generated key");

    writeln!(out, "Wrote {algorithm} key to {}", args.keyfile.display())?;
    if !pair.is_symmetric() {
        writeln!(
            out,
            "Wrote private key to {}",
            private_key_path(&args.keyfile).display()
        )?;
    }
    Ok(())
}

/// Prints the document with every encrypted value replaced.
pub fn decrypt_config(
    args: &DecryptConfigArgs,
    resolver: &KeyResolver,
    out: &mut impl Write,
) -> Result<()> {
    let value = load_json_file(&args.file, resolver)?;
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
