use anyhow::Result;
use clap::{Parser, Subcommand};
use confseal_config::ProcessEnv;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "confseal")]
#[command(about = "Encrypt secrets for configuration files and manage the keys")]
#[command(version)]
struct Cli {
    /// Debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a value and print the `enc:` token
    EncryptConfigValue(commands::EncryptValueArgs),
    /// Decrypt a single `enc:` token
    DecryptConfigValue(commands::DecryptValueArgs),
    /// Generate a key (or RSA key pair) and write it to a key file
    GenerateKey(commands::GenerateKeyArgs),
    /// Print a JSON config with every encrypted value decrypted
    DecryptConfig(commands::DecryptConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();

    match cli.command {
        Commands::EncryptConfigValue(args) => {
            let resolver = commands::resolver_for(&args.keyfile, ProcessEnv);
            commands::encrypt_value(&args, &resolver, &mut out)
        }
        Commands::DecryptConfigValue(args) => {
            let resolver = commands::resolver_for(&args.keyfile, ProcessEnv);
            commands::decrypt_value(&args, &resolver, &mut out)
        }
        Commands::GenerateKey(args) => commands::generate_key(&args, &mut out),
        Commands::DecryptConfig(args) => {
            let resolver = commands::resolver_for(&args.keyfile, ProcessEnv);
            commands::decrypt_config(&args, &resolver, &mut out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_config_value() {
        let cli = Cli::try_parse_from([
            "confseal",
            "encrypt-config-value",
            "-k",
            "my.key",
            "-v",
            "secret",
        ])
        .unwrap();

        match cli.command {
            Commands::EncryptConfigValue(args) => {
                assert_eq!(args.keyfile, PathBuf::from("my.key"));
                assert_eq!(args.value, "secret");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn encrypt_requires_value() {
        assert!(Cli::try_parse_from(["confseal", "encrypt-config-value"]).is_err());
    }

    #[test]
    fn generate_key_defaults() {
        let cli = Cli::try_parse_from(["confseal", "generate-key"]).unwrap();
        match cli.command {
            Commands::GenerateKey(args) => {
                assert_eq!(args.algorithm, commands::KeyAlgorithm::Aes);
                assert_eq!(
                    args.keyfile,
                    PathBuf::from("var/conf/encrypted-config-value.key")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn generate_key_rsa() {
        let cli = Cli::try_parse_from(["confseal", "generate-key", "--algorithm", "rsa"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::GenerateKey(commands::GenerateKeyArgs {
                algorithm: commands::KeyAlgorithm::Rsa,
                ..
            })
        ));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["confseal", "decrypt-config", "app.json", "--verbose"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::DecryptConfig(args) => {
                assert_eq!(args.file, PathBuf::from("app.json"));
                assert_eq!(
                    args.keyfile,
                    PathBuf::from("var/conf/encrypted-config-value.key")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
