mod support;

use confseal_config::key_file::{private_key_path, read_key, read_key_pair, write_key_pair};
use confseal_config::ResolveError;
use confseal_crypto::{Algorithm, CryptoError, KeyType};
use std::fs;
use support::*;

#[test]
fn aes_pair_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aes.key");
    let pair = Algorithm::Aes.generate_key_pair().unwrap();

    write_key_pair(&pair, &path).unwrap();

    assert_eq!(read_key_pair(&path).unwrap(), pair);
    assert!(!private_key_path(&path).exists());
}

#[test]
fn rsa_pair_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.key");

    write_key_pair(&RSA_PAIR, &path).unwrap();

    assert_eq!(read_key(&path).unwrap().key_type(), KeyType::RsaPublic);
    assert_eq!(
        read_key(&private_key_path(&path)).unwrap().key_type(),
        KeyType::RsaPrivate
    );
    assert_eq!(read_key_pair(&path).unwrap(), *RSA_PAIR);
}

#[test]
fn file_holds_key_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aes.key");
    let pair = Algorithm::Aes.generate_key_pair().unwrap();

    write_key_pair(&pair, &path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        pair.encryption_key().serialize()
    );
}

#[test]
fn creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("var").join("conf").join("encrypted-config-value.key");
    let pair = Algorithm::Aes.generate_key_pair().unwrap();

    write_key_pair(&pair, &path).unwrap();
    assert!(path.exists());
}

#[cfg(unix)]
#[test]
fn key_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.key");
    write_key_pair(&RSA_PAIR, &path).unwrap();

    for file in [path.clone(), private_key_path(&path)] {
        let mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "{} has mode {mode:o}", file.display());
    }
}

#[test]
fn missing_private_half() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.key");
    fs::write(&path, RSA_PAIR.encryption_key().serialize()).unwrap();

    let err = read_key_pair(&path).unwrap_err();
    assert!(matches!(err, ResolveError::KeyFileNotFound(p) if p == private_key_path(&path)));
}

#[test]
fn mismatched_private_half() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.key");
    fs::write(&path, RSA_PAIR.encryption_key().serialize()).unwrap();
    fs::write(private_key_path(&path), AES_KEY).unwrap();

    let err = read_key_pair(&path).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Crypto(CryptoError::IncompatibleKeyTypes {
            encryption: KeyType::RsaPublic,
            decryption: KeyType::Aes,
        })
    ));
}
