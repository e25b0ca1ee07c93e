mod util;

use eckit::{EcCurve, HashKind, KeyPair, PrivateKey, PublicKey};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn openssl_available() -> bool {
    let available = Command::new("openssl")
        .arg("version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);
    if !available {
        eprintln!("openssl CLI not found, skipping");
    }
    available
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("eckit-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

/// OpenSSL accepts our signature and our public key PEM.
#[test]
fn test_openssl_verifies_our_signature() {
    if !openssl_available() {
        return;
    }
    util::init_tracing();

    for (curve, hash, flag) in [
        (EcCurve::Secp256r1, HashKind::Sha256, "-sha256"),
        (EcCurve::Secp384r1, HashKind::Sha384, "-sha384"),
    ] {
        let dir = scratch_dir(&format!("{curve:?}"));
        let pair = KeyPair::generate(curve);

        let data_path = dir.join("data.txt");
        let sig_path = dir.join("data.sig");
        let key_path = dir.join("public.pem");
        fs::write(&data_path, util::ALPHABET).unwrap();
        fs::write(&key_path, pair.public_key.to_pem().unwrap()).unwrap();

        let signature = pair
            .private_key
            .sign(hash, &hash.digest(util::ALPHABET))
            .unwrap();
        fs::write(&sig_path, signature.to_der()).unwrap();

        let output = Command::new("openssl")
            .arg("dgst")
            .arg(flag)
            .arg("-verify")
            .arg(&key_path)
            .arg("-signature")
            .arg(&sig_path)
            .arg(&data_path)
            .output()
            .expect("Failed to execute OpenSSL command");

        assert!(
            output.status.success(),
            "OpenSSL rejected the signature: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(String::from_utf8_lossy(&output.stdout).contains("Verified OK"));

        fs::remove_dir_all(&dir).expect("Failed to remove scratch directory");
    }
}

/// A private key we write can be used by OpenSSL to sign, and we verify the
/// result.
#[test]
fn test_openssl_signs_with_our_private_key() {
    if !openssl_available() {
        return;
    }

    let dir = scratch_dir("private");
    let pair = KeyPair::generate(EcCurve::Secp256r1);

    let data_path = dir.join("data.txt");
    let sig_path = dir.join("data.sig");
    let key_path = dir.join("private.pem");
    fs::write(&data_path, util::ALPHABET).unwrap();
    fs::write(&key_path, pair.private_key.to_pem().unwrap()).unwrap();

    let output = Command::new("openssl")
        .arg("dgst")
        .arg("-sha256")
        .arg("-sign")
        .arg(&key_path)
        .arg("-out")
        .arg(&sig_path)
        .arg(&data_path)
        .output()
        .expect("Failed to execute OpenSSL command");
    assert!(
        output.status.success(),
        "OpenSSL could not sign: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let signature = fs::read(&sig_path).unwrap();
    pair.public_key
        .verify(HashKind::Sha256, &util::alphabet_hash(), &signature)
        .unwrap();

    fs::remove_dir_all(&dir).expect("Failed to remove scratch directory");
}

/// PKCS#8 keys written by OpenSSL load and match the SEC1 original.
#[test]
fn test_openssl_pkcs8_private_key() {
    if !openssl_available() {
        return;
    }

    let dir = scratch_dir("pkcs8");
    let sec1_path = dir.join("sec1.pem");
    let pkcs8_path = dir.join("pkcs8.pem");
    fs::write(&sec1_path, util::ROOT_KEY_PEM).unwrap();

    let output = Command::new("openssl")
        .arg("pkcs8")
        .arg("-topk8")
        .arg("-nocrypt")
        .arg("-in")
        .arg(&sec1_path)
        .arg("-out")
        .arg(&pkcs8_path)
        .output()
        .expect("Failed to execute OpenSSL command");
    assert!(
        output.status.success(),
        "OpenSSL could not convert the key: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pkcs8 = fs::read(&pkcs8_path).unwrap();
    let key = PrivateKey::from_pem(&pkcs8).unwrap();
    let expected = PublicKey::from_pem(util::ROOT_PUBLIC_KEY_PEM.as_bytes()).unwrap();
    assert_eq!(key.public_key(), expected);
    assert_eq!(key.to_pem().unwrap(), util::ROOT_KEY_PEM);

    fs::remove_dir_all(&dir).expect("Failed to remove scratch directory");
}
