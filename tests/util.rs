#![allow(dead_code)]

use eckit::HashKind;

pub const ROOT_KEY_PEM: &str = include_str!("data/Rootec.key.pem");
pub const ROOT_PUBLIC_KEY_PEM: &str = include_str!("data/Rootec.public.key");
pub const ROOT_CERT_PEM: &str = include_str!("data/Rootec.crt.pem");
pub const INTERMEDIATE_CERT_PEM: &str = include_str!("data/Intermediateec.crt.pem");
pub const LEAF_CERT_PEM: &str = include_str!("data/Leafec.crt.pem");
pub const CERT_WITH_EXTENSIONS_PEM: &str = include_str!("data/ec_cert_with_ext.pem");

/// Leaf first, root last.
pub const CHAIN_PEM: &str = concat!(
    include_str!("data/Leafec.crt.pem"),
    include_str!("data/Intermediateec.crt.pem"),
    include_str!("data/Rootec.crt.pem"),
);

/// SHA-256 signature over [`ALPHABET`] made with `openssl dgst -sign` and
/// the root key.
pub const ROOT_SIGNATURE: &[u8] = include_bytes!("data/test_ec_signature");

pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub const ROOT_X: [u8; 32] = [
    0xe6, 0x91, 0xb9, 0xdd, 0x58, 0xad, 0xa4, 0x8a, 0x22, 0x27, 0xb7, 0xe8, 0x53, 0xee, 0x9f, 0x0f,
    0x3e, 0xd3, 0xaf, 0x94, 0x28, 0x27, 0xb7, 0x94, 0x71, 0xd2, 0xc8, 0x6f, 0x38, 0x06, 0x73, 0xf4,
];

pub const ROOT_Y: [u8; 32] = [
    0x0a, 0xd7, 0x7b, 0x23, 0x65, 0xb2, 0x19, 0x13, 0x03, 0xc2, 0x0d, 0x96, 0xaa, 0x98, 0x1c, 0x2e,
    0xcb, 0xcf, 0x77, 0x4b, 0x16, 0xfe, 0x7a, 0xfb, 0x1e, 0xd8, 0xb3, 0xb9, 0xd3, 0x8f, 0x9f, 0xbb,
];

pub const INTEL_CRL_URL: &str =
    "https://certificates.trustedservices.intel.com/IntelSGXPCKProcessor.crl";

/// `(oid, critical, value)` of every extension in [`CERT_WITH_EXTENSIONS_PEM`],
/// in encoding order.
pub fn expected_extensions() -> Vec<(&'static str, bool, Vec<u8>)> {
    let mut crl = vec![0x30, 0x4f, 0x30, 0x4d, 0xa0, 0x4b, 0xa0, 0x49, 0x86, 0x47];
    crl.extend_from_slice(INTEL_CRL_URL.as_bytes());

    vec![
        (
            "2.5.29.14",
            false,
            vec![
                0x04, 0x14, 0x1c, 0x81, 0xd1, 0x8f, 0x3b, 0x11, 0x05, 0x88, 0x75, 0x5d, 0xa1, 0xa0,
                0xcc, 0xa3, 0x81, 0xa4, 0x8b, 0xdf, 0xfb, 0x4f,
            ],
        ),
        ("2.5.29.31", false, crl),
        (
            "2.5.29.35",
            false,
            vec![
                0x30, 0x16, 0x80, 0x14, 0x22, 0x99, 0x60, 0xf1, 0xfe, 0x67, 0x74, 0xff, 0x4e, 0xa5,
                0xc1, 0xec, 0xbf, 0xc3, 0x5e, 0x8a, 0x6d, 0x4b, 0x52, 0xed,
            ],
        ),
        ("2.5.29.15", true, vec![0x03, 0x02, 0x06, 0xc0]),
        ("2.5.29.19", true, vec![0x30, 0x00]),
        (
            "1.2.840.113741.1.13.1",
            false,
            vec![
                0x30, 0x31, 0x30, 0x1e, 0x06, 0x0a, 0x2a, 0x86, 0x48, 0x86, 0xf8, 0x4d, 0x01, 0x0d,
                0x01, 0x01, 0x04, 0x10, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, 0x00, 0x11, 0x22, 0x33,
                0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0x30, 0x0f, 0x06, 0x0a, 0x2a, 0x86, 0x48, 0x86,
                0xf8, 0x4d, 0x01, 0x0d, 0x01, 0x05, 0x0a, 0x01, 0x00,
            ],
        ),
    ]
}

pub fn alphabet_hash() -> Vec<u8> {
    HashKind::Sha256.digest(ALPHABET)
}

/// Appends the NUL terminator C-style callers pass along with PEM text.
pub fn with_nul(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
