//! # EcKit - Elliptic Curve Keys, Signatures and Certificates
//!
//! EcKit is a small EC cryptography toolkit built entirely with rustcrypto libraries.
//! It loads and writes EC keys in PEM, signs and verifies message digests with ECDSA,
//! and reads X.509 certificates and certificate chains far enough to get at their
//! public keys and extensions.
//!
//! ## Supported Curves
//!
//! - **secp256r1** (P-256)
//! - **secp384r1** (P-384)
//!
//! Digests are SHA-256, SHA-384 or SHA-512 and are always computed by the caller.
//!
//! ## Supported Formats
//!
//! - **Private keys**: PEM `EC PRIVATE KEY` (SEC1) or `PRIVATE KEY` (PKCS#8) in, SEC1 out
//! - **Public keys**: PEM `PUBLIC KEY` (SubjectPublicKeyInfo), or affine coordinates
//! - **Signatures**: DER `ECDSA-Sig-Value`
//! - **Certificates**: PEM `CERTIFICATE`, one or several concatenated
//!
//! PEM input may carry trailing NUL bytes; they are ignored.
//!
//! ## Quick Start
//!
//! ### Signing and Verifying
//!
//! ```rust
//! use eckit::{EcCurve, HashKind, KeyPair};
//!
//! # fn main() -> Result<(), eckit::EcKitError> {
//! let pair = KeyPair::generate(EcCurve::Secp256r1);
//! let digest = HashKind::Sha256.digest(b"abcdefghijklmnopqrstuvwxyz");
//!
//! let signature = pair.private_key.sign(HashKind::Sha256, &digest)?;
//! pair.public_key
//!     .verify(HashKind::Sha256, &digest, &signature.to_der())?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Two-Pass Output
//!
//! Operations that produce bytes come in pairs: a size query returning
//! [`RequiredSize`], and a writer filling a caller buffer that fails with
//! [`EcKitError::BufferTooSmall`] when the buffer is short.
//!
//! ```rust
//! use eckit::{EcCurve, KeyPair};
//!
//! # fn main() -> Result<(), eckit::EcKitError> {
//! let pair = KeyPair::generate(EcCurve::Secp384r1);
//!
//! let mut buffer = pair.public_key.pem_size()?.alloc();
//! let written = pair.public_key.write_pem(&mut buffer)?;
//! assert_eq!(written, buffer.len());
//! assert_eq!(buffer.last(), Some(&0));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading Certificate Extensions
//!
//! ```rust,no_run
//! use eckit::CertificateChain;
//!
//! # fn main() -> Result<(), eckit::EcKitError> {
//! let pem = std::fs::read("chain.pem").unwrap();
//! let chain = CertificateChain::from_pem(&pem)?;
//!
//! let leaf = chain.get(0)?;
//! for url in leaf.crl_distribution_points()? {
//!     println!("CRL: {url}");
//! }
//! let key_identifier = leaf.find_extension("2.5.29.14")?;
//! println!("SKID: {key_identifier:02x?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, EcKitError>`](error::Result).
//! Signature checks report every failure, malformed input included, as
//! [`EcKitError::VerificationFailed`].
//!
//! ## Module Overview
//!
//! - [`key`]: EC key pairs, PEM import and export, signing and verification
//! - [`signature`]: ECDSA signature values and their DER codec
//! - [`cert`]: X.509 certificates, chains and extension decoding
//! - [`curve`]: Curve and hash selectors
//! - [`asn1`]: Minimal DER reader and writer helpers
//! - [`sizing`]: Size queries for the two-pass output operations
//! - [`error`]: Error types and handling

pub mod asn1;
pub mod cert;
pub mod curve;
pub mod error;
pub mod key;
mod pem_utils;
pub mod signature;
pub mod sizing;

pub use cert::{Certificate, Extension, chain::CertificateChain};
pub use curve::{EcCurve, HashKind};
pub use error::EcKitError;
pub use key::{KeyPair, PrivateKey, PublicKey, valid_raw_private_key};
pub use signature::EcdsaSignature;
pub use sizing::RequiredSize;
