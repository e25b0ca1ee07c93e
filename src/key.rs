use der::Encode;
use ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::zeroize::Zeroizing;
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rand_core::OsRng;

use crate::curve::{EcCurve, HashKind};
use crate::error::{EcKitError, Result};
use crate::pem_utils::{self, LABEL_EC_PRIVATE_KEY, LABEL_PRIVATE_KEY, LABEL_PUBLIC_KEY};
use crate::signature::EcdsaSignature;
use crate::sizing::{RequiredSize, copy_into, copy_with_nul_into};

/// An EC private key.
///
/// The scalar is zeroised when the key is dropped.
#[derive(Clone)]
pub enum PrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
}

/// An EC public key. Two keys are equal iff their curves and coordinates are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
}

/// A private key together with its public key.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

/// Returns `true` iff `scalar` is a usable private key on `curve`, that is
/// `1 <= scalar <= order - 1`. No key is created.
pub fn valid_raw_private_key(curve: EcCurve, scalar: &[u8]) -> bool {
    curve.is_valid_private_scalar(scalar)
}

impl KeyPair {
    /// Generate a key pair from the operating system's random source.
    pub fn generate(curve: EcCurve) -> Self {
        let mut rng = OsRng;
        let private_key = match curve {
            EcCurve::Secp256r1 => PrivateKey::P256(p256::SecretKey::random(&mut rng)),
            EcCurve::Secp384r1 => PrivateKey::P384(p384::SecretKey::random(&mut rng)),
        };
        let public_key = private_key.public_key();
        tracing::trace!(?curve, "generated key pair");
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Derive a key pair from a big-endian private scalar.
    ///
    /// The same bytes always produce the same pair. Fails with
    /// [`EcKitError::InvalidParameter`] unless `1 <= scalar <= order - 1`.
    pub fn from_private_bytes(curve: EcCurve, scalar: &[u8]) -> Result<Self> {
        if !curve.is_valid_private_scalar(scalar) {
            return Err(EcKitError::InvalidParameter(format!(
                "private scalar is outside [1, order - 1] for {curve:?}"
            )));
        }
        let padded = Zeroizing::new(curve.pad_scalar(scalar)?);
        let rejected = |_| EcKitError::InvalidParameter("private scalar rejected".to_string());

        let private_key = match curve {
            EcCurve::Secp256r1 => PrivateKey::P256(
                p256::SecretKey::from_bytes(p256::FieldBytes::from_slice(&padded))
                    .map_err(rejected)?,
            ),
            EcCurve::Secp384r1 => PrivateKey::P384(
                p384::SecretKey::from_bytes(p384::FieldBytes::from_slice(&padded))
                    .map_err(rejected)?,
            ),
        };
        let public_key = private_key.public_key();
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            PrivateKey::P256(_) => EcCurve::Secp256r1,
            PrivateKey::P384(_) => EcCurve::Secp384r1,
        }
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::P256(secret) => PublicKey::P256(secret.public_key()),
            PrivateKey::P384(secret) => PublicKey::P384(secret.public_key()),
        }
    }

    /// Import a key from PEM text.
    ///
    /// Accepts SEC1 (`EC PRIVATE KEY`) and PKCS#8 (`PRIVATE KEY`) blocks.
    /// Trailing NUL bytes are ignored.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let block = pem_utils::parse_block(pem, &[LABEL_EC_PRIVATE_KEY, LABEL_PRIVATE_KEY])?;
        let der = block.contents();
        let key = if block.tag() == LABEL_EC_PRIVATE_KEY {
            p256::SecretKey::from_sec1_der(der)
                .map(PrivateKey::P256)
                .or_else(|_| p384::SecretKey::from_sec1_der(der).map(PrivateKey::P384))
                .ok()
        } else {
            p256::SecretKey::from_pkcs8_der(der)
                .map(PrivateKey::P256)
                .or_else(|_| p384::SecretKey::from_pkcs8_der(der).map(PrivateKey::P384))
                .ok()
        };
        key.ok_or_else(|| {
            tracing::debug!(label = block.tag(), "private key is not a supported EC key");
            EcKitError::ParseError("not a supported EC private key".to_string())
        })
    }

    /// DER `ECPrivateKey` carrying the named-curve parameters and the
    /// uncompressed public point, the layout OpenSSL writes.
    fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let scalar = Zeroizing::new(match self {
            PrivateKey::P256(secret) => secret.to_bytes().to_vec(),
            PrivateKey::P384(secret) => secret.to_bytes().to_vec(),
        });
        let point = self.public_key().to_sec1_bytes();

        let private_key = sec1::EcPrivateKey {
            private_key: scalar.as_slice(),
            parameters: Some(sec1::EcParameters::NamedCurve(self.curve().oid())),
            public_key: Some(point.as_slice()),
        };
        private_key
            .to_der()
            .map(Zeroizing::new)
            .map_err(|e| EcKitError::EncodingError(e.to_string()))
    }

    /// Export the key as a SEC1 `EC PRIVATE KEY` PEM string.
    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_sec1_der()?;
        Ok(pem_utils::der_to_pem(&der, LABEL_EC_PRIVATE_KEY))
    }

    /// Bytes needed by [`PrivateKey::write_pem`], terminating NUL included.
    pub fn pem_size(&self) -> Result<RequiredSize> {
        Ok(RequiredSize(self.to_pem()?.len() + 1))
    }

    /// Write the PEM text plus a terminating NUL into `out`.
    pub fn write_pem(&self, out: &mut [u8]) -> Result<usize> {
        let pem = Zeroizing::new(self.to_pem()?);
        copy_with_nul_into(out, pem.as_bytes())
    }

    /// Sign a digest the caller has already computed with `hash`.
    ///
    /// Each call uses a fresh nonce, so repeated signatures over the same
    /// digest differ while all of them verify.
    pub fn sign(&self, hash: HashKind, digest: &[u8]) -> Result<EcdsaSignature> {
        hash.check_digest(digest)?;
        let mut rng = OsRng;
        let signing_failed = |e: ecdsa::Error| EcKitError::InvalidParameter(e.to_string());

        match self {
            PrivateKey::P256(secret) => {
                let signing_key = p256::ecdsa::SigningKey::from(secret);
                let signature: p256::ecdsa::Signature = signing_key
                    .sign_prehash_with_rng(&mut rng, digest)
                    .map_err(signing_failed)?;
                let (r, s) = signature.split_bytes();
                Ok(EcdsaSignature::new(&r, &s))
            }
            PrivateKey::P384(secret) => {
                let signing_key = p384::ecdsa::SigningKey::from(secret);
                let signature: p384::ecdsa::Signature = signing_key
                    .sign_prehash_with_rng(&mut rng, digest)
                    .map_err(signing_failed)?;
                let (r, s) = signature.split_bytes();
                Ok(EcdsaSignature::new(&r, &s))
            }
        }
    }

    /// Buffer size sufficient for any [`PrivateKey::sign_into`] output.
    pub fn signature_size(&self) -> RequiredSize {
        EcdsaSignature::max_der_size(self.curve())
    }

    /// Sign `digest` and write the DER signature into `out`, returning its
    /// length.
    ///
    /// A buffer of [`PrivateKey::signature_size`] bytes always suffices;
    /// on a shorter one this fails with `BufferTooSmall` carrying that size.
    pub fn sign_into(&self, hash: HashKind, digest: &[u8], out: &mut [u8]) -> Result<usize> {
        let required = self.signature_size();
        if out.len() < required.get() {
            return Err(EcKitError::BufferTooSmall {
                required: required.get(),
            });
        }
        let der = self.sign(hash, digest)?.to_der();
        copy_into(out, &der)
    }
}

impl PublicKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            PublicKey::P256(_) => EcCurve::Secp256r1,
            PublicKey::P384(_) => EcCurve::Secp384r1,
        }
    }

    /// Import a SubjectPublicKeyInfo `PUBLIC KEY` PEM block. Trailing NUL
    /// bytes are ignored.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let block = pem_utils::parse_block(pem, &[LABEL_PUBLIC_KEY])?;
        Self::from_spki_der(block.contents())
    }

    /// Import a DER SubjectPublicKeyInfo.
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        p256::PublicKey::from_public_key_der(der)
            .map(PublicKey::P256)
            .or_else(|_| p384::PublicKey::from_public_key_der(der).map(PublicKey::P384))
            .map_err(|e| {
                tracing::debug!(error = %e, "public key is not a supported EC key");
                EcKitError::ParseError("not a supported EC public key".to_string())
            })
    }

    /// Import a SEC1-encoded point on `curve`.
    pub fn from_sec1_bytes(curve: EcCurve, point: &[u8]) -> Result<Self> {
        let invalid = |_| EcKitError::ParseError(format!("invalid {curve:?} point"));
        match curve {
            EcCurve::Secp256r1 => p256::PublicKey::from_sec1_bytes(point)
                .map(PublicKey::P256)
                .map_err(invalid),
            EcCurve::Secp384r1 => p384::PublicKey::from_sec1_bytes(point)
                .map(PublicKey::P384)
                .map_err(invalid),
        }
    }

    /// Build a key from big-endian affine coordinates.
    ///
    /// Coordinates shorter than the field size are left-padded. Fails with
    /// [`EcKitError::InvalidParameter`] if the point is not on the curve.
    pub fn from_coordinates(curve: EcCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        let x = curve.pad_scalar(x)?;
        let y = curve.pad_scalar(y)?;
        let off_curve = || EcKitError::InvalidParameter(format!("point is not on {curve:?}"));

        match curve {
            EcCurve::Secp256r1 => {
                let point = p256::EncodedPoint::from_affine_coordinates(
                    p256::FieldBytes::from_slice(&x),
                    p256::FieldBytes::from_slice(&y),
                    false,
                );
                Option::<p256::PublicKey>::from(p256::PublicKey::from_encoded_point(&point))
                    .map(PublicKey::P256)
                    .ok_or_else(off_curve)
            }
            EcCurve::Secp384r1 => {
                let point = p384::EncodedPoint::from_affine_coordinates(
                    p384::FieldBytes::from_slice(&x),
                    p384::FieldBytes::from_slice(&y),
                    false,
                );
                Option::<p384::PublicKey>::from(p384::PublicKey::from_encoded_point(&point))
                    .map(PublicKey::P384)
                    .ok_or_else(off_curve)
            }
        }
    }

    /// Export the affine `(x, y)` coordinates, each field-size bytes long.
    pub fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        let point = self.to_sec1_bytes();
        let size = self.curve().field_size();
        // Uncompressed SEC1: 0x04 || x || y.
        (
            point[1..1 + size].to_vec(),
            point[1 + size..1 + 2 * size].to_vec(),
        )
    }

    /// Uncompressed SEC1 encoding of the point.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::P256(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            PublicKey::P384(key) => key.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Export the key as a SubjectPublicKeyInfo `PUBLIC KEY` PEM string.
    pub fn to_pem(&self) -> Result<String> {
        let der = match self {
            PublicKey::P256(key) => key.to_public_key_der(),
            PublicKey::P384(key) => key.to_public_key_der(),
        }
        .map_err(|e| EcKitError::EncodingError(e.to_string()))?;
        Ok(pem_utils::der_to_pem(der.as_bytes(), LABEL_PUBLIC_KEY))
    }

    /// Bytes needed by [`PublicKey::write_pem`], terminating NUL included.
    pub fn pem_size(&self) -> Result<RequiredSize> {
        Ok(RequiredSize(self.to_pem()?.len() + 1))
    }

    /// Write the PEM text plus a terminating NUL into `out`.
    pub fn write_pem(&self, out: &mut [u8]) -> Result<usize> {
        copy_with_nul_into(out, self.to_pem()?.as_bytes())
    }

    /// Structural equality: same curve and same coordinates.
    pub fn equals(&self, other: &PublicKey) -> bool {
        self == other
    }

    /// Verify a DER-encoded signature over a digest computed with `hash`.
    ///
    /// Any signature that does not verify, malformed encodings included,
    /// yields [`EcKitError::VerificationFailed`].
    pub fn verify(&self, hash: HashKind, digest: &[u8], signature: &[u8]) -> Result<()> {
        hash.check_digest(digest)?;
        let parsed = EcdsaSignature::from_der(signature).map_err(|e| {
            tracing::debug!(error = %e, "rejecting undecodable signature");
            EcKitError::VerificationFailed
        })?;
        self.verify_signature(digest, &parsed)
    }

    /// Verify an already-decoded signature over `digest`.
    pub fn verify_signature(&self, digest: &[u8], signature: &EcdsaSignature) -> Result<()> {
        let raw = signature
            .to_raw(self.curve())
            .map_err(|_| EcKitError::VerificationFailed)?;

        let verified = match self {
            PublicKey::P256(key) => p256::ecdsa::Signature::from_slice(&raw)
                .and_then(|sig| p256::ecdsa::VerifyingKey::from(key).verify_prehash(digest, &sig)),
            PublicKey::P384(key) => p384::ecdsa::Signature::from_slice(&raw)
                .and_then(|sig| p384::ecdsa::VerifyingKey::from(key).verify_prehash(digest, &sig)),
        };
        verified.map_err(|e| {
            tracing::debug!(error = %e, "signature did not verify");
            EcKitError::VerificationFailed
        })
    }
}
