use const_oid::ObjectIdentifier;
use sha2::Digest;

use crate::error::{EcKitError, Result};

/// Order of the secp256r1 base point.
const P256_GROUP_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xBC, 0xE6, 0xFA, 0xAD, 0xA7, 0x17, 0x9E, 0x84, 0xF3, 0xB9, 0xCA, 0xC2, 0xFC, 0x63, 0x25, 0x51,
];

/// Order of the secp384r1 base point.
const P384_GROUP_ORDER: [u8; 48] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xC7, 0x63, 0x4D, 0x81, 0xF4, 0x37, 0x2D, 0xDF,
    0x58, 0x1A, 0x0D, 0xB2, 0x48, 0xB0, 0xA7, 0x7A, 0xEC, 0xEC, 0x19, 0x6A, 0xCC, 0xC5, 0x29, 0x73,
];

/// Supported named curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (prime256v1).
    Secp256r1,
    /// NIST P-384.
    Secp384r1,
}

impl EcCurve {
    /// Size in bytes of a field element, and of a coordinate or scalar.
    pub fn field_size(self) -> usize {
        match self {
            EcCurve::Secp256r1 => 32,
            EcCurve::Secp384r1 => 48,
        }
    }

    /// Big-endian group order.
    pub fn order(self) -> &'static [u8] {
        match self {
            EcCurve::Secp256r1 => &P256_GROUP_ORDER,
            EcCurve::Secp384r1 => &P384_GROUP_ORDER,
        }
    }

    /// Named-curve OID used in SPKI and SEC1 parameters.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            EcCurve::Secp256r1 => const_oid::db::rfc5912::SECP_256_R_1,
            EcCurve::Secp384r1 => const_oid::db::rfc5912::SECP_384_R_1,
        }
    }

    /// Looks up a curve by its named-curve OID.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            const_oid::db::rfc5912::SECP_256_R_1 => Some(EcCurve::Secp256r1),
            const_oid::db::rfc5912::SECP_384_R_1 => Some(EcCurve::Secp384r1),
            _ => None,
        }
    }

    /// Returns `true` iff the big-endian `scalar` satisfies
    /// `1 <= scalar <= order - 1`.
    ///
    /// Leading zero bytes are ignored, so a scalar may be supplied shorter
    /// or longer than [`EcCurve::field_size`].
    pub fn is_valid_private_scalar(self, scalar: &[u8]) -> bool {
        let start = scalar
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(scalar.len());
        let significant = &scalar[start..];
        let order = self.order();

        if significant.is_empty() || significant.len() > order.len() {
            return false;
        }
        if significant.len() < order.len() {
            return true;
        }
        // Equal widths: big-endian byte order is numeric order.
        significant < order
    }

    /// Left-pads `scalar` to the field size.
    pub(crate) fn pad_scalar(self, scalar: &[u8]) -> Result<Vec<u8>> {
        let size = self.field_size();
        let start = scalar
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(scalar.len());
        let significant = &scalar[start..];
        if significant.len() > size {
            return Err(EcKitError::InvalidParameter(format!(
                "value of {} bytes does not fit a {size}-byte field",
                significant.len()
            )));
        }
        let mut padded = vec![0u8; size];
        padded[size - significant.len()..].copy_from_slice(significant);
        Ok(padded)
    }
}

/// Hash algorithm a caller used to produce a digest.
///
/// Signing and verification never hash; the kind only fixes the expected
/// digest length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Sha256,
    Sha384,
    Sha512,
}

impl HashKind {
    pub fn output_size(self) -> usize {
        match self {
            HashKind::Sha256 => 32,
            HashKind::Sha384 => 48,
            HashKind::Sha512 => 64,
        }
    }

    /// Hashes `data` with this algorithm.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashKind::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashKind::Sha384 => sha2::Sha384::digest(data).to_vec(),
            HashKind::Sha512 => sha2::Sha512::digest(data).to_vec(),
        }
    }

    pub(crate) fn check_digest(self, digest: &[u8]) -> Result<()> {
        if digest.len() != self.output_size() {
            return Err(EcKitError::InvalidParameter(format!(
                "{self:?} digest must be {} bytes, got {}",
                self.output_size(),
                digest.len()
            )));
        }
        Ok(())
    }
}
