//! ECDSA signature values and their DER form.
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!   r INTEGER,
//!   s INTEGER
//! }
//! ```

use crate::asn1::{self, Reader, TAG_SEQUENCE};
use crate::curve::EcCurve;
use crate::error::{EcKitError, Result};
use crate::sizing::{RequiredSize, copy_into};

/// An ECDSA `(r, s)` pair held as minimal big-endian magnitudes.
///
/// Equality is numeric: leading zero bytes supplied to [`EcdsaSignature::new`]
/// are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

impl EcdsaSignature {
    /// Creates a signature from big-endian `r` and `s`.
    pub fn new(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: strip_leading_zeros(r).to_vec(),
            s: strip_leading_zeros(s).to_vec(),
        }
    }

    pub fn r(&self) -> &[u8] {
        &self.r
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Decodes a DER `SEQUENCE { INTEGER r, INTEGER s }`.
    ///
    /// Trailing bytes after the SEQUENCE, negative integers and non-minimal
    /// encodings are rejected.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let mut outer = Reader::new(der);
        let mut seq = outer.read_constructed(TAG_SEQUENCE)?;
        outer.finish()?;

        let r = seq.read_unsigned_integer()?;
        let s = seq.read_unsigned_integer()?;
        seq.finish()?;

        Ok(Self::new(r, s))
    }

    /// Encodes the signature in DER. Output is a function of `(r, s)` only.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.r.len() + self.s.len() + 6);
        asn1::write_unsigned_integer(&mut body, &self.r);
        asn1::write_unsigned_integer(&mut body, &self.s);

        let mut der = Vec::with_capacity(body.len() + 4);
        asn1::write_tlv(&mut der, TAG_SEQUENCE, &body);
        der
    }

    /// Size of [`EcdsaSignature::to_der`] output.
    pub fn der_size(&self) -> RequiredSize {
        let integer_size = |magnitude: &[u8]| {
            let contents = asn1::unsigned_integer_contents(magnitude).len();
            1 + asn1::length_octets(contents) + contents
        };
        let body = integer_size(&self.r) + integer_size(&self.s);
        RequiredSize(1 + asn1::length_octets(body) + body)
    }

    /// Writes the DER encoding into `out` and returns the bytes written.
    pub fn write_der(&self, out: &mut [u8]) -> Result<usize> {
        copy_into(out, &self.to_der())
    }

    /// Upper bound of the DER size of any signature on `curve`.
    pub fn max_der_size(curve: EcCurve) -> RequiredSize {
        let integer = curve.field_size() + 1;
        let integer_size = 1 + asn1::length_octets(integer) + integer;
        let body = 2 * integer_size;
        RequiredSize(1 + asn1::length_octets(body) + body)
    }

    /// Decodes the fixed-width `r || s` form used by the curve crates.
    pub fn from_raw(curve: EcCurve, raw: &[u8]) -> Result<Self> {
        let size = curve.field_size();
        if raw.len() != 2 * size {
            return Err(EcKitError::InvalidParameter(format!(
                "raw signature must be {} bytes, got {}",
                2 * size,
                raw.len()
            )));
        }
        let (r, s) = raw.split_at(size);
        Ok(Self::new(r, s))
    }

    /// Encodes as fixed-width `r || s`, each component left-padded to the
    /// field size of `curve`.
    pub fn to_raw(&self, curve: EcCurve) -> Result<Vec<u8>> {
        let mut raw = curve.pad_scalar(&self.r)?;
        raw.extend(curve.pad_scalar(&self.s)?);
        Ok(raw)
    }
}
