//! Minimal DER reader and writer.
//!
//! Only what the signature codec and the CRL distribution point decoder
//! need: single-byte tags, definite lengths, and unsigned INTEGERs. Every
//! read is bounds-checked against the slice the reader was created over,
//! and nested readers never see bytes outside their parent TLV.

use crate::error::{EcKitError, Result};

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_SEQUENCE: u8 = 0x30;

/// `[n]` context-specific, constructed.
pub const fn context_constructed(n: u8) -> u8 {
    0xA0 | n
}

/// `[n]` context-specific, primitive.
pub const fn context_primitive(n: u8) -> u8 {
    0x80 | n
}

// Lengths above this are never produced by anything this crate decodes.
const MAX_LENGTH_OCTETS: usize = 4;

fn malformed(what: &str) -> EcKitError {
    EcKitError::ParseError(format!("malformed DER: {what}"))
}

/// Cursor over a DER byte string.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads one identifier octet. High tag numbers are rejected.
    pub fn read_tag(&mut self) -> Result<u8> {
        let tag = self.read_byte("tag")?;
        if tag & 0x1F == 0x1F {
            return Err(malformed("multi-byte tags are not supported"));
        }
        Ok(tag)
    }

    /// Reads a definite length in minimal DER form.
    pub fn read_length(&mut self) -> Result<usize> {
        let first = self.read_byte("length")?;
        if first < 0x80 {
            return Ok(usize::from(first));
        }
        if first == 0x80 {
            return Err(malformed("indefinite length"));
        }

        let octets = usize::from(first & 0x7F);
        if octets > MAX_LENGTH_OCTETS {
            return Err(malformed("length field too wide"));
        }
        let encoded = self.read_bytes(octets)?;
        if encoded[0] == 0 {
            return Err(malformed("non-minimal length"));
        }
        let length = encoded
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
        if length < 0x80 {
            return Err(malformed("non-minimal length"));
        }
        Ok(length)
    }

    /// Takes the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(malformed("value runs past end of input"));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Reads a complete tag-length-value and returns the tag and contents.
    pub fn read_tlv(&mut self) -> Result<(u8, &'a [u8])> {
        let tag = self.read_tag()?;
        let len = self.read_length()?;
        let value = self.read_bytes(len)?;
        Ok((tag, value))
    }

    /// Reads a TLV whose tag must equal `tag`.
    pub fn read_expected(&mut self, tag: u8) -> Result<&'a [u8]> {
        let (found, value) = self.read_tlv()?;
        if found != tag {
            return Err(EcKitError::ParseError(format!(
                "malformed DER: expected tag 0x{tag:02x}, found 0x{found:02x}"
            )));
        }
        Ok(value)
    }

    /// Reads a TLV with tag `tag` and returns a reader over its contents.
    pub fn read_constructed(&mut self, tag: u8) -> Result<Reader<'a>> {
        self.read_expected(tag).map(Reader::new)
    }

    /// Reads a non-negative INTEGER and returns its magnitude without the
    /// sign-padding octet.
    pub fn read_unsigned_integer(&mut self) -> Result<&'a [u8]> {
        let value = self.read_expected(TAG_INTEGER)?;
        match value {
            [] => Err(malformed("empty INTEGER")),
            [first, ..] if first & 0x80 != 0 => Err(malformed("negative INTEGER")),
            [0x00, next, ..] if next & 0x80 == 0 => Err(malformed("non-minimal INTEGER")),
            [0x00, rest @ ..] => Ok(rest),
            _ => Ok(value),
        }
    }

    /// Fails if any input is left unread.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(malformed("trailing data"))
        }
    }

    fn read_byte(&mut self, what: &str) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| malformed(&format!("truncated {what}")))?;
        self.pos += 1;
        Ok(byte)
    }
}

/// Number of octets `write_length` produces for `len`.
pub fn length_octets(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        1 + (usize::BITS - len.leading_zeros()).div_ceil(8) as usize
    }
}

pub fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let width = length_octets(len) - 1;
    out.push(0x80 | width as u8);
    out.extend_from_slice(&len.to_be_bytes()[size_of::<usize>() - width..]);
}

pub fn write_tlv(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    write_length(out, value.len());
    out.extend_from_slice(value);
}

/// Contents octets of the minimal INTEGER encoding of a big-endian
/// magnitude: leading zeros are stripped and a single 0x00 is kept in
/// front of a set high bit.
pub fn unsigned_integer_contents(magnitude: &[u8]) -> Vec<u8> {
    let start = magnitude
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(magnitude.len());
    let trimmed = &magnitude[start..];
    match trimmed.first() {
        None => vec![0x00],
        Some(first) if first & 0x80 != 0 => {
            let mut contents = Vec::with_capacity(trimmed.len() + 1);
            contents.push(0x00);
            contents.extend_from_slice(trimmed);
            contents
        }
        Some(_) => trimmed.to_vec(),
    }
}

pub fn write_unsigned_integer(out: &mut Vec<u8>, magnitude: &[u8]) {
    write_tlv(out, TAG_INTEGER, &unsigned_integer_contents(magnitude));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_lengths() {
        let mut reader = Reader::new(&[0x05, 0x81, 0x80, 0x82, 0x01, 0x00]);
        assert_eq!(reader.read_length().unwrap(), 5);
        assert_eq!(reader.read_length().unwrap(), 0x80);
        assert_eq!(reader.read_length().unwrap(), 0x100);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_rejects_non_canonical_lengths() {
        assert!(Reader::new(&[0x80]).read_length().is_err());
        assert!(Reader::new(&[0x81, 0x7F]).read_length().is_err());
        assert!(Reader::new(&[0x82, 0x00, 0x80]).read_length().is_err());
        assert!(Reader::new(&[0x85, 1, 1, 1, 1, 1]).read_length().is_err());
    }

    #[test]
    fn test_value_past_end_is_rejected() {
        let mut reader = Reader::new(&[0x30, 0x05, 0x02, 0x01]);
        assert!(matches!(
            reader.read_tlv(),
            Err(EcKitError::ParseError(_))
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(Reader::new(&[]).read_tag().is_err());
        assert!(Reader::new(&[0x30]).read_tlv().is_err());
        assert!(Reader::new(&[0x1F, 0x01, 0x00]).read_tag().is_err());
    }

    #[test]
    fn test_nested_reader_is_bounded() {
        let der = [0x30, 0x03, 0x02, 0x01, 0x07, 0x02, 0x01, 0x09];
        let mut outer = Reader::new(&der);
        let mut inner = outer.read_constructed(TAG_SEQUENCE).unwrap();
        assert_eq!(inner.read_unsigned_integer().unwrap(), &[0x07]);
        assert!(inner.read_unsigned_integer().is_err());
        assert!(outer.finish().is_err());
        assert_eq!(outer.read_unsigned_integer().unwrap(), &[0x09]);
        outer.finish().unwrap();
    }

    #[test]
    fn test_integer_sign_rules() {
        assert_eq!(
            Reader::new(&[0x02, 0x02, 0x00, 0x80])
                .read_unsigned_integer()
                .unwrap(),
            &[0x80]
        );
        assert!(
            Reader::new(&[0x02, 0x01, 0x80])
                .read_unsigned_integer()
                .is_err()
        );
        assert!(
            Reader::new(&[0x02, 0x02, 0x00, 0x7F])
                .read_unsigned_integer()
                .is_err()
        );
        assert!(Reader::new(&[0x02, 0x00]).read_unsigned_integer().is_err());
        assert!(
            Reader::new(&[0x04, 0x01, 0x01])
                .read_unsigned_integer()
                .is_err()
        );
    }

    #[test]
    fn test_unsigned_integer_contents() {
        assert_eq!(unsigned_integer_contents(&[]), vec![0x00]);
        assert_eq!(unsigned_integer_contents(&[0x00, 0x00]), vec![0x00]);
        assert_eq!(unsigned_integer_contents(&[0x00, 0x7F]), vec![0x7F]);
        assert_eq!(unsigned_integer_contents(&[0x00, 0x00, 0xDE]), vec![0x00, 0xDE]);
    }

    #[test]
    fn test_write_long_length() {
        let mut out = Vec::new();
        write_tlv(&mut out, TAG_OCTET_STRING, &[0xAB; 0x81]);
        assert_eq!(&out[..3], &[0x04, 0x81, 0x81]);
        assert_eq!(out.len(), 3 + 0x81);
        assert_eq!(length_octets(0x81), 2);
        assert_eq!(length_octets(0x1C1), 3);

        let mut reader = Reader::new(&out);
        assert_eq!(reader.read_expected(TAG_OCTET_STRING).unwrap().len(), 0x81);
    }
}
