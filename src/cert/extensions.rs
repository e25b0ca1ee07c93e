use const_oid::AssociatedOid;
use der::{Decode, asn1::Ia5String, oid::ObjectIdentifier};

use crate::asn1::{self, Reader, TAG_SEQUENCE};
use crate::error::{EcKitError, Result};

pub use der::flagset::FlagSet;
use x509_cert::ext::pkix::KeyUsage as X509KeyUsage;
pub use x509_cert::ext::pkix::KeyUsages;

/// Trait for decoding typed values out of X.509 extensions.
///
/// # Example
/// ```
/// use eckit::cert::extensions::{BasicConstraints, FromX509Extension};
/// let decoded = BasicConstraints::from_x509_extension_value(&[0x30, 0x00]).unwrap();
/// assert!(!decoded.is_ca);
/// ```
pub trait FromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u32>,
}

impl FromX509Extension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn from_x509_extension_value(der_bytes: &[u8]) -> Result<Self> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(der_bytes)?;
        Ok(Self {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint.map(u32::from),
        })
    }
}

/// Represents the Key Usage extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl FromX509Extension for KeyUsage {
    const OID: ObjectIdentifier = <X509KeyUsage as AssociatedOid>::OID;

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let ku = X509KeyUsage::from_der(extension)?;
        Ok(Self(ku.0))
    }
}

/// `[0] distributionPoint` of a DistributionPoint, and `[0] fullName` of a
/// DistributionPointName. Both are constructed.
const TAG_DISTRIBUTION_POINT: u8 = asn1::context_constructed(0);
const TAG_FULL_NAME: u8 = asn1::context_constructed(0);
/// GeneralName `[6] uniformResourceIdentifier` (IA5String, implicit).
const TAG_URI: u8 = asn1::context_primitive(6);

/// The URIs named by a CRL Distribution Points extension.
///
/// ```text
/// CRLDistributionPoints ::= SEQUENCE SIZE (1..MAX) OF DistributionPoint
///
/// DistributionPoint ::= SEQUENCE {
///      distributionPoint       [0]     DistributionPointName OPTIONAL,
///      reasons                 [1]     ReasonFlags OPTIONAL,
///      cRLIssuer               [2]     GeneralNames OPTIONAL }
///
/// DistributionPointName ::= CHOICE {
///      fullName                [0]     GeneralNames,
///      nameRelativeToCRLIssuer [1]     RelativeDistinguishedName }
/// ```
///
/// Only `uniformResourceIdentifier` entries of `fullName` are collected.
/// Other GeneralName kinds, relative names, reasons and CRL issuers are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrlDistributionPoints {
    pub urls: Vec<String>,
}

impl FromX509Extension for CrlDistributionPoints {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.31");

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let mut outer = Reader::new(extension);
        let mut points = outer.read_constructed(TAG_SEQUENCE)?;
        outer.finish()?;

        let mut urls = Vec::new();
        while !points.is_empty() {
            let mut point = points.read_constructed(TAG_SEQUENCE)?;
            while !point.is_empty() {
                let (tag, name) = point.read_tlv()?;
                if tag == TAG_DISTRIBUTION_POINT {
                    collect_full_name_uris(name, &mut urls)?;
                }
            }
        }

        tracing::trace!(count = urls.len(), "decoded CRL distribution points");
        Ok(Self { urls })
    }
}

fn collect_full_name_uris(point_name: &[u8], urls: &mut Vec<String>) -> Result<()> {
    let mut choice = Reader::new(point_name);
    let (tag, general_names) = choice.read_tlv()?;
    choice.finish()?;
    if tag != TAG_FULL_NAME {
        return Ok(());
    }

    let mut names = Reader::new(general_names);
    while !names.is_empty() {
        let (tag, value) = names.read_tlv()?;
        if tag == TAG_URI {
            urls.push(ia5_string(value)?);
        }
    }
    Ok(())
}

/// URLs are handed out NUL-terminated, so an embedded NUL is refused even
/// though IA5 allows it.
fn ia5_string(value: &[u8]) -> Result<String> {
    let text = Ia5String::new(value)
        .map_err(|e| EcKitError::ParseError(format!("URI is not an IA5String: {e}")))?;
    if value.contains(&0) {
        return Err(EcKitError::ParseError("URI contains a NUL byte".to_string()));
    }
    Ok(text.to_string())
}
