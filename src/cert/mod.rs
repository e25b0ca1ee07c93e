pub mod chain;
pub mod extensions;

use der::Decode;
use extensions::{CrlDistributionPoints, FromX509Extension};

use crate::curve::EcCurve;
use crate::error::{EcKitError, Result};
use crate::key::PublicKey;
use crate::pem_utils::{self, LABEL_CERTIFICATE};
use crate::sizing::{RequiredSize, copy_into, copy_with_nul_into};

/// Represents an X.509 certificate.
///
/// Certificates are read-only once parsed. Cloning yields an independent
/// value.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: x509_cert::Certificate,
    der: Vec<u8>,
}

/// A certificate extension as found in the certificate.
///
/// # Fields
/// * `oid` - The dotted-decimal object identifier.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded extension value (the contents of `extnValue`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub oid: String,
    pub critical: bool,
    pub value: Vec<u8>,
}

impl Certificate {
    /// Parses a single PEM `CERTIFICATE` block. Trailing NUL bytes are
    /// ignored.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let block = pem_utils::parse_block(pem, &[LABEL_CERTIFICATE])?;
        Self::from_der(block.contents())
    }

    /// Parses a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = x509_cert::Certificate::from_der(der).map_err(|e| {
            tracing::debug!(error = %e, "certificate is not valid X.509");
            EcKitError::from(e)
        })?;
        Ok(Self {
            inner,
            der: der.to_vec(),
        })
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> String {
        pem_utils::der_to_pem(&self.der, LABEL_CERTIFICATE)
    }

    /// Returns the subject public key.
    ///
    /// Fails with [`EcKitError::WrongKeyType`] unless the key is an
    /// `id-ecPublicKey` on a supported named curve.
    pub fn ec_public_key(&self) -> Result<PublicKey> {
        let spki = &self.inner.tbs_certificate.subject_public_key_info;
        if spki.algorithm.oid != const_oid::db::rfc5912::ID_EC_PUBLIC_KEY {
            return Err(EcKitError::WrongKeyType(format!(
                "subject key algorithm is {}",
                spki.algorithm.oid
            )));
        }

        let curve_oid = spki
            .algorithm
            .parameters
            .as_ref()
            .and_then(|params| params.decode_as::<const_oid::ObjectIdentifier>().ok())
            .ok_or_else(|| EcKitError::WrongKeyType("EC key without a named curve".to_string()))?;
        let curve = EcCurve::from_oid(&curve_oid).ok_or_else(|| {
            EcKitError::WrongKeyType(format!("unsupported named curve {curve_oid}"))
        })?;

        let point = spki.subject_public_key.as_bytes().ok_or_else(|| {
            EcKitError::ParseError("subject public key has unused bits".to_string())
        })?;
        PublicKey::from_sec1_bytes(curve, point)
    }

    fn raw_extensions(&self) -> &[x509_cert::ext::Extension] {
        self.inner
            .tbs_certificate
            .extensions
            .as_deref()
            .unwrap_or_default()
    }

    /// Lists the certificate's extensions in encoding order.
    pub fn extensions(&self) -> Vec<Extension> {
        self.raw_extensions()
            .iter()
            .map(|ext| Extension {
                oid: ext.extn_id.to_string(),
                critical: ext.critical,
                value: ext.extn_value.as_bytes().to_vec(),
            })
            .collect()
    }

    /// Returns the DER value of the first extension whose OID string equals
    /// `oid`, or [`EcKitError::NotFound`].
    pub fn find_extension(&self, oid: &str) -> Result<&[u8]> {
        self.raw_extensions()
            .iter()
            .find(|ext| ext.extn_id.to_string() == oid)
            .map(|ext| ext.extn_value.as_bytes())
            .ok_or_else(|| EcKitError::NotFound(format!("extension {oid}")))
    }

    /// Bytes needed by [`Certificate::write_extension`].
    pub fn extension_size(&self, oid: &str) -> Result<RequiredSize> {
        self.find_extension(oid).map(|value| RequiredSize(value.len()))
    }

    /// Copies the value of extension `oid` into `out`.
    pub fn write_extension(&self, oid: &str, out: &mut [u8]) -> Result<usize> {
        copy_into(out, self.find_extension(oid)?)
    }

    /// Decodes the extension identified by `E::OID`.
    pub fn extension<E: FromX509Extension>(&self) -> Result<E> {
        let value = self.find_extension(&E::OID.to_string())?;
        E::from_x509_extension_value(value)
    }

    /// Returns every `uniformResourceIdentifier` full name from the CRL
    /// distribution points extension, in encoding order.
    pub fn crl_distribution_points(&self) -> Result<Vec<String>> {
        self.extension::<CrlDistributionPoints>()
            .map(|points| points.urls)
    }

    /// Bytes needed by [`Certificate::write_crl_distribution_points`]: each
    /// URL plus its terminating NUL.
    pub fn crl_distribution_points_size(&self) -> Result<RequiredSize> {
        let urls = self.crl_distribution_points()?;
        Ok(RequiredSize(urls.iter().map(|url| url.len() + 1).sum()))
    }

    /// Writes the CRL URLs into `out` as consecutive NUL-terminated strings
    /// and returns them as slices of `out`, terminators excluded.
    pub fn write_crl_distribution_points<'b>(&self, out: &'b mut [u8]) -> Result<Vec<&'b str>> {
        let urls = self.crl_distribution_points()?;
        let required: usize = urls.iter().map(|url| url.len() + 1).sum();
        if out.len() < required {
            return Err(EcKitError::BufferTooSmall { required });
        }

        let mut spans = Vec::with_capacity(urls.len());
        let mut offset = 0;
        for url in &urls {
            let written = copy_with_nul_into(&mut out[offset..], url.as_bytes())?;
            spans.push(offset..offset + url.len());
            offset += written;
        }

        let out: &'b [u8] = out;
        spans
            .into_iter()
            .map(|span| {
                std::str::from_utf8(&out[span])
                    .map_err(|e| EcKitError::ParseError(format!("CRL URL is not text: {e}")))
            })
            .collect()
    }
}
