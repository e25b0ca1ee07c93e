use super::Certificate;
use crate::error::{EcKitError, Result};
use crate::pem_utils::{self, LABEL_CERTIFICATE};

/// An ordered certificate chain, leaf first and root last.
///
/// The order is taken from the input as-is. Issuer and signature links are
/// not checked.
#[derive(Debug, Clone)]
pub struct CertificateChain {
    certs: Vec<Certificate>,
}

impl CertificateChain {
    /// Parses concatenated PEM `CERTIFICATE` blocks, preserving their order.
    ///
    /// Fails with [`EcKitError::ParseError`] if there are no blocks or any
    /// block is not a valid certificate.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let blocks = pem_utils::parse_blocks(pem, LABEL_CERTIFICATE)?;
        if blocks.is_empty() {
            return Err(EcKitError::ParseError(
                "no certificates in chain".to_string(),
            ));
        }

        let certs = blocks
            .iter()
            .map(|block| Certificate::from_der(block.contents()))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(length = certs.len(), "loaded certificate chain");
        Ok(Self { certs })
    }

    /// Builds a chain from already parsed certificates, leaf first.
    pub fn from_certificates(certs: Vec<Certificate>) -> Result<Self> {
        if certs.is_empty() {
            return Err(EcKitError::InvalidParameter(
                "a chain needs at least one certificate".to_string(),
            ));
        }
        Ok(Self { certs })
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    /// Always false; a chain holds at least one certificate.
    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }

    /// Returns an independent copy of the certificate at `index`.
    ///
    /// Index 0 is the leaf and `len() - 1` the root.
    pub fn get(&self, index: usize) -> Result<Certificate> {
        self.certs
            .get(index)
            .cloned()
            .ok_or(EcKitError::OutOfBounds {
                index,
                length: self.certs.len(),
            })
    }

    /// Returns an independent copy of the certificate at index 0. Purely
    /// positional; nothing is validated.
    pub fn leaf(&self) -> Certificate {
        self.certs[0].clone()
    }

    /// Returns an independent copy of the last certificate.
    pub fn root(&self) -> Certificate {
        self.certs[self.certs.len() - 1].clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Certificate> {
        self.certs.iter()
    }

    /// Encodes the chain as concatenated PEM blocks in chain order.
    pub fn to_pem(&self) -> String {
        self.certs.iter().map(Certificate::to_pem).collect()
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a Certificate;
    type IntoIter = std::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
