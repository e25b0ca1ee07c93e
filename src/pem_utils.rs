use crate::error::{EcKitError, Result};

pub(crate) const LABEL_EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";
pub(crate) const LABEL_PRIVATE_KEY: &str = "PRIVATE KEY";
pub(crate) const LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";
pub(crate) const LABEL_CERTIFICATE: &str = "CERTIFICATE";

/// Strips the trailing NUL bytes a C-string style input may carry.
fn trim_nul(input: &[u8]) -> &[u8] {
    let end = input
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |last| last + 1);
    &input[..end]
}

/// Returns the first PEM block of `input` carrying one of `labels`.
///
/// Blocks with other labels are skipped, so an `EC PARAMETERS` block in
/// front of the key (as `openssl ecparam -genkey` writes) is accepted.
pub(crate) fn parse_block(input: &[u8], labels: &[&str]) -> Result<pem::Pem> {
    let mut blocks = pem::parse_many(trim_nul(input))?;
    match blocks.iter().position(|block| labels.contains(&block.tag())) {
        Some(index) => Ok(blocks.swap_remove(index)),
        None => {
            let found: Vec<&str> = blocks.iter().map(pem::Pem::tag).collect();
            tracing::debug!(?found, expected = ?labels, "no PEM block with an expected label");
            Err(EcKitError::ParseError(format!(
                "no PEM block labelled {}",
                labels.join(" or ")
            )))
        }
    }
}

/// Parses every PEM block of `input` in order of appearance; all must carry
/// `label`.
pub(crate) fn parse_blocks(input: &[u8], label: &str) -> Result<Vec<pem::Pem>> {
    let blocks = pem::parse_many(trim_nul(input))?;
    if let Some(block) = blocks.iter().find(|block| block.tag() != label) {
        return Err(EcKitError::ParseError(format!(
            "unexpected PEM label '{}'",
            block.tag()
        )));
    }
    Ok(blocks)
}

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
///
/// Output uses LF line endings and 64-column base64, the layout OpenSSL
/// writes, so re-encoding a decoded OpenSSL file reproduces it exactly.
pub(crate) fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}
