//! Query-then-fill output protocol.
//!
//! Writers in this crate come in pairs: a size query returning
//! [`RequiredSize`], and a fill call that copies into a caller-owned slice.
//! The fill call never truncates; a short slice yields
//! [`EcKitError::BufferTooSmall`] carrying the exact size needed.

use crate::error::{EcKitError, Result};

/// Number of bytes a subsequent fill call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequiredSize(pub usize);

impl RequiredSize {
    /// Returns the size in bytes.
    pub fn get(self) -> usize {
        self.0
    }

    /// Allocates a zeroed buffer of exactly this size.
    pub fn alloc(self) -> Vec<u8> {
        vec![0u8; self.0]
    }
}

impl From<RequiredSize> for usize {
    fn from(size: RequiredSize) -> Self {
        size.0
    }
}

/// Copies `bytes` to the front of `out`, returning the count written.
pub(crate) fn copy_into(out: &mut [u8], bytes: &[u8]) -> Result<usize> {
    if out.len() < bytes.len() {
        return Err(EcKitError::BufferTooSmall {
            required: bytes.len(),
        });
    }
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}

/// Copies `text` followed by a NUL byte; the NUL is included in the count.
pub(crate) fn copy_with_nul_into(out: &mut [u8], text: &[u8]) -> Result<usize> {
    let required = text.len() + 1;
    if out.len() < required {
        return Err(EcKitError::BufferTooSmall { required });
    }
    out[..text.len()].copy_from_slice(text);
    out[text.len()] = 0;
    Ok(required)
}
