//! MD5 integrity trailer.
//!
//! The trailer is the standard base64 rendering of the MD5 digest of every
//! byte before it, followed by a single NUL. An MD5 digest always renders to
//! 24 characters, so the trailer has a fixed length and can be located from
//! the end of the blob without scanning.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use tracing::warn;

use crate::cursor::{ByteReader, CursorError, Endian};
use crate::error::XGraphError;

/// Length of the base64 digest text.
pub const DIGEST_TEXT_LEN: usize = 24;

/// Length of the trailer including its NUL terminator.
pub const TRAILER_LEN: usize = DIGEST_TEXT_LEN + 1;

/// Raw MD5 digest of `data`.
pub fn digest(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

/// Base64 text of the MD5 digest of `data`.
pub fn checksum(data: &[u8]) -> String {
    STANDARD.encode(digest(data))
}

/// Split a blob into the span covered by the trailer and the trailer text.
///
/// Fails with a bounds violation if the blob cannot hold a trailer or the
/// trailer is not NUL-terminated.
pub fn split_trailer(bytes: &[u8]) -> Result<(&[u8], String), XGraphError> {
    let start = bytes.len().checked_sub(TRAILER_LEN).ok_or(CursorError::OutOfBounds {
        position: 0,
        width: TRAILER_LEN,
        len: bytes.len(),
    })?;
    if bytes[bytes.len() - 1] != 0 {
        return Err(CursorError::MissingTerminator { position: start }.into());
    }

    let mut reader = ByteReader::new(bytes, Endian::Little);
    reader.seek(start);
    // Valid base64 is ASCII; anything else is reported as a mismatch below.
    let stored = match reader.read_cstring() {
        Ok(text) => text,
        Err(CursorError::InvalidUtf8 { .. }) => {
            String::from_utf8_lossy(&bytes[start..bytes.len() - 1]).into_owned()
        }
        Err(e) => return Err(e.into()),
    };
    Ok((&bytes[..start], stored))
}

/// Verify the trailer and return the span it covers.
pub fn verify(bytes: &[u8]) -> Result<&[u8], XGraphError> {
    let (covered, stored) = split_trailer(bytes)?;
    let computed = checksum(covered);
    if stored != computed {
        warn!(%stored, %computed, "xgraph checksum mismatch");
        return Err(XGraphError::ChecksumMismatch { stored, computed });
    }
    Ok(covered)
}
