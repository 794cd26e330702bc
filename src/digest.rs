//! # MD5 Digest
//!
//! Hashes text or raw bytes with MD5 (RFC 1321) and renders the 16-byte
//! result as 32 lowercase hex characters.
//!
//! MD5 is not collision resistant. It is kept here as a checksum for display
//! purposes; nothing in this crate relies on it for integrity.

use md5::{Digest, Md5};

use crate::error::{Error, Result};

/// Length of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Length of the hex rendering of an MD5 digest.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// A computed MD5 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Md5Digest([u8; DIGEST_LEN]);

impl Md5Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; DIGEST_LEN]> for Md5Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

/// Compute the MD5 digest of arbitrary bytes.
pub fn digest_bytes(input: &[u8]) -> Md5Digest {
    let hash = Md5::digest(input);
    let mut bytes = [0u8; DIGEST_LEN];
    bytes.copy_from_slice(&hash);
    log::trace!("md5 over {} bytes", input.len());
    Md5Digest(bytes)
}

/// Hex MD5 digest of a string's UTF-8 bytes.
pub fn digest(input: &str) -> String {
    digest_bytes(input.as_bytes()).to_hex()
}

/// Hex MD5 digest of bytes that must hold UTF-8 text.
///
/// Used by the host bridges, where the text arrives as raw bytes. Invalid
/// UTF-8 is rejected with [`crate::Error::Encoding`] instead of being hashed
/// lossily.
pub fn digest_utf8(input: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(input)?;
    Ok(digest(text))
}

/// Decode Java "modified UTF-8" (the form JNI hands out) into a `String`.
///
/// Supplementary characters arrive as surrogate pairs and NUL as `C0 80`;
/// both are decoded. A lone surrogate or any other malformed sequence is an
/// [`Error::Encoding`], never replacement characters.
pub fn decode_modified_utf8(input: &[u8]) -> Result<String> {
    cesu8::from_java_cesu8(input)
        .map(|text| text.into_owned())
        .map_err(|e| Error::Encoding(format!("invalid modified utf-8: {e}")))
}

/// Hex MD5 digest of Java text in modified UTF-8, hashed as standard UTF-8.
pub fn digest_modified_utf8(input: &[u8]) -> Result<String> {
    let text = decode_modified_utf8(input)?;
    Ok(digest(&text))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hex_is_fixed_length_lowercase(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let hex = digest_bytes(&bytes).to_hex();
            prop_assert_eq!(hex.len(), HEX_LEN);
            prop_assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }

        #[test]
        fn digest_is_deterministic(s in ".{0,128}") {
            prop_assert_eq!(digest(&s), digest(&s));
            prop_assert_eq!(digest_utf8(s.as_bytes()).unwrap(), digest(&s));
        }
    }
}
