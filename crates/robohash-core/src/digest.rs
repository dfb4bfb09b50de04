//! Seeded digest computation.
//!
//! Every generation starts from a single HMAC-SHA-512 digest:
//!
//! ```text
//! digest = HMAC-SHA512(key = UTF8(key), message = UTF8(identifier))
//! ```
//!
//! The digest is computed once per request and never mutated. It is the only
//! source of entropy for part selection.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::{DigestInput, RobohashError};

type HmacSha512 = Hmac<Sha512>;

/// Size of the digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// Default HMAC key used when the caller supplies none.
pub const PUBLIC_KEY: &str = "";

/// A 512-bit seeded digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest512([u8; DIGEST_LEN]);

impl Digest512 {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Returns the big-endian 64-bit word at chunk index `index`, or `None`
    /// past the end of the digest.
    pub fn chunk(&self, index: usize) -> Option<u64> {
        let start = index.checked_mul(8)?;
        let end = start.checked_add(8)?;
        let bytes: [u8; 8] = self.0.get(start..end)?.try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    /// Number of 64-bit chunks held by the digest.
    pub const fn chunk_count(&self) -> usize {
        DIGEST_LEN / 8
    }

    /// Lowercase hexadecimal representation (128 characters).
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(DIGEST_LEN * 2);
        for byte in &self.0 {
            hex.push_str(&format!("{:02x}", byte));
        }
        hex
    }
}

impl std::fmt::Display for Digest512 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Digest512 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest512({})", self.to_hex())
    }
}

/// Computes the seeded digest of `identifier` under `key`.
///
/// # Example
/// ```
/// use robohash_core::digest::{seeded_digest, PUBLIC_KEY};
///
/// let a = seeded_digest("unittest", PUBLIC_KEY);
/// let b = seeded_digest("unittest", PUBLIC_KEY);
/// assert_eq!(a, b);
/// assert_eq!(a.to_hex().len(), 128);
/// ```
pub fn seeded_digest(identifier: &str, key: &str) -> Digest512 {
    hmac_sha512(key.as_bytes(), identifier.as_bytes())
}

/// Computes the seeded digest from raw byte inputs.
///
/// Both inputs must be valid UTF-8. Invalid input is reported, never
/// replaced with a lossy conversion, since a substituted identifier would
/// silently select a different avatar.
pub fn seeded_digest_bytes(identifier: &[u8], key: &[u8]) -> Result<Digest512, RobohashError> {
    let identifier = std::str::from_utf8(identifier).map_err(|source| RobohashError::Encoding {
        input: DigestInput::Identifier,
        source,
    })?;
    let key = std::str::from_utf8(key).map_err(|source| RobohashError::Encoding {
        input: DigestInput::Key,
        source,
    })?;
    Ok(seeded_digest(identifier, key))
}

fn hmac_sha512(key: &[u8], message: &[u8]) -> Digest512 {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    let tag = mac.finalize().into_bytes();

    let mut bytes = [0u8; DIGEST_LEN];
    bytes.copy_from_slice(&tag);
    Digest512(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unittest_reference_digest() {
        let digest = seeded_digest("unittest", PUBLIC_KEY);
        assert_eq!(
            digest.to_hex(),
            "89402f7c8787e4d2610a42c072e11e0d6757882553388abbeb49e3443e96d72e\
             e3c3624bb1abb8d8a1bee63d7ddaa80c7917cc66cac764e64fca082e850e1f9a"
        );
    }

    #[test]
    fn test_rfc4231_case_2() {
        // RFC 4231 test case 2, HMAC-SHA-512
        let digest = seeded_digest("what do ya want for nothing?", "Jefe");
        assert_eq!(
            digest.to_hex(),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_key_changes_digest() {
        let public = seeded_digest("unittest", PUBLIC_KEY);
        let keyed = seeded_digest("unittest", "secret");
        assert_ne!(public, keyed);
        assert_eq!(
            keyed.to_hex(),
            "641839627c42365102162f92dfdffaa64d01d2031a7d731aa8d3782f05ba5a7f\
             f0e0bf95ebfb67ecc6a43049ba0b55b0895b93377ce812127f237a3eaa282059"
        );
    }

    #[test]
    fn test_chunks_are_big_endian_words() {
        let digest = seeded_digest("unittest", PUBLIC_KEY);
        assert_eq!(digest.chunk(0), Some(9_889_956_993_601_889_490));
        assert_eq!(digest.chunk(1), Some(6_992_474_765_774_626_317));
        assert_eq!(digest.chunk(7), Some(5_749_416_870_185_672_602));
        assert_eq!(digest.chunk(8), None);
        assert_eq!(digest.chunk(usize::MAX), None);
        assert_eq!(digest.chunk_count(), 8);
    }

    #[test]
    fn test_bytes_entry_point_matches_str() {
        let from_bytes = seeded_digest_bytes(b"unittest", b"").unwrap();
        assert_eq!(from_bytes, seeded_digest("unittest", ""));
    }

    #[test]
    fn test_invalid_utf8_identifier_is_rejected() {
        let err = seeded_digest_bytes(&[0x66, 0xff, 0x6f], b"").unwrap_err();
        match err {
            RobohashError::Encoding { input, .. } => assert_eq!(input, DigestInput::Identifier),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_key_is_rejected() {
        let err = seeded_digest_bytes(b"unittest", &[0xc3, 0x28]).unwrap_err();
        assert!(matches!(
            err,
            RobohashError::Encoding {
                input: DigestInput::Key,
                ..
            }
        ));
        assert_eq!(err.code().code(), "R001");
    }
}
