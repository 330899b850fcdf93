//! Headword fingerprints.
//!
//! An entry's storage key is a deterministic digest of its headword:
//! SHA-256 over the UTF-8 bytes, truncated to 16 bytes, rendered as 32
//! lowercase hex characters on the wire. Equal headwords always produce
//! equal fingerprints, so the same term created in two independent sessions
//! lands on the same key and the merge can union them.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const FINGERPRINT_LEN: usize = 16;

/// Deterministic digest of a headword, used as the entry's storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Computes the fingerprint of a headword.
    #[must_use]
    pub fn of(headword: &str) -> Self {
        let digest = Sha256::digest(headword.as_bytes());
        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&digest[..FINGERPRINT_LEN]);
        Self(bytes)
    }

    /// Creates a fingerprint from raw digest bytes (for replay/testing).
    #[must_use]
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }
}

/// Error parsing a fingerprint from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFingerprintError {
    #[error("fingerprint must be {expected} hex chars, got {got}")]
    BadLength { expected: usize, got: usize },

    #[error("invalid hex digit {0:?}")]
    BadDigit(char),
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != FINGERPRINT_LEN * 2 {
            return Err(ParseFingerprintError::BadLength {
                expected: FINGERPRINT_LEN * 2,
                got: s.len(),
            });
        }
        let mut bytes = [0u8; FINGERPRINT_LEN];
        for (i, chunk) in s.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_value(chunk[0] as char)?;
            let lo = hex_value(chunk[1] as char)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_value(c: char) -> Result<u8, ParseFingerprintError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParseFingerprintError::BadDigit(c))
}

// Serialized as the hex string so the snapshot document stays readable.

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Fingerprint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {}-char hex string", FINGERPRINT_LEN * 2)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Fingerprint, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_headword_same_fingerprint() {
        assert_eq!(Fingerprint::of("take up"), Fingerprint::of("take up"));
    }

    #[test]
    fn case_matters() {
        assert_ne!(Fingerprint::of("Take up"), Fingerprint::of("take up"));
    }

    #[test]
    fn display_parse_roundtrip() {
        let fp = Fingerprint::of("ubiquitous");
        let parsed: Fingerprint = fp.to_string().parse().unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "abc".parse::<Fingerprint>(),
            Err(ParseFingerprintError::BadLength {
                expected: 32,
                got: 3
            })
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        let s = "zz".repeat(16);
        assert_eq!(
            s.parse::<Fingerprint>(),
            Err(ParseFingerprintError::BadDigit('z'))
        );
    }
}
