//! # Content Digest
//!
//! A SHA-256 fingerprint of a model's [`CanonicalKey`]. The only way to get
//! one is from a canonical key, so two models with equal projections share
//! a digest no matter how their builders were fed.
//!
//! Rendered as `sha256:<64 lowercase hex>`, which is also the form
//! [`FromStr`](std::str::FromStr) accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalKey;

const PREFIX: &str = "sha256:";

/// SHA-256 of canonical model bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Hash a canonical key.
    pub fn of(key: &CanonicalKey) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(key.as_bytes()));
        Self(bytes)
    }

    /// The raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex without the algorithm prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.to_hex())
    }
}

/// A string that is not `sha256:` followed by 64 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed digest {0:?}: expected sha256:<64 hex digits>")]
pub struct MalformedDigest(pub String);

impl FromStr for ContentDigest {
    type Err = MalformedDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedDigest(s.to_string());
        let hex = s.strip_prefix(PREFIX).ok_or_else(malformed)?;
        if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| malformed())?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn digest(value: serde_json::Value) -> ContentDigest {
        ContentDigest::of(&CanonicalKey::new(&value).unwrap())
    }

    #[test]
    fn key_order_does_not_change_digest() {
        assert_eq!(digest(json!({"a": 1, "b": 2})), digest(json!({"b": 2, "a": 1})));
        assert_ne!(digest(json!({"a": 1})), digest(json!({"a": 2})));
    }

    #[test]
    fn known_vector() {
        assert_eq!(
            digest(json!({})).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn display_parses_back() {
        let d = digest(json!({"title": "CAD"}));
        let s = d.to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
        assert_eq!(s.parse::<ContentDigest>().unwrap(), d);
        assert_eq!(serde_json::to_value(d).unwrap(), json!(s));
    }

    #[test]
    fn malformed_strings() {
        let hex = "0".repeat(64);
        assert!(hex.parse::<ContentDigest>().is_err());
        assert!(format!("md5:{hex}").parse::<ContentDigest>().is_err());
        assert!(format!("sha256:{}", &hex[1..]).parse::<ContentDigest>().is_err());
        assert!(format!("sha256:{}zz", &hex[2..]).parse::<ContentDigest>().is_err());
        assert!(serde_json::from_value::<ContentDigest>(json!("sha256:")).is_err());
    }
}
