//! Content digests and the idempotence marker
//!
//! Every converted program starts with a stamp line that embeds the MD5 of
//! the source it was generated from:
//!
//! ```text
//! ( lightburn-uccnc - hash:9e107d9d372bb6826bd81d3542a419d6 - 2026-10-18 09:30:00 UTC )
//! ```
//!
//! A later run reads the token back and skips the source if it still hashes
//! to the same value.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

const HASH_KEY: &str = "hash:";
const GENERATOR: &str = "lightburn-uccnc";

/// Lowercase hex MD5 of the given content
pub fn content_digest(content: &[u8]) -> String {
    let hash = Md5::digest(content);
    format!("{:x}", hash)
}

/// Header line identifying the source a program was generated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub digest: String,
    pub generated_at: DateTime<Utc>,
}

impl Stamp {
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            generated_at: Utc::now(),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "( {GENERATOR} - {HASH_KEY}{} - {} )",
            self.digest,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Extract the digest token from a stamp line.
///
/// The line must contain `hash:` exactly once; the token runs to the next space.
pub fn embedded_hash(line: &str) -> Option<&str> {
    let mut parts = line.split(HASH_KEY);
    let _before = parts.next()?;
    let after = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let token = after.split(' ').next().unwrap_or_default();
    Some(token)
}

/// Digest embedded in the first line of a previous output, if any.
///
/// Missing or unreadable files and malformed stamps all yield `None`.
pub fn read_output_hash(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut first = String::new();
    BufReader::new(file).read_line(&mut first).ok()?;
    let first = first.trim_end_matches(['\n', '\r']);
    embedded_hash(first)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_content_digest_known_value() {
        assert_eq!(
            content_digest(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
        assert_eq!(content_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_stamp_display() {
        let stamp = Stamp {
            digest: "abc123".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
        };
        assert_eq!(
            stamp.to_string(),
            "( lightburn-uccnc - hash:abc123 - 2026-10-18 09:30:00 UTC )"
        );
    }

    #[test]
    fn test_embedded_hash_roundtrips_stamp() {
        let stamp = Stamp::new("d41d8cd98f00b204e9800998ecf8427e");
        let line = stamp.to_string();
        assert_eq!(
            embedded_hash(&line),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
    }

    #[test]
    fn test_embedded_hash_missing_or_ambiguous() {
        assert_eq!(embedded_hash("( LightBurn 1.2.0 )"), None);
        assert_eq!(embedded_hash("hash:a hash:b"), None);
        assert_eq!(embedded_hash("hash:"), Some(""));
    }

    #[test]
    fn test_read_output_hash_missing_file() {
        assert_eq!(read_output_hash(Path::new("/nonexistent/out_UCCNC.nc")), None);
    }
}
