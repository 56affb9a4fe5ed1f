//! Byte-range grammar for seekable delivery.
//!
//! Parses the single-range subset of RFC 7233 `Range` headers and resolves
//! a parsed range against the fixture length. Multi-range requests and
//! units other than `bytes` are rejected.

use crate::error::{Error, Result};

/// A parsed `Range` header value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=A-B`: inclusive span.
    FromTo(u64, u64),
    /// `bytes=A-`: from an offset to the end.
    From(u64),
    /// `bytes=-N`: the final N bytes.
    Suffix(u64),
}

/// An absolute inclusive span within a payload of known total length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    /// First byte offset of the span.
    pub start: u64,
    /// Last byte offset of the span (inclusive).
    pub end: u64,
    /// Total payload length the span was resolved against.
    pub total: u64,
}

impl ResolvedRange {
    /// Number of bytes the span covers.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl ByteRange {
    /// Parse a `Range` header value.
    pub fn parse(header: &str) -> Result<Self> {
        let spec = header
            .trim()
            .strip_prefix("bytes=")
            .ok_or_else(|| Error::InvalidRange(format!("unsupported range unit in {header:?}")))?;

        if spec.contains(',') {
            return Err(Error::InvalidRange(
                "multi-range requests are not supported".to_string(),
            ));
        }

        let (start, end) = spec
            .split_once('-')
            .ok_or_else(|| Error::InvalidRange(format!("missing '-' in range spec {spec:?}")))?;

        match (start.trim(), end.trim()) {
            ("", "") => Err(Error::InvalidRange("empty range spec".to_string())),
            ("", suffix) => Ok(Self::Suffix(parse_offset(suffix)?)),
            (start, "") => Ok(Self::From(parse_offset(start)?)),
            (start, end) => {
                let start = parse_offset(start)?;
                let end = parse_offset(end)?;
                if end < start {
                    return Err(Error::InvalidRange(format!(
                        "inverted range: {start}-{end}"
                    )));
                }
                Ok(Self::FromTo(start, end))
            }
        }
    }

    /// Resolve against a payload of `total` bytes.
    ///
    /// Ends beyond the payload clamp to the last byte (RFC 7233); a start
    /// at or past the end of the payload, or a zero-length suffix, is
    /// unsatisfiable.
    pub fn resolve(self, total: u64) -> Result<ResolvedRange> {
        let last = total.saturating_sub(1);
        let (start, end) = match self {
            Self::FromTo(start, end) => (start, end.min(last)),
            Self::From(start) => (start, last),
            Self::Suffix(0) => return Err(Error::RangeNotSatisfiable { total }),
            Self::Suffix(len) => (total.saturating_sub(len), last),
        };

        if start >= total {
            return Err(Error::RangeNotSatisfiable { total });
        }

        Ok(ResolvedRange { start, end, total })
    }
}

fn parse_offset(input: &str) -> Result<u64> {
    input
        .parse::<u64>()
        .map_err(|e| Error::InvalidRange(format!("invalid byte offset {input:?}: {e}")))
}
