//! HTTP Range header resolution
//!
//! Turns the value of a `Range` header into a concrete inclusive byte interval.
//! Only the single `bytes=start-end` form is understood (RFC 7233 subset):
//! - `bytes=start-end` - Specific range
//! - `bytes=start-` - From start to end of resource
//! - `bytes=-suffix` - Last suffix bytes
//!
//! Whether the interval actually fits the resource is left to the caller.

/// Inclusive byte interval `[start, end]` over a resource of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: u64,
    /// Last byte position (inclusive)
    pub end: u64,
}

impl ByteRange {
    /// Check the interval lies inside a resource of `size` bytes
    #[inline]
    pub const fn is_satisfiable(&self, size: u64) -> bool {
        self.start < size && self.end < size && self.start <= self.end
    }

    /// Number of bytes covered; only meaningful for a satisfiable range
    #[inline]
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for this interval
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{size}", self.start, self.end)
    }
}

/// Resolve a `Range` header against a resource of `total_length` bytes
///
/// Returns `None` when no range was requested (header absent or empty), in
/// which case the whole resource is served with 200.
///
/// The first `bytes=<digits>-<digits>` occurrence in the value is used. When
/// no such occurrence exists, or neither side carries a number, the result
/// covers the whole resource.
///
/// # Examples
/// ```
/// use range_serve::http::range::{resolve_range, ByteRange};
///
/// assert_eq!(
///     resolve_range(Some("bytes=-10"), 100),
///     Some(ByteRange { start: 90, end: 99 })
/// );
/// assert_eq!(resolve_range(None, 100), None);
/// ```
pub fn resolve_range(range_header: Option<&str>, total_length: u64) -> Option<ByteRange> {
    let header = range_header.filter(|h| !h.is_empty())?;

    let last = total_length.saturating_sub(1);
    let range = match find_byte_spec(header).unwrap_or((None, None)) {
        (Some(start), Some(end)) => ByteRange { start, end },
        (Some(start), None) => ByteRange { start, end: last },
        // Suffix form: the number is a length counted back from the end
        (None, Some(suffix)) => ByteRange {
            start: total_length.saturating_sub(suffix),
            end: last,
        },
        (None, None) => ByteRange {
            start: 0,
            end: last,
        },
    };

    Some(range)
}

/// Find the first `bytes=<digits>-<digits>` occurrence and parse both sides
fn find_byte_spec(header: &str) -> Option<(Option<u64>, Option<u64>)> {
    header.match_indices("bytes=").find_map(|(idx, unit)| {
        let spec = &header[idx + unit.len()..];
        let (first, rest) = split_digits(spec);
        let rest = rest.strip_prefix('-')?;
        let (second, _) = split_digits(rest);
        Some((parse_offset(first), parse_offset(second)))
    })
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a run of ASCII digits; values too large for `u64` saturate
fn parse_offset(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
