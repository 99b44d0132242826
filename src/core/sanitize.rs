//! Whitespace stripping + alphabet check for one raw input line.

use std::fmt;

/// Why a line was dropped before tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    /// Nothing left after stripping whitespace.
    Empty,
    /// First byte outside `0-9`, `A-Z` and `,`.
    Forbidden(u8),
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRejection::Empty => f.write_str("blank line"),
            LineRejection::Forbidden(b) => write!(f, "forbidden byte {:?}", char::from(*b)),
        }
    }
}

#[inline]
const fn is_stripped(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
const fn is_allowed(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'A'..=b'Z' | b',')
}

/// Strip spaces, tabs, CR and LF; accept only `[0-9A-Z,]+`.
///
/// Case is preserved, so a lowercase letter rejects the whole line.
pub fn sanitize(raw: &[u8]) -> Result<String, LineRejection> {
    let mut clean = String::with_capacity(raw.len());
    for &b in raw.iter().filter(|&&b| !is_stripped(b)) {
        if !is_allowed(b) {
            return Err(LineRejection::Forbidden(b));
        }
        clean.push(char::from(b));
    }
    if clean.is_empty() {
        return Err(LineRejection::Empty);
    }
    Ok(clean)
}
