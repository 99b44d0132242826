//! Zone-scanning tokenizer: pulls battery voltages out of one sanitised record.
//!
//! A record looks like `…,B,v1,v2,…,vN,H,…`.  Tokens between the `B` and `H`
//! markers are readings.  Per token the checks run in a fixed order:
//!
//! 1. `H` closes the zone (so `H` itself is never a reading),
//! 2. inside a zone the token is captured,
//! 3. `B` opens the zone (so capture starts with the *next* token).
//!
//! A `B` met while already inside a zone keeps the zone open and is skipped.

use crate::core::data::{Frame, Reading};

const OPEN_MARKER: &str = "B";
const CLOSE_MARKER: &str = "H";

/// Parse state for one line; never outlives a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneState {
    OutsideZone,
    InsideZone,
}

impl ZoneState {
    /// Advance over one token, returning the state to use for the next one
    /// and whether this token is a reading.
    #[inline]
    fn step(self, token: &str) -> (Self, bool) {
        let mut state = self;
        if token == CLOSE_MARKER {
            state = Self::OutsideZone;
        }
        let capture = state == Self::InsideZone && token != OPEN_MARKER;
        if token == OPEN_MARKER {
            state = Self::InsideZone;
        }
        (state, capture)
    }
}

/// Permissive decimal parse: leading digits count, anything else is 0.
///
/// `"123"` → 123, `"12V"` → 12, `"T1"` → 0.  Overflow also yields 0.
#[inline]
#[must_use]
pub fn parse_reading(token: &str) -> Reading {
    lexical_core::parse_partial::<Reading>(token.as_bytes()).map_or(0, |(value, _)| value)
}

/// Extract the readings of one sanitised line, in battery order.
///
/// Empty tokens (`,,`) are skipped, so `B,,120` yields `[120]`.
#[must_use]
pub fn extract_voltages(clean: &str) -> Frame {
    let mut state = ZoneState::OutsideZone;
    let mut readings = Vec::new();

    for token in clean.split(',').filter(|t| !t.is_empty()) {
        let (next, capture) = state.step(token);
        if capture {
            readings.push(parse_reading(token));
        }
        state = next;
    }
    Frame::new(readings)
}
