//! Frame type + bounded line reader for the telemetry file.

use std::io::{self, BufRead};

/// One voltage in tenths of a volt, exactly as parsed (not yet clamped).
pub type Reading = i32;

/// All readings from one accepted line, in battery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub readings: Vec<Reading>,
}

impl Frame {
    #[inline]
    #[must_use]
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Battery count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Reading> + '_ {
        self.readings.iter().copied()
    }
}

// --- Bounded line reading ---

/// Read at most `cap` bytes into `buf`, stopping after a `\n`.
///
/// Longer physical lines come back in several pieces, each of which the
/// caller treats as a line of its own.  Returns `0` only at end of stream.
pub fn read_line_capped<R: BufRead>(
    rdr: &mut R,
    buf: &mut Vec<u8>,
    cap: usize,
) -> io::Result<usize> {
    buf.clear();
    while buf.len() < cap {
        let available = match rdr.fill_buf() {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        let room = cap - buf.len();
        let window = &available[..available.len().min(room)];
        let (used, done) = match window.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (window.len(), false),
        };
        buf.extend_from_slice(&window[..used]);
        rdr.consume(used);
        if done {
            break;
        }
    }
    Ok(buf.len())
}
