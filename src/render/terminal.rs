//! Terminal session: alternate screen + hidden cursor, undone on Drop.
//!
//! Teardown runs from exactly one place (`Drop`), whether the monitor
//! stopped on Ctrl-C, on a fatal error or normally.

use std::io::{self, Stdout, Write, stdout};

use terminal_size::{Height, Width, terminal_size};
use tracing::warn;

use crate::core::config::Config;

const ENTER: &[u8] = b"\x1b[?1049h\x1b[2J\x1b[?25l";
const LEAVE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

pub struct TerminalSession<W: Write> {
    out: W,
    active: bool,
}

impl TerminalSession<Stdout> {
    /// Take over the real terminal.
    pub fn start() -> io::Result<Self> {
        Self::start_on(stdout())
    }
}

impl<W: Write> TerminalSession<W> {
    pub fn start_on(mut out: W) -> io::Result<Self> {
        out.write_all(ENTER)?;
        out.flush()?;
        Ok(Self { out, active: true })
    }

    /// Restore the terminal; later calls are no-ops.
    pub fn teardown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.out.write_all(LEAVE)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

/// Current terminal geometry, if stdout is a terminal.
#[inline]
#[must_use]
pub fn terminal_geometry() -> Option<(Width, Height)> {
    terminal_size()
}

/// Log when the panel will not fit the terminal; drawing goes ahead anyway.
pub fn warn_if_clipped(cfg: &Config) {
    if let Some((Width(w), Height(h))) = terminal_geometry() {
        if h < cfg.screen_height {
            warn!(
                terminal_rows = h,
                terminal_cols = w,
                screen_height = cfg.screen_height,
                "terminal shorter than the configured screen height, panel will be clipped"
            );
        }
    }
}
