//! Public-facing crate root – re-exports + one-shot helper.
//!
//! Pipeline per input line: [`sanitize`] → [`extract_voltages`] →
//! [`FrameSink::render`], driven by [`TailLoop`].

pub mod cli;
pub mod core;
pub mod render;
pub mod tail;

pub use crate::core::{
    color::{AnsiCode, ColorError},
    config::{Config, ConfigBuilder},
    data::{Frame, Reading},
    error::{ConfigError, MonitorError},
    sanitize::{LineRejection, sanitize},
    tokenize::extract_voltages,
};

pub use render::{BarGeometry, BarRenderer, FrameSink, TerminalSession};
pub use tail::{TailLoop, TailStats};

/// Draw a single line of telemetry onto `out` with a fresh static panel.
///
/// Returns `Ok(None)` when the line is rejected by the sanitizer.
pub fn render_line<W: std::io::Write>(
    line: &str,
    cfg: &Config,
    out: W,
) -> Result<Option<Frame>, MonitorError> {
    let Ok(clean) = sanitize(line.as_bytes()) else {
        return Ok(None);
    };
    let frame = extract_voltages(&clean);
    let mut renderer = BarRenderer::new(out, cfg);
    renderer.draw_static_panel()?;
    renderer.render(&frame)?;
    Ok(Some(frame))
}
