use std::{
    io::stdout,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::info;

use crate::{
    core::error::MonitorError,
    render::{BarRenderer, TerminalSession, warn_if_clipped},
    tail::{TailLoop, TailStats},
};

use super::{logging, parse::Cli};

/// Draw the dashboard until Ctrl-C or a fatal error.
///
/// The terminal is restored before this returns, on every path.
pub fn monitor(cli: Cli) -> Result<TailStats, MonitorError> {
    let cfg = cli.to_config()?;
    logging::init(cli.log_file.as_deref())?;
    info!(?cfg, "starting battery monitor");
    warn_if_clipped(&cfg);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;
    }

    let session = TerminalSession::start().map_err(MonitorError::Terminal)?;
    let mut renderer = BarRenderer::new(stdout(), &cfg);
    renderer.draw_static_panel()?;

    let mut tail = TailLoop::new(&cfg, cli.source, renderer).with_stop_flag(stop);
    let result = tail.run();

    // restore the screen before the caller prints anything
    drop(session);
    result
}

/// Print the post-run notice for an interrupted session.
pub fn farewell(stats: &TailStats) {
    eprintln!(
        "interrupted: {} frames drawn, {} lines skipped, {} passes over the data file",
        stats.frames, stats.skipped, stats.passes
    );
}
