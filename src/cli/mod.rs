mod handlers;
pub mod logging;
pub mod parse;

use clap::Parser;
pub use parse::Cli;

use crate::core::error::MonitorError;

/// Parse the command line and run the monitor.  Returns once interrupted.
pub fn run() -> Result<(), MonitorError> {
    let cli = parse::Cli::parse();
    let stats = handlers::monitor(cli)?;
    handlers::farewell(&stats);
    Ok(())
}
