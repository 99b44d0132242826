//! Diagnostics go to a file: the terminal belongs to the dashboard.

use std::{fs::File, path::Path, sync::Arc};

use tracing_subscriber::EnvFilter;

use crate::core::error::MonitorError;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `path`.  No path, no subscriber.
pub fn init(path: Option<&Path>) -> Result<(), MonitorError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| MonitorError::OpenDiagnostics {
        path: path.to_path_buf(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // a subscriber installed by an embedding program wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
