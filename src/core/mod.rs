//! Aggregates the “business logic” layer: config, parsing, errors.

pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod passthrough;
pub mod sanitize;
pub mod tokenize;

// re-export frequently-used items for convenience
pub use color::{AnsiCode, ColorError};
pub use config::{Config, ConfigBuilder};
pub use constants::{OFFSET_BOTTOM, OFFSET_LEFT, TENTHS_PER_VOLT};
pub use data::{Frame, Reading};
pub use error::{ConfigError, MonitorError};
pub use sanitize::{LineRejection, sanitize};
pub use tokenize::{ZoneState, extract_voltages};
