//! Centralised error types used across the crate.

use std::{error::Error, fmt, io, path::PathBuf};

use crate::core::color::ColorError;

/// Precise configuration faults.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidRange { low: i32, high: i32 },
    RangeTooWide { low: i32, high: i32 },
    TooShort { screen_height: u16, min: u16 },
    ZeroWidth,
    LineLengthTooSmall(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRange { low, high } => write!(
                f,
                "volts_min {:.1} must be < volts_max {:.1}",
                f64::from(*low) / 10.0,
                f64::from(*high) / 10.0
            ),
            ConfigError::RangeTooWide { low, high } => write!(
                f,
                "voltage range {:.1}..{:.1} is too wide",
                f64::from(*low) / 10.0,
                f64::from(*high) / 10.0
            ),
            ConfigError::TooShort { screen_height, min } => {
                write!(f, "screen height {screen_height} too small: need ≥{min}")
            }
            ConfigError::ZeroWidth => f.write_str("bar width must be at least 1 column"),
            ConfigError::LineLengthTooSmall(n) => {
                write!(f, "max line length {n} too small: need ≥2 bytes")
            }
        }
    }
}
impl Error for ConfigError {}

/// Top-level error type bubbled up by public APIs.
///
/// Every variant except `Config` and `Color` is fatal for a running monitor.
#[derive(Debug)]
pub enum MonitorError {
    Config(ConfigError),
    Color(ColorError),
    OpenSource { path: PathBuf, source: io::Error },
    OpenLog { path: PathBuf, source: io::Error },
    OpenDiagnostics { path: PathBuf, source: io::Error },
    WriteLog(io::Error),
    Read(io::Error),
    Terminal(io::Error),
    Signal(ctrlc::Error),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(e) => write!(f, "{e}"),
            MonitorError::Color(e) => write!(f, "{e}"),
            MonitorError::OpenSource { path, source } => {
                write!(f, "failed to open data file {}: {source}", path.display())
            }
            MonitorError::OpenLog { path, source } => {
                write!(f, "failed to open output file {}: {source}", path.display())
            }
            MonitorError::OpenDiagnostics { path, source } => {
                write!(f, "failed to create log file {}: {source}", path.display())
            }
            MonitorError::WriteLog(e) => write!(f, "failed to write to output file: {e}"),
            MonitorError::Read(e) => write!(f, "failed to read data file: {e}"),
            MonitorError::Terminal(e) => write!(f, "terminal: {e}"),
            MonitorError::Signal(e) => write!(f, "failed to install interrupt handler: {e}"),
        }
    }
}

impl Error for MonitorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MonitorError::Config(e) => Some(e),
            MonitorError::Color(e) => Some(e),
            MonitorError::OpenSource { source, .. }
            | MonitorError::OpenLog { source, .. }
            | MonitorError::OpenDiagnostics { source, .. } => Some(source),
            MonitorError::WriteLog(e) | MonitorError::Read(e) | MonitorError::Terminal(e) => {
                Some(e)
            }
            MonitorError::Signal(e) => Some(e),
        }
    }
}

// automatic conversions
impl From<ConfigError> for MonitorError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
impl From<ColorError> for MonitorError {
    fn from(e: ColorError) -> Self {
        Self::Color(e)
    }
}
/// Bare I/O errors reaching the top level come from drawing.
impl From<io::Error> for MonitorError {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e)
    }
}
impl From<ctrlc::Error> for MonitorError {
    fn from(e: ctrlc::Error) -> Self {
        Self::Signal(e)
    }
}
