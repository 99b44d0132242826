use std::path::PathBuf;

use clap::Parser;

use crate::core::{
    color::AnsiCode,
    config::Config,
    constants::{
        DEFAULT_BAR_WIDTH, DEFAULT_MAX_LINE_LENGTH, DEFAULT_SCREEN_HEIGHT,
        DEFAULT_SPACE_BETWEEN_BARS, DEFAULT_VOLTS_MAX, DEFAULT_VOLTS_MIN, TENTHS_PER_VOLT,
    },
    error::MonitorError,
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "battery-graph",
    about = "Live terminal bar chart of battery pack voltages, tailing a data file"
)]
pub struct Cli {
    /// Data file to tail; re-read from the start every time its end is reached
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Append every accepted input line to this file
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Screen height, in lines
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    pub screen_height: u16,

    /// Bar width, in columns
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: u16,

    /// Space between bars, in columns
    #[arg(long, default_value_t = DEFAULT_SPACE_BETWEEN_BARS)]
    pub space_between_bars: u16,

    /// Lowest voltage shown, in whole volts
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VOLTS_MIN / TENTHS_PER_VOLT)]
    pub volts_min: i32,
    /// Highest voltage shown, in whole volts
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VOLTS_MAX / TENTHS_PER_VOLT)]
    pub volts_max: i32,

    /// Longest line read from the data file, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    pub max_line_length: usize,

    /// Pause after each frame, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub frame_interval: u64,

    /// Bar color (name or `#RRGGBB`)
    #[arg(long, default_value = "white")]
    pub color: String,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Volts to tenths of a volt.  Saturates; `build` rejects the oversized span.
#[inline]
fn tenths(volts: i32) -> i32 {
    volts.saturating_mul(TENTHS_PER_VOLT)
}

impl Cli {
    /// Resolve the flags into a validated `Config`.
    pub fn to_config(&self) -> Result<Config, MonitorError> {
        let color = AnsiCode::from_name(&self.color)?;
        let cfg = Config::builder(self.screen_height)
            .bar_width(self.bar_width)
            .space_between_bars(self.space_between_bars)
            .volts_range(tenths(self.volts_min)..=tenths(self.volts_max))
            .max_line_length(self.max_line_length)
            .frame_interval_micros(self.frame_interval.saturating_mul(1000))
            .output_path_opt(self.output_file.clone())
            .bar_color(color)
            .build()?;
        Ok(cfg)
    }
}
