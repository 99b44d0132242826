//! Run-time configuration object + fluent builder.

use std::{path::PathBuf, time::Duration};

use crate::core::{
    color::AnsiCode,
    constants::{
        DEFAULT_BAR_WIDTH, DEFAULT_MAX_LINE_LENGTH, DEFAULT_SPACE_BETWEEN_BARS, DEFAULT_VOLTS_MAX,
        DEFAULT_VOLTS_MIN, OFFSET_BOTTOM,
    },
    error::ConfigError,
};

/// Immutable parameters shared by the geometry, renderer and tail loop.
///
/// Voltages are in tenths of a volt.
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_height: u16,
    pub bar_width: u16,
    pub space_between_bars: u16,
    pub volts_min: i32,
    pub volts_max: i32,
    pub max_line_length: usize,
    pub frame_interval_micros: u64,
    pub output_path: Option<PathBuf>,
    pub bar_color: AnsiCode,
}

impl Config {
    #[inline]
    pub fn builder(screen_height: u16) -> ConfigBuilder {
        ConfigBuilder::new(screen_height)
    }

    /// Number of displayable levels above the lowest one.
    #[inline]
    #[must_use]
    pub fn levels(&self) -> i32 {
        i32::from(self.screen_height) - 1 - OFFSET_BOTTOM
    }

    /// Tenths of a volt covered by one level.
    #[inline]
    #[must_use]
    pub fn volts_step(&self) -> f64 {
        f64::from(self.volts_max - self.volts_min) / f64::from(self.levels())
    }

    #[inline]
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(self.frame_interval_micros)
    }
}

/// Fluent builder; everything but the screen height has a default.
#[derive(Debug)]
pub struct ConfigBuilder {
    screen_height: u16,
    bar_width: Option<u16>,
    space_between_bars: Option<u16>,
    volts_min: Option<i32>,
    volts_max: Option<i32>,
    max_line_length: Option<usize>,
    frame_interval_micros: u64,
    output_path: Option<PathBuf>,
    bar_color: Option<AnsiCode>,
}

impl ConfigBuilder {
    pub(crate) fn new(screen_height: u16) -> Self {
        Self {
            screen_height,
            bar_width: None,
            space_between_bars: None,
            volts_min: None,
            volts_max: None,
            max_line_length: None,
            frame_interval_micros: 0,
            output_path: None,
            bar_color: None,
        }
    }

    #[inline]
    pub fn bar_width(mut self, w: u16) -> Self {
        self.bar_width = Some(w);
        self
    }
    #[inline]
    pub fn space_between_bars(mut self, s: u16) -> Self {
        self.space_between_bars = Some(s);
        self
    }
    /// Voltage range in tenths of a volt.
    #[inline]
    pub fn volts_range(mut self, r: std::ops::RangeInclusive<i32>) -> Self {
        self.volts_min = Some(*r.start());
        self.volts_max = Some(*r.end());
        self
    }
    #[inline]
    pub fn max_line_length(mut self, n: usize) -> Self {
        self.max_line_length = Some(n);
        self
    }
    #[inline]
    pub fn frame_interval_micros(mut self, us: u64) -> Self {
        self.frame_interval_micros = us;
        self
    }
    #[inline]
    pub fn output_path(mut self, p: impl Into<PathBuf>) -> Self {
        self.output_path = Some(p.into());
        self
    }
    #[inline]
    pub fn output_path_opt(mut self, p: Option<PathBuf>) -> Self {
        if p.is_some() {
            self.output_path = p;
        }
        self
    }
    #[inline]
    pub fn bar_color<C: Into<AnsiCode>>(mut self, c: C) -> Self {
        self.bar_color = Some(c.into());
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let volts_min = self.volts_min.unwrap_or(DEFAULT_VOLTS_MIN);
        let volts_max = self.volts_max.unwrap_or(DEFAULT_VOLTS_MAX);
        if volts_min >= volts_max {
            return Err(ConfigError::InvalidRange {
                low: volts_min,
                high: volts_max,
            });
        }
        // the span must fit the reading type; geometry subtracts in `i32`
        if volts_max.checked_sub(volts_min).is_none() {
            return Err(ConfigError::RangeTooWide {
                low: volts_min,
                high: volts_max,
            });
        }
        // one level above the floor, the floor itself, the bottom offset
        let min_height = 2 + OFFSET_BOTTOM as u16;
        if self.screen_height < min_height {
            return Err(ConfigError::TooShort {
                screen_height: self.screen_height,
                min: min_height,
            });
        }
        let bar_width = self.bar_width.unwrap_or(DEFAULT_BAR_WIDTH);
        if bar_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        let max_line_length = self.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH);
        if max_line_length < 2 {
            return Err(ConfigError::LineLengthTooSmall(max_line_length));
        }
        Ok(Config {
            screen_height: self.screen_height,
            bar_width,
            space_between_bars: self
                .space_between_bars
                .unwrap_or(DEFAULT_SPACE_BETWEEN_BARS),
            volts_min,
            volts_max,
            max_line_length,
            frame_interval_micros: self.frame_interval_micros,
            output_path: self.output_path,
            bar_color: self.bar_color.unwrap_or_default(),
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<ConfigBuilder> for Result<Config, ConfigError> {
    fn from(b: ConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_dashboard() {
        let cfg = Config::builder(24).build().unwrap();
        assert_eq!(cfg.levels(), 20);
        assert_eq!((cfg.volts_min, cfg.volts_max), (80, 150));
        assert!((cfg.volts_step() - 3.5).abs() < f64::EPSILON);
        assert_eq!(cfg.max_line_length, 512);
        assert_eq!(cfg.frame_interval(), Duration::ZERO);
        assert!(cfg.output_path.is_none());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Config::builder(24).volts_range(150..=80).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { low: 150, high: 80 });
        let err = Config::builder(24).volts_range(90..=90).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { low: 90, high: 90 });
    }

    #[test]
    fn range_wider_than_a_reading_is_rejected() {
        let err = Config::builder(24)
            .volts_range(i32::MIN..=i32::MAX)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::RangeTooWide {
                low: i32::MIN,
                high: i32::MAX
            }
        );
        assert!(Config::builder(24).volts_range(0..=i32::MAX).build().is_ok());
    }

    #[test]
    fn screen_must_leave_a_level() {
        assert_eq!(
            Config::builder(4).build().unwrap_err(),
            ConfigError::TooShort {
                screen_height: 4,
                min: 5
            }
        );
        assert_eq!(Config::builder(5).build().unwrap().levels(), 1);
    }

    #[test]
    fn degenerate_widths_are_rejected() {
        assert_eq!(
            Config::builder(24).bar_width(0).build().unwrap_err(),
            ConfigError::ZeroWidth
        );
        assert_eq!(
            Config::builder(24).max_line_length(1).build().unwrap_err(),
            ConfigError::LineLengthTooSmall(1)
        );
    }

    #[test]
    fn interval_is_microseconds() {
        let cfg: Result<Config, ConfigError> =
            Config::builder(24).frame_interval_micros(250_000).into();
        assert_eq!(cfg.unwrap().frame_interval(), Duration::from_millis(250));
    }
}
