//! Pure mapping from (battery, level) to screen cells and from voltage to bar height.
//!
//! Rows and columns are 0-based, row 0 at the top.  Level 0 is the lowest
//! bar row; negative levels address the label and status rows beneath it.

use crate::core::{
    config::Config,
    constants::{OFFSET_BOTTOM, OFFSET_LEFT, TENTHS_PER_VOLT},
    data::Reading,
};

#[derive(Clone, Copy, Debug)]
pub struct BarGeometry {
    screen_height: i32,
    bar_width: i32,
    space_between_bars: i32,
    volts_min: i32,
    volts_max: i32,
    levels: i32,
    volts_step: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn new(cfg: &Config) -> Self {
        Self {
            screen_height: i32::from(cfg.screen_height),
            bar_width: i32::from(cfg.bar_width),
            space_between_bars: i32::from(cfg.space_between_bars),
            volts_min: cfg.volts_min,
            volts_max: cfg.volts_max,
            levels: cfg.levels(),
            volts_step: cfg.volts_step(),
        }
    }

    #[inline]
    #[must_use]
    pub fn levels(&self) -> i32 {
        self.levels
    }

    /// Screen row of a level counted up from the bottom bar row.
    #[inline]
    #[must_use]
    pub fn vertical_cell(&self, level_from_bottom: i32) -> i32 {
        self.screen_height - OFFSET_BOTTOM - level_from_bottom
    }

    /// Screen column of `column` cells into bar number `bar`.
    #[inline]
    #[must_use]
    pub fn horizontal_cell(&self, bar: usize, column: i32) -> i32 {
        let bar = i32::try_from(bar).unwrap_or(i32::MAX);
        (self.space_between_bars + self.bar_width)
            .saturating_mul(bar)
            .saturating_add(1 + OFFSET_LEFT + column)
    }

    /// Row carrying the 1-based battery numbers.
    #[inline]
    #[must_use]
    pub fn label_row(&self) -> i32 {
        self.vertical_cell(-1)
    }

    /// Row the cursor rests on between frames.
    #[inline]
    #[must_use]
    pub fn status_row(&self) -> i32 {
        self.vertical_cell(-2)
    }

    /// Number of lit levels for a reading, in `1..=levels + 1`.
    ///
    /// The reading is clamped to the configured range first; ties round
    /// away from zero.
    #[inline]
    #[must_use]
    pub fn filled_levels(&self, voltage: Reading) -> i32 {
        let clamped = voltage.clamp(self.volts_min, self.volts_max);
        let steps = f64::from(clamped - self.volts_min) / self.volts_step;
        // bounded by `levels` after the clamp, so the cast cannot truncate
        1 + steps.round() as i32
    }

    /// Axis label, in volts, printed beside `level`.
    #[inline]
    #[must_use]
    pub fn axis_volts(&self, level: i32) -> f64 {
        (f64::from(self.volts_min) + f64::from(level) * self.volts_step)
            / f64::from(TENTHS_PER_VOLT)
    }
}
