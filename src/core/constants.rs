//! A collection of constants.

/// Columns reserved left of the first bar for the voltage axis labels
pub const OFFSET_LEFT: i32 = 10;
/// Rows reserved under the lowest bar level for labels and the status line
pub const OFFSET_BOTTOM: i32 = 3;

/// Axis labels start this many columns left of `OFFSET_LEFT`
pub const AXIS_LABEL_INDENT: i32 = 6;
/// Every n-th level gets a voltage label on the axis
pub const AXIS_LABEL_STRIDE: usize = 2;

/// Readings are stored in tenths of a volt.
///
/// 12.3 V becomes 123
pub const TENTHS_PER_VOLT: i32 = 10;

pub const DEFAULT_SCREEN_HEIGHT: u16 = 24;
pub const DEFAULT_BAR_WIDTH: u16 = 3;
pub const DEFAULT_SPACE_BETWEEN_BARS: u16 = 3;
/// 8.0 V
pub const DEFAULT_VOLTS_MIN: i32 = 80;
/// 15.0 V
pub const DEFAULT_VOLTS_MAX: i32 = 150;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 512;
