//! Bar panel renderer.
//!
//! - static chrome (axis labels, captions) drawn once per session
//! - one column of reverse-video cells per battery, redrawn every frame
//! - no back buffer: cells above a bar are explicitly blanked so a shorter
//!   reading erases a taller one
//! - each frame is assembled in one byte buffer and written in one go

use std::io::{self, Write};

use crate::{
    core::{
        color::AnsiCode,
        config::Config,
        constants::{AXIS_LABEL_INDENT, AXIS_LABEL_STRIDE, OFFSET_LEFT},
        data::Frame,
        error::MonitorError,
    },
    render::geometry::BarGeometry,
};

/// Anything that can show one frame.  The tail loop only talks to this.
pub trait FrameSink {
    fn render(&mut self, frame: &Frame) -> Result<(), MonitorError>;
}

// --- Helpers ---

#[inline]
fn push_usize_dec(buf: &mut Vec<u8>, mut n: usize) {
    let mut tmp = [0u8; 20];
    let mut i = tmp.len();

    // write digits in reverse
    loop {
        i -= 1;
        tmp[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    buf.extend_from_slice(&tmp[i..]);
}

/// Cursor to 0-based `(row, col)`; ANSI addresses are 1-based.
#[inline]
fn push_goto(buf: &mut Vec<u8>, row: i32, col: i32) {
    buf.extend_from_slice(b"\x1b[");
    push_usize_dec(buf, usize::try_from(row).unwrap_or(0) + 1);
    buf.push(b';');
    push_usize_dec(buf, usize::try_from(col).unwrap_or(0) + 1);
    buf.push(b'H');
}

#[inline]
fn push_code(buf: &mut Vec<u8>, code: AnsiCode) {
    buf.extend_from_slice(code.as_str().as_bytes());
}

pub struct BarRenderer<W: Write> {
    out: W,
    geom: BarGeometry,
    bar_color: AnsiCode,
    buf: Vec<u8>,
    blank: Vec<u8>,
}

impl<W: Write> BarRenderer<W> {
    #[must_use]
    pub fn new(out: W, cfg: &Config) -> Self {
        let geom = BarGeometry::new(cfg);
        Self {
            out,
            geom,
            bar_color: cfg.bar_color,
            buf: Vec::with_capacity(4096),
            blank: vec![b' '; usize::from(cfg.bar_width)],
        }
    }

    /// Hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn park_cursor(&mut self) {
        push_goto(&mut self.buf, self.geom.status_row(), 0);
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.buf.clear();
        self.out.flush()
    }

    /// Voltage axis and captions; they depend on the config only.
    pub fn draw_static_panel(&mut self) -> io::Result<()> {
        let label_col = OFFSET_LEFT - AXIS_LABEL_INDENT;
        self.buf.clear();

        push_code(&mut self.buf, AnsiCode::cyan());
        push_code(&mut self.buf, AnsiCode::bold());
        push_goto(&mut self.buf, 0, label_col);
        self.buf.extend_from_slice(b"Volts:");
        push_code(&mut self.buf, AnsiCode::reset());

        push_code(&mut self.buf, AnsiCode::cyan());
        for level in (0..=self.geom.levels()).step_by(AXIS_LABEL_STRIDE) {
            push_goto(&mut self.buf, self.geom.vertical_cell(level), label_col);
            write!(self.buf, "{:5.2}", self.geom.axis_volts(level))?;
        }

        push_code(&mut self.buf, AnsiCode::bold());
        push_goto(&mut self.buf, self.geom.label_row(), 1);
        self.buf.extend_from_slice(b"Battery:");
        push_code(&mut self.buf, AnsiCode::reset());

        self.park_cursor();
        self.flush_buf()
    }

    /// Redraw every bar of `frame` plus the battery number row.
    pub fn draw_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.buf.clear();
        self.push_battery_labels(frame.len())?;

        for (bar, reading) in frame.iter().enumerate() {
            let current = self.geom.filled_levels(reading);
            let column = self.geom.horizontal_cell(bar, 0);

            push_code(&mut self.buf, AnsiCode::reverse());
            push_code(&mut self.buf, self.bar_color);
            for level in 0..current {
                push_goto(&mut self.buf, self.geom.vertical_cell(level), column);
                self.buf.extend_from_slice(&self.blank);
            }
            push_code(&mut self.buf, AnsiCode::reset());

            for level in current..=self.geom.levels() {
                push_goto(&mut self.buf, self.geom.vertical_cell(level), column);
                self.buf.extend_from_slice(&self.blank);
            }
        }

        self.park_cursor();
        self.flush_buf()
    }

    fn push_battery_labels(&mut self, count: usize) -> io::Result<()> {
        push_code(&mut self.buf, AnsiCode::cyan());
        for bar in 0..count {
            push_goto(&mut self.buf, self.geom.label_row(), self.geom.horizontal_cell(bar, 0));
            write!(self.buf, "{:2}", bar + 1)?;
        }
        push_code(&mut self.buf, AnsiCode::reset());
        Ok(())
    }
}

impl<W: Write> FrameSink for BarRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), MonitorError> {
        Ok(self.draw_frame(frame)?)
    }
}
