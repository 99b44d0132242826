//! Tail loop: open → read → EOF → reopen, forever.
//!
//! "Tailing" here is polling by full reopen: every pass reads the data file
//! from the start, so appended lines show up on the next pass.  The loop
//! only ends on a fatal error or when the stop flag is raised.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, error, info, trace};

use crate::{
    core::{
        config::Config,
        data::read_line_capped,
        error::MonitorError,
        passthrough::PassthroughLog,
        sanitize::sanitize,
        tokenize::extract_voltages,
    },
    render::FrameSink,
};

const READ_BUF_CAP: usize = 64 * 1024;
/// Longest stretch the frame pause sleeps without looking at the stop flag.
const PAUSE_SLICE: Duration = Duration::from_millis(10);

/// Counters reported when the loop is stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TailStats {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Lines dropped by the sanitizer.
    pub skipped: u64,
    /// Completed open-to-EOF passes over the data file.
    pub passes: u64,
}

/// How one pass over the file ended.
enum PassEnd {
    EndOfFile,
    Stopped,
}

pub struct TailLoop<'a, S: FrameSink> {
    cfg: &'a Config,
    source: PathBuf,
    sink: S,
    stop: Arc<AtomicBool>,
    stats: TailStats,
}

impl<'a, S: FrameSink> TailLoop<'a, S> {
    pub fn new(cfg: &'a Config, source: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            cfg,
            source: source.into(),
            sink,
            stop: Arc::new(AtomicBool::new(false)),
            stats: TailStats::default(),
        }
    }

    /// Share an externally owned stop flag (e.g. one set from Ctrl-C).
    ///
    /// `run` returns at the next line boundary, or mid-pause, once it is raised.
    #[must_use]
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    #[inline]
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Run until stopped.  Only ever returns `Ok` after a stop request.
    pub fn run(&mut self) -> Result<TailStats, MonitorError> {
        let result = self.run_inner();
        if let Err(e) = &result {
            error!(error = %e, source = %self.source.display(), "monitor stopped");
        }
        result
    }

    fn run_inner(&mut self) -> Result<TailStats, MonitorError> {
        let mut log = self
            .cfg
            .output_path
            .as_deref()
            .map(PassthroughLog::open)
            .transpose()?;
        let interval = self.cfg.frame_interval();
        // one byte of the line budget is reserved, as with a terminated buffer
        let cap = self.cfg.max_line_length - 1;

        info!(
            source = %self.source.display(),
            passthrough = ?self.cfg.output_path,
            "tailing data file"
        );

        let mut buf = Vec::with_capacity(cap.min(READ_BUF_CAP));
        loop {
            if self.stopped() {
                break;
            }
            let file = open_source(&self.source)?;
            let mut rdr = BufReader::with_capacity(READ_BUF_CAP, file);

            match self.pass(&mut rdr, &mut buf, cap, log.as_mut(), interval)? {
                PassEnd::EndOfFile => {
                    self.stats.passes += 1;
                    debug!(
                        pass = self.stats.passes,
                        frames = self.stats.frames,
                        "end of file, reopening"
                    );
                }
                PassEnd::Stopped => break,
            }
            // `rdr` and its file handle are dropped here, before the reopen
        }

        info!(
            frames = self.stats.frames,
            skipped = self.stats.skipped,
            passes = self.stats.passes,
            "tail loop stopped"
        );
        Ok(self.stats)
    }

    fn pass(
        &mut self,
        rdr: &mut BufReader<File>,
        buf: &mut Vec<u8>,
        cap: usize,
        mut log: Option<&mut PassthroughLog>,
        interval: Duration,
    ) -> Result<PassEnd, MonitorError> {
        loop {
            let n = read_line_capped(rdr, buf, cap).map_err(MonitorError::Read)?;
            if n == 0 {
                return Ok(PassEnd::EndOfFile);
            }
            self.handle_line(&buf[..], log.as_deref_mut(), interval)?;
            if self.stopped() {
                return Ok(PassEnd::Stopped);
            }
        }
    }

    fn handle_line(
        &mut self,
        raw: &[u8],
        log: Option<&mut PassthroughLog>,
        interval: Duration,
    ) -> Result<(), MonitorError> {
        let clean = match sanitize(raw) {
            Ok(clean) => clean,
            Err(why) => {
                self.stats.skipped += 1;
                trace!(%why, "skipping line");
                return Ok(());
            }
        };

        if let Some(log) = log {
            log.append(&clean)?;
        }

        let frame = extract_voltages(&clean);
        self.sink.render(&frame)?;
        self.stats.frames += 1;
        debug!(batteries = frame.len(), "frame drawn");

        self.pause(interval);
        Ok(())
    }

    /// Sleep for the frame interval in short slices, waking early on stop.
    fn pause(&self, interval: Duration) {
        if interval.is_zero() {
            return;
        }
        // `None` only for intervals too long to add to a clock reading
        let deadline = Instant::now().checked_add(interval);
        while !self.stopped() {
            let left = deadline.map_or(PAUSE_SLICE, |d| {
                d.saturating_duration_since(Instant::now())
            });
            if left.is_zero() {
                break;
            }
            thread::sleep(left.min(PAUSE_SLICE));
        }
    }
}

fn open_source(path: &Path) -> Result<File, MonitorError> {
    File::open(path).map_err(|source| MonitorError::OpenSource {
        path: path.to_path_buf(),
        source,
    })
}
