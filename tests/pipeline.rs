use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use battery_graph::{
    BarGeometry, Config, Frame, FrameSink, MonitorError, Reading, TailLoop, render_line,
};
use tempfile::TempDir;

/// Keeps every frame and raises the stop flag once `limit` is reached.
struct RecordingSink {
    frames: Vec<Vec<Reading>>,
    limit: usize,
    stop: Arc<AtomicBool>,
    /// `(after, file, line)`: append `line` to `file` once `after` frames are in.
    append_after: Option<(usize, PathBuf, &'static str)>,
}

impl RecordingSink {
    fn new(limit: usize, stop: &Arc<AtomicBool>) -> Self {
        Self {
            frames: Vec::new(),
            limit,
            stop: Arc::clone(stop),
            append_after: None,
        }
    }
}

impl FrameSink for RecordingSink {
    fn render(&mut self, frame: &Frame) -> Result<(), MonitorError> {
        self.frames.push(frame.readings.clone());
        if let Some((after, path, line)) = &self.append_after {
            if self.frames.len() == *after {
                let mut f = OpenOptions::new().append(true).open(path).unwrap();
                writeln!(f, "{line}").unwrap();
            }
        }
        if self.frames.len() >= self.limit {
            self.stop.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}

fn data_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("telemetry.txt");
    fs::write(&path, content).unwrap();
    path
}

fn config() -> Config {
    Config::builder(24).build().unwrap()
}

fn run_until(
    cfg: &Config,
    source: &Path,
    sink: RecordingSink,
    stop: Arc<AtomicBool>,
) -> (Result<battery_graph::TailStats, MonitorError>, RecordingSink) {
    let mut tail = TailLoop::new(cfg, source, sink).with_stop_flag(stop);
    let result = tail.run();
    (result, tail.into_sink())
}

#[test]
fn invalid_line_is_skipped_and_valid_lines_are_logged() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "T1,B,120,131,H,X\nT2,B,12o,H\nT3,B,95,H\n");
    let out = dir.path().join("copy.txt");
    let cfg = Config::builder(24).output_path(&out).build().unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(2, &stop);
    let (result, sink) = run_until(&cfg, &source, sink, stop);

    let stats = result.unwrap();
    assert_eq!(sink.frames, vec![vec![120, 131], vec![95]]);
    assert_eq!((stats.frames, stats.skipped, stats.passes), (2, 1, 0));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "T1,B,120,131,H,X\nT3,B,95,H\n"
    );
}

#[test]
fn static_file_is_reread_after_end_of_file() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,100,H\n\nB,110,H\n");

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(6, &stop);
    let (result, sink) = run_until(&config(), &source, sink, stop);

    let stats = result.unwrap();
    assert_eq!(sink.frames, [[100], [110], [100], [110], [100], [110]]);
    assert_eq!(stats.passes, 2);
    assert_eq!(stats.skipped, 3);
}

#[test]
fn appended_lines_are_picked_up() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,100,H\nB,110,H\n");

    let stop = Arc::new(AtomicBool::new(false));
    let mut sink = RecordingSink::new(5, &stop);
    sink.append_after = Some((2, source.clone(), "B,140,141,H"));
    let (result, sink) = run_until(&config(), &source, sink, stop);

    result.unwrap();
    // appended while the reader sat at end of file, so read in the same pass
    assert_eq!(
        sink.frames,
        vec![vec![100], vec![110], vec![140, 141], vec![100], vec![110]]
    );
}

#[test]
fn long_lines_are_read_in_pieces() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,120,130,H\n");
    let cfg = Config::builder(24).max_line_length(8).build().unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(2, &stop);
    let (result, sink) = run_until(&cfg, &source, sink, stop);

    result.unwrap();
    // "B,120,1" then "30,H\n", which has no open marker
    assert_eq!(sink.frames, vec![vec![120, 1], vec![]]);
}

#[test]
fn frames_are_paced() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,100,H\n");
    let cfg = Config::builder(24)
        .frame_interval_micros(20_000)
        .build()
        .unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(3, &stop);
    let started = Instant::now();
    let (result, _) = run_until(&cfg, &source, sink, stop);

    result.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[test]
fn stop_during_a_long_pause_returns_promptly() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,100,H\nB,110,H\n");
    let cfg = Config::builder(24)
        .frame_interval_micros(3_000_000)
        .build()
        .unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(usize::MAX, &stop);
    let raiser = {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            stop.store(true, Ordering::Relaxed);
        })
    };
    let started = Instant::now();
    let (result, sink) = run_until(&cfg, &source, sink, stop);
    let elapsed = started.elapsed();
    raiser.join().unwrap();

    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
    assert_eq!(result.unwrap().frames, 1);
    assert_eq!(sink.frames, [[100]]);
}

#[test]
fn missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(1, &stop);
    let (result, sink) = run_until(&config(), &dir.path().join("absent.txt"), sink, stop);

    assert!(matches!(result, Err(MonitorError::OpenSource { .. })));
    assert!(sink.frames.is_empty());
}

#[test]
fn read_failure_is_not_end_of_file() {
    // opening a directory succeeds, reading it does not
    let dir = TempDir::new().unwrap();
    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(1, &stop);
    let (result, _) = run_until(&config(), dir.path(), sink, stop);

    assert!(matches!(result, Err(MonitorError::Read(_))));
}

#[test]
fn unopenable_output_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let source = data_file(&dir, "B,100,H\n");
    let cfg = Config::builder(24)
        .output_path(dir.path().join("no").join("copy.txt"))
        .build()
        .unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let sink = RecordingSink::new(1, &stop);
    let (result, sink) = run_until(&cfg, &source, sink, stop);

    assert!(matches!(result, Err(MonitorError::OpenLog { .. })));
    assert!(sink.frames.is_empty());
}

#[test]
fn raised_stop_flag_returns_before_opening() {
    let dir = TempDir::new().unwrap();
    let stop = Arc::new(AtomicBool::new(true));
    let sink = RecordingSink::new(1, &stop);
    let (result, _) = run_until(&config(), &dir.path().join("absent.txt"), sink, stop);

    assert_eq!(result.unwrap(), battery_graph::TailStats::default());
}

#[test]
fn one_shot_render_draws_the_bars() {
    let cfg = config();
    let mut out = Vec::new();
    let frame = render_line(" ID4, B, 150, 80, H\r\n", &cfg, &mut out)
        .unwrap()
        .unwrap();
    assert_eq!(frame.readings, [150, 80]);

    let mut parser = vt100::Parser::new(24, 80, 0);
    parser.process(&out);
    let g = BarGeometry::new(&cfg);
    let lit = |level: i32, bar: usize| {
        parser
            .screen()
            .cell(g.vertical_cell(level) as u16, g.horizontal_cell(bar, 0) as u16)
            .is_some_and(vt100::Cell::inverse)
    };
    assert!(lit(g.levels(), 0));
    assert!(lit(0, 1));
    assert!(!lit(1, 1));

    assert!(render_line("B,1,h", &cfg, Vec::new()).unwrap().is_none());
}
