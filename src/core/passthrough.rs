//! Append-only copy of every accepted input line.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use crate::core::error::MonitorError;

/// Open for the lifetime of the monitor; closed on drop.
#[derive(Debug)]
pub struct PassthroughLog {
    file: File,
    scratch: Vec<u8>,
}

impl PassthroughLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, MonitorError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| MonitorError::OpenLog {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            file,
            scratch: Vec::with_capacity(256),
        })
    }

    /// Write `line` plus a newline as one append.
    pub fn append(&mut self, line: &str) -> Result<(), MonitorError> {
        self.scratch.clear();
        self.scratch.extend_from_slice(line.as_bytes());
        self.scratch.push(b'\n');
        self.file
            .write_all(&self.scratch)
            .map_err(MonitorError::WriteLog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_after_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "OLD\n").unwrap();

        let mut log = PassthroughLog::open(&path).unwrap();
        log.append("B,120,H").unwrap();
        log.append("B,121,H").unwrap();
        drop(log);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "OLD\nB,120,H\nB,121,H\n"
        );
    }

    #[test]
    fn unopenable_path_is_an_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.log");
        let err = PassthroughLog::open(&path).unwrap_err();
        assert!(matches!(err, MonitorError::OpenLog { .. }));
    }
}
