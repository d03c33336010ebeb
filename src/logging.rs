//! JSON line-delimited logging for learning runs.
//!
//! The engine itself never prints; a driver samples the version space after
//! each step and writes one JSON record per line. Records are plain
//! `Serialize` structs so downstream tooling can parse the stream.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Snapshot of the boundary sets after one processed example.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub label: bool,
    pub specific_size: usize,
    pub general_size: usize,
    pub collapsed: bool,
}

/// Outcome of one majority-vote classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub label: bool,
    pub confidence: f64,
    pub hypothesis_count: usize,
}

/// Writes one JSON record per line to any [`Write`] sink.
pub struct JsonLogger<W: Write> {
    writer: W,
}

impl JsonLogger<BufWriter<File>> {
    /// Creates a logger writing to a fresh file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn log<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
