//! Output sink: the append-only corpus file.
//!
//! Owned by the coordinating thread only. Workers never write; their batches arrive through
//! the pool's outcome channel, which serialises them.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DwkitError, Result};
use crate::utils::tempfiles::ensure_output_file;

pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
    lines_written: usize,
}

impl OutputSink {
    /// Open `path` for appending, creating it (and its parent directory) if needed.
    pub fn open(path: &Path) -> Result<Self> {
        ensure_output_file(path)?;
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| DwkitError::io(format!("open output {}", path.display()), e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    /// Write one document's lines contiguously, each terminated by `\n`. Empty batches write nothing.
    pub fn write_batch(&mut self, lines: &[String]) -> Result<usize> {
        for line in lines {
            self.writer
                .write_all(line.as_bytes())
                .and_then(|_| self.writer.write_all(b"\n"))
                .map_err(|e| DwkitError::io(format!("write {}", self.path.display()), e))?;
        }
        self.lines_written += lines.len();
        Ok(lines.len())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| DwkitError::io(format!("flush {}", self.path.display()), e))
    }

    /// Flush and close. Returns the number of lines written through this sink.
    pub fn finish(mut self) -> Result<usize> {
        self.flush()?;
        Ok(self.lines_written)
    }
}
