//! Where shared grid text ends up.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Destination for share text, standing in for a clipboard or share sheet.
pub trait ShareSink {
    fn share(&mut self, text: &str) -> io::Result<()>;
}

/// Writes share text to any writer, normally stdout.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ShareSink for WriterSink<W> {
    fn share(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

/// Writes share text to a file, replacing its contents.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ShareSink for FileSink {
    fn share(&mut self, text: &str) -> io::Result<()> {
        fs::write(&self.path, format!("{}\n", text))
    }
}
