use meson_runner_core::{OutputSink, Result};
use std::io::Write;

/// Output panel backed by a writer, normally stdout.
///
/// A terminal cannot take text back, so `clear` only forgets that anything
/// was written and hiding the panel suppresses further output.
pub struct TerminalSink<W: Write> {
    writer: W,
    visible: bool,
    written: usize,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            visible: false,
            written: 0,
        }
    }

    /// Bytes appended since the last clear
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn append(&mut self, text: &str) -> Result<()> {
        self.written += text.len();
        if self.visible {
            self.writer.write_all(text.as_bytes())?;
            self.writer.flush()?;
        }
        Ok(())
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_active(&self) -> bool {
        self.visible
    }

    fn clear(&mut self) {
        self.written = 0;
    }
}
