//! Annotated-markup output formatter

use super::OutputFormatter;
use anyhow::Result;
use granulize_core::GranulizeOutput;
use std::io::Write;

/// Markup formatter - writes the annotated fragment as-is
pub struct MarkupFormatter<W: Write> {
    writer: W,
}

impl<W: Write> MarkupFormatter<W> {
    /// Create a new markup formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkupFormatter<W> {
    fn format_document(&mut self, _source: &str, output: &GranulizeOutput) -> Result<()> {
        writeln!(self.writer, "{}", output.markup)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
