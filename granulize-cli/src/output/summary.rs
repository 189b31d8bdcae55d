//! Count summary formatter

use super::OutputFormatter;
use anyhow::Result;
use granulize_core::GranulizeOutput;
use std::io::Write;

/// Summary formatter - one line of per-kind counts per document
pub struct SummaryFormatter<W: Write> {
    writer: W,
}

impl<W: Write> SummaryFormatter<W> {
    /// Create a new summary formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for SummaryFormatter<W> {
    fn format_document(&mut self, source: &str, output: &GranulizeOutput) -> Result<()> {
        let counts = &output.counts;
        writeln!(
            self.writer,
            "{}: tags={} words={} characters={} sentences={} phrases={}",
            source,
            counts.tag_count,
            counts.word_count,
            counts.character_count,
            counts.sentence_count,
            counts.phrase_count,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
