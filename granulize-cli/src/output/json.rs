//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use granulize_core::{GrainCounts, GranulizeOutput};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - collects documents and emits one array at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DocumentRecord {
    /// Where the fragment came from (file path or "stdin")
    pub source: String,
    /// The annotated markup
    pub markup: String,
    /// Per-kind grain counts
    pub counts: GrainCounts,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &str, output: &GranulizeOutput) -> Result<()> {
        self.documents.push(DocumentRecord {
            source: source.to_string(),
            markup: output.markup.clone(),
            counts: output.counts,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
