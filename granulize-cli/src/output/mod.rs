//! Output formatting module

use anyhow::Result;
use granulize_core::GranulizeOutput;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one granulized document
    fn format_document(&mut self, source: &str, output: &GranulizeOutput) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markup;
pub mod summary;

pub use json::JsonFormatter;
pub use markup::MarkupFormatter;
pub use summary::SummaryFormatter;
