//! Process command implementation

use crate::config::load_options;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, MarkupFormatter, OutputFormatter, SummaryFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use granulize_core::{GranulizeOptions, Granulizer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); reads stdin when absent
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markup")]
    pub format: OutputFormat,

    /// Configuration file (TOML overlay on the defaults)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Produce character grains
    #[arg(long)]
    pub characters: bool,

    /// Skip tag grains
    #[arg(long)]
    pub no_tags: bool,

    /// Skip word grains
    #[arg(long)]
    pub no_words: bool,

    /// Skip sentence boundary detection
    #[arg(long)]
    pub no_sentences: bool,

    /// Skip phrase boundary detection
    #[arg(long)]
    pub no_phrases: bool,

    /// Marker attribute name
    #[arg(long, value_name = "NAME")]
    pub attribute: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Annotated markup fragments
    Markup,
    /// JSON array of documents with markup and counts
    Json,
    /// One line of per-kind counts per document
    Summary,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting markup granulization");
        log::debug!("Arguments: {:?}", self);

        let granulizer = Granulizer::with_options(self.resolve_options()?)
            .context("Invalid configuration")?;

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(std::io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Markup => Box::new(MarkupFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Summary => Box::new(SummaryFormatter::new(writer)),
        };

        if self.input.is_empty() {
            let fragment = FileReader::read_stdin()?;
            let output = granulizer.granulize(&fragment);
            formatter.format_document("stdin", &output)?;
        } else {
            let files = resolve_patterns(&self.input)?;
            log::info!("Processing {} file(s)", files.len());

            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(files.len() as u64);

            for path in &files {
                let fragment = FileReader::read_text(path)?;
                let output = granulizer.granulize(&fragment);
                formatter.format_document(&path.display().to_string(), &output)?;
                progress.file_completed(&path.display().to_string());
            }
            progress.finish();
        }

        formatter.finish()
    }

    /// Merge the config file overlay with command-line flag overrides
    fn resolve_options(&self) -> Result<GranulizeOptions> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => GranulizeOptions::default(),
        };

        if self.characters {
            options.characters = Some(true);
        }
        if self.no_tags {
            options.tags = Some(false);
        }
        if self.no_words {
            options.words = Some(false);
        }
        if self.no_sentences {
            options.sentences = Some(false);
        }
        if self.no_phrases {
            options.phrases = Some(false);
        }
        if let Some(attribute) = &self.attribute {
            options.attribute = Some(attribute.clone());
        }

        Ok(options)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
