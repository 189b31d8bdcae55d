//! Validate command implementation

use crate::config::load_options;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Resolution is where pattern typos surface: a configuration that
    /// loads but carries a broken boundary regex fails here instead of
    /// silently producing counters stuck at zero.
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let options = match load_options(&self.config) {
            Ok(options) => options,
            Err(e) => {
                println!("✗ Configuration could not be loaded!");
                println!("  Error: {e:#}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };

        match options.resolve() {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Marker attribute: {}", config.attribute);
                println!(
                    "  Produces: tags={} words={} characters={}",
                    config.produce_tags, config.produce_words, config.produce_characters
                );
                println!(
                    "  Detects: sentences={} phrases={}",
                    config.detect_sentences, config.detect_phrases
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
