//! Configuration file loading
//!
//! CLI configuration files are TOML renditions of the core's
//! [`GranulizeOptions`] overlay: every key optional, unspecified keys
//! keep the engine defaults.

use anyhow::{Context, Result};
use granulize_core::GranulizeOptions;
use std::path::Path;

/// Load a granulize options overlay from a TOML file
pub fn load_options(path: &Path) -> Result<GranulizeOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let options: GranulizeOptions = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(options)
}

/// The commented default configuration template
pub fn default_template() -> String {
    format!(
        r#"# granulize configuration
#
# Every key is optional; unspecified keys keep the engine defaults.

# Which grain kinds the segmenter produces.
tags = true
words = true
characters = false

# Which grain kinds receive document-order positions.
index_tags = true
index_words = true
index_characters = true

# Boundary detection passes.
sentences = true
phrases = true

# Marker attribute and per-kind identifiers.
attribute = "data-grain"
tag_id = "tag"
word_id = "word"
character_id = "char"
sentence_id = "sentence"
phrase_id = "phrase"

# Boundary patterns (regular expressions, validated at load time).
sentence_start_pattern = "{}"
interpunction_pattern = "{}"
sentence_end_pattern = "{}"
"#,
        granulize_core::config::DEFAULT_SENTENCE_START,
        granulize_core::config::DEFAULT_INTERPUNCTION.replace('\\', "\\\\"),
        granulize_core::config::DEFAULT_SENTENCE_END,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_partial_options() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "characters = true\nattribute = \"data-unit\"\n"
        )
        .unwrap();

        let options = load_options(temp_file.path()).unwrap();
        assert_eq!(options.characters, Some(true));
        assert_eq!(options.attribute.as_deref(), Some("data-unit"));
        assert_eq!(options.words, None);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "characters = [broken").unwrap();

        let result = load_options(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_options(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read config file"));
    }

    #[test]
    fn test_default_template_round_trips() {
        let options: GranulizeOptions = toml::from_str(&default_template()).unwrap();
        let config = options.resolve().unwrap();
        assert!(config.produce_words);
        assert!(!config.produce_characters);
        assert_eq!(config.attribute, "data-grain");
        assert!(config.patterns.sentence_end.is_match("done."));
        assert!(config.patterns.interpunction.is_match("well,"));
        assert!(config.patterns.sentence_start.is_match("Word"));
    }
}
