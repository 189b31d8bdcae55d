//! Configuration resolution
//!
//! Callers describe what they want through [`GranulizeOptions`], a flat
//! overlay where every field is optional. Resolution merges the overlay
//! onto the defaults (a shallow merge: unspecified fields keep their
//! default values) and compiles the boundary patterns, failing fast on
//! an invalid pattern.

use crate::error::{GranulizeError, Result};
use crate::grain::GrainKind;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default marker attribute name
pub const DEFAULT_ATTRIBUTE: &str = "data-grain";

/// Default sentence-start pattern: capital letter or inverted punctuation
pub const DEFAULT_SENTENCE_START: &str = "^[A-Z¡¿]";

/// Default interpunction pattern: trailing comma, semicolon, colon, hyphen or en-dash
pub const DEFAULT_INTERPUNCTION: &str = "[,;:\\-–]$";

/// Default sentence-end pattern: trailing full stop, exclamation or question mark
pub const DEFAULT_SENTENCE_END: &str = "[.!?]$";

/// Caller-supplied configuration overlay
///
/// Unset fields fall back to the defaults documented on
/// [`GranulizeConfig`]. Deserializable so the CLI can load it from a
/// TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GranulizeOptions {
    /// Mark elements as tag grains
    pub tags: Option<bool>,
    /// Split text into word grains
    pub words: Option<bool>,
    /// Split words into character grains
    pub characters: Option<bool>,
    /// Assign positions to tag grains
    pub index_tags: Option<bool>,
    /// Assign positions to word grains
    pub index_words: Option<bool>,
    /// Assign positions to character grains
    pub index_characters: Option<bool>,
    /// Run the sentence boundary detector
    pub sentences: Option<bool>,
    /// Run the phrase boundary detector
    pub phrases: Option<bool>,
    /// Marker attribute name
    pub attribute: Option<String>,
    /// Identifier for tag grains
    pub tag_id: Option<String>,
    /// Identifier for word grains
    pub word_id: Option<String>,
    /// Identifier for character grains
    pub character_id: Option<String>,
    /// Identifier for sentence indices
    pub sentence_id: Option<String>,
    /// Identifier for phrase indices
    pub phrase_id: Option<String>,
    /// Pattern marking a grain that opens a sentence
    pub sentence_start_pattern: Option<String>,
    /// Pattern marking a grain that closes a phrase
    pub interpunction_pattern: Option<String>,
    /// Pattern marking a grain that closes a sentence
    pub sentence_end_pattern: Option<String>,
}

impl GranulizeOptions {
    /// Create an empty overlay (all defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the overlay into a validated configuration
    pub fn resolve(self) -> Result<GranulizeConfig> {
        let attribute = self.attribute.unwrap_or_else(|| DEFAULT_ATTRIBUTE.to_string());
        validate_identifier("attribute", &attribute)?;

        let tag_id = self.tag_id.unwrap_or_else(|| "tag".to_string());
        let word_id = self.word_id.unwrap_or_else(|| "word".to_string());
        let character_id = self.character_id.unwrap_or_else(|| "char".to_string());
        let sentence_id = self.sentence_id.unwrap_or_else(|| "sentence".to_string());
        let phrase_id = self.phrase_id.unwrap_or_else(|| "phrase".to_string());
        for (name, id) in [
            ("tag_id", &tag_id),
            ("word_id", &word_id),
            ("character_id", &character_id),
            ("sentence_id", &sentence_id),
            ("phrase_id", &phrase_id),
        ] {
            validate_identifier(name, id)?;
        }

        let patterns = BoundaryPatterns::compile(
            self.sentence_start_pattern
                .as_deref()
                .unwrap_or(DEFAULT_SENTENCE_START),
            self.interpunction_pattern
                .as_deref()
                .unwrap_or(DEFAULT_INTERPUNCTION),
            self.sentence_end_pattern
                .as_deref()
                .unwrap_or(DEFAULT_SENTENCE_END),
        )?;

        Ok(GranulizeConfig {
            produce_tags: self.tags.unwrap_or(true),
            produce_words: self.words.unwrap_or(true),
            produce_characters: self.characters.unwrap_or(false),
            index_tags: self.index_tags.unwrap_or(true),
            index_words: self.index_words.unwrap_or(true),
            index_characters: self.index_characters.unwrap_or(true),
            detect_sentences: self.sentences.unwrap_or(true),
            detect_phrases: self.phrases.unwrap_or(true),
            attribute,
            tag_id,
            word_id,
            character_id,
            sentence_id,
            phrase_id,
            patterns,
        })
    }
}

/// Compiled boundary patterns
#[derive(Debug, Clone)]
pub struct BoundaryPatterns {
    /// Matches a grain that opens a new sentence
    pub sentence_start: Regex,
    /// Matches a grain that closes a phrase
    pub interpunction: Regex,
    /// Matches a grain that closes a sentence
    pub sentence_end: Regex,
}

impl BoundaryPatterns {
    /// Compile the three patterns, failing fast on the first invalid one
    pub fn compile(sentence_start: &str, interpunction: &str, sentence_end: &str) -> Result<Self> {
        Ok(Self {
            sentence_start: compile_pattern("sentence-start", sentence_start)?,
            interpunction: compile_pattern("interpunction", interpunction)?,
            sentence_end: compile_pattern("sentence-end", sentence_end)?,
        })
    }
}

fn compile_pattern(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| GranulizeError::InvalidPattern { name, source })
}

/// Marker attributes and grain identifiers end up inside markup attribute
/// values, so reject anything that would break out of them.
fn validate_identifier(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GranulizeError::Config(format!("{name} is empty")));
    }
    if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '=' | '&'))
    {
        return Err(GranulizeError::Config(format!(
            "{name} contains markup-unsafe characters: {value:?}"
        )));
    }
    Ok(())
}

/// Resolved, validated engine configuration
#[derive(Debug, Clone)]
pub struct GranulizeConfig {
    /// Mark elements as tag grains
    pub produce_tags: bool,
    /// Split text into word grains
    pub produce_words: bool,
    /// Split words into character grains
    pub produce_characters: bool,
    /// Assign positions to tag grains
    pub index_tags: bool,
    /// Assign positions to word grains
    pub index_words: bool,
    /// Assign positions to character grains
    pub index_characters: bool,
    /// Run the sentence boundary detector
    pub detect_sentences: bool,
    /// Run the phrase boundary detector
    pub detect_phrases: bool,
    /// Marker attribute name
    pub attribute: String,
    /// Identifier for tag grains
    pub tag_id: String,
    /// Identifier for word grains
    pub word_id: String,
    /// Identifier for character grains
    pub character_id: String,
    /// Identifier for sentence indices
    pub sentence_id: String,
    /// Identifier for phrase indices
    pub phrase_id: String,
    /// Compiled boundary patterns
    pub patterns: BoundaryPatterns,
}

impl GranulizeConfig {
    /// Resolve the default configuration
    pub fn new() -> Result<Self> {
        GranulizeOptions::new().resolve()
    }

    /// The identifier configured for a grain kind
    pub fn kind_id(&self, kind: GrainKind) -> &str {
        match kind {
            GrainKind::Tag => &self.tag_id,
            GrainKind::Word => &self.word_id,
            GrainKind::Character => &self.character_id,
            GrainKind::Sentence => &self.sentence_id,
            GrainKind::Phrase => &self.phrase_id,
        }
    }

    /// Whether a grain kind is produced by the segmenter
    pub fn produces(&self, kind: GrainKind) -> bool {
        match kind {
            GrainKind::Tag => self.produce_tags,
            GrainKind::Word => self.produce_words,
            GrainKind::Character => self.produce_characters,
            // Sentence and phrase indices ride on word/character grains
            GrainKind::Sentence | GrainKind::Phrase => {
                self.produce_words || self.produce_characters
            }
        }
    }
}
