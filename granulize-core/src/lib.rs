//! Hierarchical markup segmentation
//!
//! Converts a markup fragment into an annotated copy where every
//! structural unit — element, word, character — is wrapped in a marker
//! and given a stable sequential position, with sentence and phrase
//! indices inferred from punctuation heuristics. Downstream styling or
//! animation code can then target "the 7th word" or "the 3rd sentence"
//! through the emitted `data-grain` attributes and `--<kind>-index`
//! custom properties.
//!
//! ```
//! use granulize_core::Granulizer;
//!
//! let granulizer = Granulizer::new().unwrap();
//! let output = granulizer.granulize("Hello world.");
//! assert_eq!(output.counts.word_count, 2);
//! assert_eq!(output.counts.sentence_count, 1);
//! ```

#![warn(missing_docs)]

pub mod boundary;
pub mod config;
pub mod error;
pub mod grain;
pub mod index;
pub mod markup;
pub mod output;
pub mod segment;

pub use config::{GranulizeConfig, GranulizeOptions};
pub use error::{GranulizeError, Result};
pub use grain::GrainKind;
pub use output::{GrainCounts, GranulizeOutput};

/// The segmentation pipeline, bound to a resolved configuration
///
/// Stateless across calls: each invocation parses, segments, indexes and
/// renders its own tree, so a `Granulizer` can be shared freely.
pub struct Granulizer {
    config: GranulizeConfig,
}

impl Granulizer {
    /// Create a granulizer with the default configuration
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: GranulizeConfig::new()?,
        })
    }

    /// Create a granulizer from a caller overlay
    ///
    /// Fails fast on an invalid boundary pattern or a markup-unsafe
    /// identifier; everything else degrades gracefully at run time.
    pub fn with_options(options: GranulizeOptions) -> Result<Self> {
        Ok(Self {
            config: options.resolve()?,
        })
    }

    /// Create a granulizer from an already-resolved configuration
    pub fn with_config(config: GranulizeConfig) -> Self {
        Self { config }
    }

    /// The resolved configuration
    pub fn config(&self) -> &GranulizeConfig {
        &self.config
    }

    /// Run the full pipeline on a markup fragment
    ///
    /// Fixed stage order: segment, index tags, index words, index
    /// characters, detect sentences, detect phrases, count. Stages whose
    /// toggle is off are skipped; disabled prerequisites make dependent
    /// stages silent no-ops with a count of zero.
    pub fn granulize(&self, fragment: &str) -> GranulizeOutput {
        let config = &self.config;
        let tree = markup::parse_fragment(fragment);
        let mut nodes = segment::segment(&tree, config);

        if config.index_tags {
            index::index_kind(&mut nodes, GrainKind::Tag);
        }
        if config.index_words {
            index::index_kind(&mut nodes, GrainKind::Word);
        }
        if config.index_characters {
            index::index_kind(&mut nodes, GrainKind::Character);
        }
        if config.detect_sentences {
            boundary::detect_sentences(&mut nodes, config);
        }
        if config.detect_phrases {
            boundary::detect_phrases(&mut nodes, config);
        }

        let counts = GrainCounts {
            tag_count: index::count(&nodes, GrainKind::Tag),
            word_count: index::count(&nodes, GrainKind::Word),
            character_count: index::count(&nodes, GrainKind::Character),
            sentence_count: index::sentence_count(&nodes),
            phrase_count: index::phrase_count(&nodes),
        };

        GranulizeOutput {
            markup: grain::render(&nodes, config),
            counts,
        }
    }
}

impl Default for Granulizer {
    fn default() -> Self {
        Self::new().expect("default configuration is valid")
    }
}

/// Granulize a fragment with the default configuration
pub fn granulize(fragment: &str) -> Result<GranulizeOutput> {
    Ok(Granulizer::new()?.granulize(fragment))
}

/// Granulize a fragment with a caller overlay
pub fn granulize_with(fragment: &str, options: GranulizeOptions) -> Result<GranulizeOutput> {
    Ok(Granulizer::with_options(options)?.granulize(fragment))
}
