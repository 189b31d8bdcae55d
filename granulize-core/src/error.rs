//! Error types for configuration resolution

use thiserror::Error;

/// Errors raised while resolving a configuration
///
/// The segmentation pipeline itself never fails: malformed markup and
/// disabled prerequisites degrade to empty output and zero counts. The
/// only hard failures are configuration mistakes, surfaced here at
/// resolution time instead of producing stuck boundary counters later.
#[derive(Error, Debug)]
pub enum GranulizeError {
    /// A boundary pattern failed to compile
    #[error("invalid {name} pattern: {source}")]
    InvalidPattern {
        /// Which of the three boundary patterns was rejected
        name: &'static str,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, GranulizeError>;
