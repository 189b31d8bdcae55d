//! Pipeline output types

use serde::Serialize;

/// Per-kind grain counts, derived from the maximum assigned index
///
/// A count of zero means the kind was not produced, not indexed, or
/// simply absent from the input. Field names follow the downstream
/// contract when serialized (`tagCount`, `wordCount`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrainCounts {
    /// Number of indexed tag grains
    pub tag_count: usize,
    /// Number of indexed word grains
    pub word_count: usize,
    /// Number of indexed character grains
    pub character_count: usize,
    /// Number of sentences detected
    pub sentence_count: usize,
    /// Number of phrases detected
    pub phrase_count: usize,
}

/// Result of one granulize invocation
#[derive(Debug, Clone, Serialize)]
pub struct GranulizeOutput {
    /// The input fragment re-serialized with markers and positions
    pub markup: String,
    /// Per-kind grain counts
    pub counts: GrainCounts,
}
