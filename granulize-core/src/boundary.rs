//! Sentence and phrase boundary detection
//!
//! Both detectors are a left-to-right fold over the stream of grains of
//! the finer available kind: word grains when words are produced,
//! character grains otherwise. With neither produced there is no stream
//! and the detectors are no-ops.
//!
//! The two counters deliberately differ in where the boundary lands: a
//! sentence-opening capital starts the *next* sentence, so the counter
//! is incremented before assignment, while trailing interpunction closes
//! the phrase it belongs to, so the phrase counter is incremented after.

use crate::config::GranulizeConfig;
use crate::grain::{for_each_span_mut, Annotated, GrainKind};

/// The grain stream the detectors scan, if any
fn stream_kind(config: &GranulizeConfig) -> Option<GrainKind> {
    if config.produce_words {
        Some(GrainKind::Word)
    } else if config.produce_characters {
        Some(GrainKind::Character)
    } else {
        None
    }
}

/// Assign a running sentence index to every grain of the stream
///
/// Word streams look one grain back: a new sentence starts at grain `i`
/// when its text matches the sentence-start pattern and grain `i-1`
/// matches the sentence-end pattern. Character streams look two grains
/// back, because the inter-word space is its own grain there and the
/// "previous word" signal has to skip over it.
pub fn detect_sentences(nodes: &mut [Annotated], config: &GranulizeConfig) {
    let Some(kind) = stream_kind(config) else {
        return;
    };
    let patterns = &config.patterns;
    let mut counter = 0usize;
    let mut prev: Option<String> = None;
    let mut prev2: Option<String> = None;

    for_each_span_mut(nodes, &mut |span| {
        let Some(marker) = &span.marker else {
            return;
        };
        if marker.kind != kind {
            return;
        }
        let text = marker.text.clone();

        let starts_sentence = match kind {
            GrainKind::Word => {
                prev.as_deref()
                    .is_some_and(|p| patterns.sentence_end.is_match(p))
                    && patterns.sentence_start.is_match(&text)
            }
            GrainKind::Character => {
                prev.as_deref() == Some(" ")
                    && prev2
                        .as_deref()
                        .is_some_and(|p| patterns.sentence_end.is_match(p))
                    && patterns.sentence_start.is_match(&text)
            }
            _ => false,
        };
        if starts_sentence {
            counter += 1;
        }
        span.sentence = Some(counter);

        prev2 = prev.take();
        prev = Some(text);
    });
}

/// Assign a running phrase index to every grain of the stream
///
/// Assignment happens before the increment: the grain whose text matches
/// the interpunction pattern is the last member of the closing phrase,
/// not the first of the next one.
pub fn detect_phrases(nodes: &mut [Annotated], config: &GranulizeConfig) {
    let Some(kind) = stream_kind(config) else {
        return;
    };
    let mut counter = 0usize;

    for_each_span_mut(nodes, &mut |span| {
        let Some(marker) = &span.marker else {
            return;
        };
        if marker.kind != kind {
            return;
        }
        span.phrase = Some(counter);
        if config.patterns.interpunction.is_match(&marker.text) {
            counter += 1;
        }
    });
}
