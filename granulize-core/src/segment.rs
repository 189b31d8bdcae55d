//! Hierarchical segmentation
//!
//! Pure transformation of the input tree into the annotated tree:
//! elements become tag grains wrapping their segmented children, text
//! leaves are split into word grains, and words into character grains.
//! Nothing is removed or reordered; the passes that follow only fill in
//! positions.

use crate::config::GranulizeConfig;
use crate::grain::{Annotated, GrainKind, Marker, SpanNode};
use crate::markup::Node;

/// Segment the input tree into grains
pub fn segment(nodes: &[Node], config: &GranulizeConfig) -> Vec<Annotated> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Element {
                tag,
                attrs,
                children,
            } => {
                let mut span = SpanNode::element(tag.clone(), attrs.clone())
                    .with_children(segment(children, config));
                if config.produce_tags {
                    span.marker = Some(Marker::new(GrainKind::Tag, tag.clone()));
                }
                out.push(Annotated::Span(span));
            }
            Node::Text(text) => segment_text(text, config, &mut out),
        }
    }
    out
}

/// Split a text leaf on single whitespace characters
///
/// Runs of whitespace are not collapsed: every split point keeps exactly
/// one ASCII space separator, and the empty tokens between adjacent
/// delimiters contribute nothing. A token that is only punctuation is
/// still a valid word grain.
fn segment_text(text: &str, config: &GranulizeConfig, out: &mut Vec<Annotated>) {
    for (i, token) in text.split(|c: char| c.is_whitespace()).enumerate() {
        if i > 0 {
            push_separator(config, out);
        }
        if token.is_empty() {
            continue;
        }
        if config.produce_words {
            let span = SpanNode::grain(GrainKind::Word, token)
                .with_children(segment_chars(token, config));
            out.push(Annotated::Span(span));
        } else if config.produce_characters {
            // No word wrapper: character grains attach directly
            out.extend(segment_chars(token, config));
        } else {
            out.push(Annotated::Text(token.to_string()));
        }
    }
}

/// One separator per original split point
///
/// With words disabled and characters enabled the separator itself
/// becomes a character grain, so the character-level sentence rule can
/// see the inter-word space in its stream.
fn push_separator(config: &GranulizeConfig, out: &mut Vec<Annotated>) {
    if !config.produce_words && config.produce_characters {
        out.push(char_grain(' '));
    } else {
        out.push(Annotated::Text(" ".to_string()));
    }
}

/// Split a word into character grains, one per code point
///
/// No grapheme clustering: combining marks and surrogate halves of the
/// source encoding each count as their own grain.
fn segment_chars(token: &str, config: &GranulizeConfig) -> Vec<Annotated> {
    if !config.produce_characters {
        return vec![Annotated::Text(token.to_string())];
    }
    token.chars().map(char_grain).collect()
}

fn char_grain(c: char) -> Annotated {
    let text = c.to_string();
    let span =
        SpanNode::grain(GrainKind::Character, text.clone()).with_children(vec![Annotated::Text(
            text,
        )]);
    Annotated::Span(span)
}
