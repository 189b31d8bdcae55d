//! Typed grain representation and annotated-tree rendering
//!
//! A grain is a marked unit of content: the element, word or character it
//! wraps, its kind, and the positions assigned by the indexing and
//! boundary-detection passes. Markers are kept as structured values all
//! the way through the pipeline and serialized to their attribute form
//! only here, at render time, so labels containing quotes or the
//! attribute delimiter cannot corrupt the output.

use crate::config::GranulizeConfig;
use crate::markup::{escape_attr, escape_text, is_void_tag, write_attrs};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

/// Characters left intact by JavaScript's `encodeURIComponent`, which
/// downstream styling code expects grain labels to be encoded with.
const LABEL_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Granularity category of a grain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrainKind {
    /// An element of the input markup
    Tag,
    /// A whitespace-delimited token
    Word,
    /// A single code point of a word
    Character,
    /// Derived sentence index, attached to word/character grains
    Sentence,
    /// Derived phrase index, attached to word/character grains
    Phrase,
}

/// The (kind, label, position) triple attached to a grain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Granularity category
    pub kind: GrainKind,
    /// Raw grain text: tag name, word token, or single character
    pub text: String,
    /// 0-based rank among grains of the same kind, in document order
    pub position: Option<usize>,
}

impl Marker {
    /// Create an unindexed marker
    pub fn new(kind: GrainKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            position: None,
        }
    }

    /// The marker label: tag name verbatim, percent-encoded text otherwise
    pub fn label(&self) -> String {
        match self.kind {
            GrainKind::Tag => self.text.clone(),
            _ => utf8_percent_encode(&self.text, LABEL_SET).to_string(),
        }
    }
}

/// An element of the annotated tree
///
/// Word and character grains are freshly created `<span>` wrappers; tag
/// grains are the original input element with a marker attached;
/// unmarked elements are input elements passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanNode {
    /// Tag name
    pub tag: String,
    /// Input attributes, preserved verbatim
    pub attrs: Vec<(String, String)>,
    /// Grain marker, if this element is a grain
    pub marker: Option<Marker>,
    /// Sentence index assigned by the sentence detector
    pub sentence: Option<usize>,
    /// Phrase index assigned by the phrase detector
    pub phrase: Option<usize>,
    /// Children in document order
    pub children: Vec<Annotated>,
}

impl SpanNode {
    /// An input element carried through without a marker
    pub fn element(tag: impl Into<String>, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            marker: None,
            sentence: None,
            phrase: None,
            children: Vec::new(),
        }
    }

    /// A freshly created `<span>` grain wrapper
    pub fn grain(kind: GrainKind, text: impl Into<String>) -> Self {
        Self {
            tag: "span".to_string(),
            attrs: Vec::new(),
            marker: Some(Marker::new(kind, text)),
            sentence: None,
            phrase: None,
            children: Vec::new(),
        }
    }

    /// Builder-style child list
    pub fn with_children(mut self, children: Vec<Annotated>) -> Self {
        self.children = children;
        self
    }
}

/// A node of the annotated tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotated {
    /// Element, marked or pass-through
    Span(SpanNode),
    /// Raw text
    Text(String),
}

/// Visit every span in document order
pub fn for_each_span<'a>(nodes: &'a [Annotated], visit: &mut impl FnMut(&'a SpanNode)) {
    for node in nodes {
        if let Annotated::Span(span) = node {
            visit(span);
            for_each_span(&span.children, visit);
        }
    }
}

/// Visit every span in document order, mutably
pub fn for_each_span_mut(nodes: &mut [Annotated], visit: &mut impl FnMut(&mut SpanNode)) {
    for node in nodes {
        if let Annotated::Span(span) = node {
            visit(span);
            for_each_span_mut(&mut span.children, visit);
        }
    }
}

/// Serialize the annotated tree back to markup
pub fn render(nodes: &[Annotated], config: &GranulizeConfig) -> String {
    let mut out = String::new();
    render_nodes(nodes, config, &mut out);
    out
}

fn render_nodes(nodes: &[Annotated], config: &GranulizeConfig, out: &mut String) {
    for node in nodes {
        match node {
            Annotated::Text(text) => out.push_str(&escape_text(text)),
            Annotated::Span(span) => render_span(span, config, out),
        }
    }
}

fn render_span(span: &SpanNode, config: &GranulizeConfig, out: &mut String) {
    out.push('<');
    out.push_str(&span.tag);

    // An input style attribute is preserved; index custom properties are
    // appended after it.
    let mut style = String::new();
    let mut plain_attrs: Vec<(String, String)> = Vec::new();
    for (name, value) in &span.attrs {
        if name == "style" {
            style.push_str(value);
        } else if span.marker.is_some() && *name == config.attribute {
            // A marker replaces any stale marker attribute on the input
        } else {
            plain_attrs.push((name.clone(), value.clone()));
        }
    }
    write_attrs(out, &plain_attrs);

    if let Some(marker) = &span.marker {
        let id = config.kind_id(marker.kind);
        let _ = write!(
            out,
            " {}=\"{} {}-{}\"",
            config.attribute,
            id,
            id,
            escape_attr(&marker.label())
        );
        if let Some(position) = marker.position {
            push_index(&mut style, id, position);
        }
    }
    if let Some(sentence) = span.sentence {
        push_index(&mut style, &config.sentence_id, sentence);
    }
    if let Some(phrase) = span.phrase {
        push_index(&mut style, &config.phrase_id, phrase);
    }
    if !style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&style));
    }

    if span.children.is_empty() && is_void_tag(&span.tag) {
        out.push('>');
        return;
    }
    out.push('>');
    render_nodes(&span.children, config, out);
    out.push_str("</");
    out.push_str(&span.tag);
    out.push('>');
}

fn push_index(style: &mut String, id: &str, value: usize) {
    if !style.is_empty() && !style.trim_end().ends_with(';') {
        style.push(';');
    }
    if !style.is_empty() {
        style.push(' ');
    }
    let _ = write!(style, "--{id}-index: {value}");
}
