//! Sequential indexing and grain counting
//!
//! Positions are a grain's 0-based rank among grains of the same kind,
//! in document order. Indexing recomputes ranks from scratch, so running
//! it twice is idempotent, and it never touches markers of other kinds.

use crate::grain::{for_each_span, for_each_span_mut, Annotated, GrainKind, SpanNode};

/// Assign document-order positions to every grain of the given kind
pub fn index_kind(nodes: &mut [Annotated], kind: GrainKind) {
    let mut rank = 0;
    for_each_span_mut(nodes, &mut |span| {
        if let Some(marker) = &mut span.marker {
            if marker.kind == kind {
                marker.position = Some(rank);
                rank += 1;
            }
        }
    });
}

/// Count indexed grains of a kind: maximum assigned position plus one
pub fn count(nodes: &[Annotated], kind: GrainKind) -> usize {
    let mut max = None;
    for_each_span(nodes, &mut |span| {
        if let Some(marker) = &span.marker {
            if marker.kind == kind {
                if let Some(position) = marker.position {
                    max = Some(max.map_or(position, |m: usize| m.max(position)));
                }
            }
        }
    });
    max.map_or(0, |m| m + 1)
}

/// Count of sentence indices: maximum assigned index plus one
pub fn sentence_count(nodes: &[Annotated]) -> usize {
    derived_count(nodes, |span| span.sentence)
}

/// Count of phrase indices: maximum assigned index plus one
pub fn phrase_count(nodes: &[Annotated]) -> usize {
    derived_count(nodes, |span| span.phrase)
}

fn derived_count(nodes: &[Annotated], get: impl Fn(&SpanNode) -> Option<usize>) -> usize {
    let mut max = None;
    for_each_span(nodes, &mut |span| {
        if let Some(value) = get(span) {
            max = Some(max.map_or(value, |m: usize| m.max(value)));
        }
    });
    max.map_or(0, |m| m + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GranulizeConfig;
    use crate::markup::parse_fragment;
    use crate::segment::segment;

    fn segmented(markup: &str) -> Vec<Annotated> {
        let config = GranulizeConfig::new().unwrap();
        segment(&parse_fragment(markup), &config)
    }

    fn positions(nodes: &[Annotated], kind: GrainKind) -> Vec<Option<usize>> {
        let mut out = Vec::new();
        crate::grain::for_each_span(nodes, &mut |span| {
            if let Some(marker) = &span.marker {
                if marker.kind == kind {
                    out.push(marker.position);
                }
            }
        });
        out
    }

    #[test]
    fn positions_are_contiguous_from_zero() {
        let mut nodes = segmented("one two three four");
        index_kind(&mut nodes, GrainKind::Word);
        assert_eq!(
            positions(&nodes, GrainKind::Word),
            vec![Some(0), Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn ranks_are_per_kind_not_global() {
        let mut nodes = segmented("<b>one</b> <i>two</i>");
        index_kind(&mut nodes, GrainKind::Tag);
        index_kind(&mut nodes, GrainKind::Word);
        assert_eq!(positions(&nodes, GrainKind::Tag), vec![Some(0), Some(1)]);
        assert_eq!(positions(&nodes, GrainKind::Word), vec![Some(0), Some(1)]);
    }

    #[test]
    fn indexing_is_idempotent() {
        let mut nodes = segmented("a b c");
        index_kind(&mut nodes, GrainKind::Word);
        let first = positions(&nodes, GrainKind::Word);
        index_kind(&mut nodes, GrainKind::Word);
        assert_eq!(positions(&nodes, GrainKind::Word), first);
    }

    #[test]
    fn indexing_one_kind_leaves_others_untouched() {
        let mut nodes = segmented("<b>x</b> y");
        index_kind(&mut nodes, GrainKind::Word);
        assert_eq!(positions(&nodes, GrainKind::Tag), vec![None]);
    }

    #[test]
    fn count_is_max_position_plus_one() {
        let mut nodes = segmented("a b c");
        index_kind(&mut nodes, GrainKind::Word);
        assert_eq!(count(&nodes, GrainKind::Word), 3);
    }

    #[test]
    fn unindexed_grains_count_zero() {
        let nodes = segmented("a b c");
        assert_eq!(count(&nodes, GrainKind::Word), 0);
    }

    #[test]
    fn absent_kind_counts_zero() {
        let mut nodes = segmented("plain text");
        index_kind(&mut nodes, GrainKind::Tag);
        assert_eq!(count(&nodes, GrainKind::Tag), 0);
    }

    #[test]
    fn derived_counts_default_to_zero() {
        let nodes = segmented("a b");
        assert_eq!(sentence_count(&nodes), 0);
        assert_eq!(phrase_count(&nodes), 0);
    }
}
