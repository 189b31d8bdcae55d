//! End-to-end pipeline tests over the public API

use granulize_core::{granulize, granulize_with, GranulizeOptions, Granulizer};

fn options() -> GranulizeOptions {
    GranulizeOptions::default()
}

#[test]
fn hello_world_has_two_words_one_sentence() {
    let output = granulize("Hello world.").unwrap();
    assert_eq!(output.counts.word_count, 2);
    assert_eq!(output.counts.sentence_count, 1);
    assert_eq!(output.counts.phrase_count, 1);
}

#[test]
fn hi_bye_has_two_sentences() {
    let output = granulize("Hi. Bye.").unwrap();
    assert_eq!(output.counts.word_count, 2);
    assert_eq!(output.counts.sentence_count, 2);
    assert!(output.markup.contains("--sentence-index: 1"));
}

#[test]
fn bold_tag_scenario() {
    let output = granulize("<b>Hi</b> there").unwrap();
    assert_eq!(output.counts.tag_count, 1);
    assert_eq!(output.counts.word_count, 2);
    assert!(output.markup.contains(r#"<b data-grain="tag tag-b""#));
    assert!(output.markup.contains("--tag-index: 0"));
}

#[test]
fn comma_separated_words_make_three_phrases() {
    let output = granulize("one, two, three").unwrap();
    assert_eq!(output.counts.phrase_count, 3);
    // The triggering grain is the last member of its phrase
    assert!(output.markup.contains(r#"word-one%2C" style="--word-index: 0; --sentence-index: 0; --phrase-index: 0"#));
    assert!(output.markup.contains("--phrase-index: 2"));
}

#[test]
fn characters_disabled_by_default() {
    let output = granulize("hi").unwrap();
    assert_eq!(output.counts.character_count, 0);
    assert!(!output.markup.contains("char-"));
}

#[test]
fn characters_nest_inside_words() {
    let output = granulize_with(
        "hi",
        GranulizeOptions {
            characters: Some(true),
            ..options()
        },
    )
    .unwrap();
    assert_eq!(output.counts.word_count, 1);
    assert_eq!(output.counts.character_count, 2);
    assert_eq!(
        output.markup,
        "<span data-grain=\"word word-hi\" \
         style=\"--word-index: 0; --sentence-index: 0; --phrase-index: 0\">\
         <span data-grain=\"char char-h\" style=\"--char-index: 0\">h</span>\
         <span data-grain=\"char char-i\" style=\"--char-index: 1\">i</span>\
         </span>"
    );
}

#[test]
fn words_disabled_attaches_characters_directly() {
    let output = granulize_with(
        "a b",
        GranulizeOptions {
            words: Some(false),
            characters: Some(true),
            ..options()
        },
    )
    .unwrap();
    assert_eq!(output.counts.word_count, 0);
    assert!(!output.markup.contains("word-"));
    // a, separator space, b
    assert_eq!(output.counts.character_count, 3);
}

#[test]
fn disabling_everything_round_trips_plain_markup() {
    let output = granulize_with(
        "<p>keep me</p>",
        GranulizeOptions {
            tags: Some(false),
            words: Some(false),
            sentences: Some(false),
            phrases: Some(false),
            ..options()
        },
    )
    .unwrap();
    assert_eq!(output.markup, "<p>keep me</p>");
    assert_eq!(output.counts.word_count, 0);
    assert_eq!(output.counts.sentence_count, 0);
}

#[test]
fn indexing_disabled_marks_without_positions() {
    let output = granulize_with(
        "one two",
        GranulizeOptions {
            index_words: Some(false),
            sentences: Some(false),
            phrases: Some(false),
            ..options()
        },
    )
    .unwrap();
    assert!(output.markup.contains(r#"data-grain="word word-one""#));
    assert!(!output.markup.contains("--word-index"));
    // Count follows indexing, not production
    assert_eq!(output.counts.word_count, 0);
}

#[test]
fn custom_attribute_and_identifiers() {
    let output = granulize_with(
        "go",
        GranulizeOptions {
            attribute: Some("data-unit".to_string()),
            word_id: Some("token".to_string()),
            ..options()
        },
    )
    .unwrap();
    assert!(output.markup.contains(r#"data-unit="token token-go""#));
    assert!(output.markup.contains("--token-index: 0"));
}

#[test]
fn custom_boundary_pattern() {
    // Treat the ideographic full stop as a sentence end
    let output = granulize_with(
        "One。 Two。",
        GranulizeOptions {
            sentence_end_pattern: Some("[.!?。]$".to_string()),
            ..options()
        },
    )
    .unwrap();
    assert_eq!(output.counts.sentence_count, 2);
}

#[test]
fn existing_attributes_survive_annotation() {
    let output = granulize(r#"<em class="hero">Hi</em>"#).unwrap();
    assert!(output.markup.contains(r#"<em class="hero" data-grain="tag tag-em""#));
}

#[test]
fn repeated_invocations_are_independent() {
    let granulizer = Granulizer::new().unwrap();
    let first = granulizer.granulize("Hi. Bye.");
    let second = granulizer.granulize("Hi. Bye.");
    assert_eq!(first.markup, second.markup);
    assert_eq!(first.counts, second.counts);
}

#[test]
fn malformed_markup_degrades_instead_of_failing() {
    let output = granulize("<b>unclosed <i>nested").unwrap();
    assert_eq!(output.counts.tag_count, 2);
    assert_eq!(output.counts.word_count, 2);
}

#[test]
fn percent_encoded_labels_for_unicode_words() {
    let output = granulize("café").unwrap();
    assert!(output.markup.contains("word-caf%C3%A9"));
}

#[test]
fn pre_existing_marker_attributes_are_not_special() {
    // Re-granulizing annotated output treats old spans as plain elements
    let first = granulize("hi").unwrap();
    let second = granulize(&first.markup).unwrap();
    assert_eq!(second.counts.tag_count, 1);
    assert_eq!(second.counts.word_count, 1);
}
