use std::collections::HashSet;

use pilsa_backend::corpus::ScriptureCorpus;
use pilsa_backend::navigation::{first_position, next_position};
use pilsa_backend::types::Position;

fn two_book_corpus() -> ScriptureCorpus {
    // Multi-digit chapter numbers on purpose: document order must put
    // chapter "10" after "9", which lexicographic ordering would not.
    let json = r#"{
        "en": {
            "Alpha": {
                "1": { "1": "a1", "2": "a2" },
                "2": { "1": "b1" }
            },
            "Beta": {
                "9": { "1": "c1" },
                "10": { "1": "d1", "2": "d2" }
            }
        }
    }"#;
    ScriptureCorpus::from_json(json).expect("corpus JSON should parse")
}

#[test]
fn test_traversal_visits_every_verse_exactly_once() {
    let corpus = two_book_corpus();

    let mut visited: Vec<Position> = Vec::new();
    let mut pos = first_position(&corpus, "en").expect("corpus has a first position");

    loop {
        visited.push(pos.clone());
        match next_position(&corpus, &pos).expect("positions reached by traversal are valid") {
            Some(next) => pos = next,
            None => break,
        }
    }

    let expected = vec![
        Position::new("en", "Alpha", "1", "1"),
        Position::new("en", "Alpha", "1", "2"),
        Position::new("en", "Alpha", "2", "1"),
        Position::new("en", "Beta", "9", "1"),
        Position::new("en", "Beta", "10", "1"),
        Position::new("en", "Beta", "10", "2"),
    ];
    assert_eq!(visited, expected, "traversal must follow document order with no skips");

    let unique: HashSet<String> = visited.iter().map(|p| p.storage_key()).collect();
    assert_eq!(unique.len(), visited.len(), "no verse may be visited twice");
}

#[test]
fn test_next_verse_within_chapter() {
    let corpus = ScriptureCorpus::bundled();
    let next = next_position(corpus, &Position::new("en", "Genesis", "1", "3")).unwrap();
    assert_eq!(next, Some(Position::new("en", "Genesis", "1", "4")));
}

#[test]
fn test_next_crosses_chapter_boundary() {
    let corpus = ScriptureCorpus::bundled();
    // Genesis 1 has ten verses in the bundled corpus.
    let next = next_position(corpus, &Position::new("en", "Genesis", "1", "10")).unwrap();
    assert_eq!(next, Some(Position::new("en", "Genesis", "2", "1")));
}

#[test]
fn test_next_crosses_book_boundary() {
    let corpus = ScriptureCorpus::bundled();
    let next = next_position(corpus, &Position::new("en", "Genesis", "2", "5")).unwrap();
    assert_eq!(next, Some(Position::new("en", "John", "1", "1")));
}

#[test]
fn test_next_at_corpus_end_is_none() {
    let corpus = ScriptureCorpus::bundled();
    let next = next_position(corpus, &Position::new("en", "John", "1", "5")).unwrap();
    assert_eq!(next, None);

    // Languages end independently of each other.
    let next = next_position(corpus, &Position::new("ko", "요한복음", "1", "3")).unwrap();
    assert_eq!(next, None);
}

#[test]
fn test_unknown_position_is_an_error() {
    let corpus = ScriptureCorpus::bundled();

    assert!(next_position(corpus, &Position::new("en", "Genesis", "1", "99")).is_err());
    assert!(next_position(corpus, &Position::new("en", "Revelation", "1", "1")).is_err());
    assert!(next_position(corpus, &Position::new("de", "Genesis", "1", "1")).is_err());
}

#[test]
fn test_first_position() {
    let corpus = ScriptureCorpus::bundled();
    assert_eq!(
        first_position(corpus, "en"),
        Some(Position::new("en", "Genesis", "1", "1"))
    );
    assert_eq!(
        first_position(corpus, "ko"),
        Some(Position::new("ko", "창세기", "1", "1"))
    );
    assert_eq!(first_position(corpus, "de"), None);
}

#[test]
fn test_multi_digit_chapter_order_in_traversal() {
    let corpus = two_book_corpus();
    let next = next_position(&corpus, &Position::new("en", "Beta", "9", "1")).unwrap();
    assert_eq!(
        next,
        Some(Position::new("en", "Beta", "10", "1")),
        "chapter 10 must follow chapter 9, not sort before 2"
    );
}
