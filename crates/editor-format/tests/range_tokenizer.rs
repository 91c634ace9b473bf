mod common;

use common::{CState, c_like, page, range};
use editor_format::{Document, RangeEvent, RangeTokenizer, TextDocument};
use editor_format_mode::Mode;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const ALPHABET: &[char] = &[
    'a', 'b', 'x', ' ', ' ', '\t', '{', '}', ';', '"', '/', '*', '<', '>', 's', '\n', '你',
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..80);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

/// Concatenate every token and the line breaks between them.
fn reassemble(mode: &Arc<Mode>, text: &str) -> String {
    let mut tokenizer = RangeTokenizer::new(Arc::clone(mode), mode.start_state(), text, 4);
    let mut out = String::new();
    while let Some(event) = tokenizer.next_event() {
        match event.unwrap() {
            RangeEvent::Token(token) => {
                assert!(!token.text.is_empty());
                out.push_str(token.text);
            }
            RangeEvent::LineEnd { last, .. } => {
                if !last {
                    out.push('\n');
                }
            }
        }
    }
    out
}

#[test]
fn test_tokens_reconstruct_random_ranges() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let modes = [c_like(), page(c_like()), Arc::new(Mode::null())];

    for _ in 0..500 {
        let text = random_text(&mut rng);
        for mode in &modes {
            assert_eq!(reassemble(mode, &text), text, "mode {}", mode.name());
        }
    }
}

#[test]
fn test_line_ends_reported_once_per_line() {
    let mode = c_like();
    let mut tokenizer = RangeTokenizer::new(Arc::clone(&mode), mode.start_state(), "a\n\nb;", 4);
    let mut ends = Vec::new();
    while let Some(event) = tokenizer.next_event() {
        if let RangeEvent::LineEnd { line, last } = event.unwrap() {
            ends.push((line, last));
        }
    }

    assert_eq!(ends, vec![(0, false), (1, false), (2, true)]);
    assert_eq!(tokenizer.into_state().downcast_ref::<CState>().unwrap().blank_lines, 1);
}

#[test]
fn test_tokenizer_starts_from_document_state() {
    let mut doc = TextDocument::with_mode("/* open\nstill */ x", c_like());
    let token = doc.token_state_at(range((1, 0), (1, 0)).from).unwrap();
    let text = doc.text_in_range(range((1, 0), (1, 10))).unwrap();

    let mut tokenizer = RangeTokenizer::new(token.mode, token.state, &text, doc.tab_size());
    let mut styles = Vec::new();
    while let Some(event) = tokenizer.next_event() {
        if let RangeEvent::Token(token) = event.unwrap() {
            styles.push((token.text.to_string(), token.style));
        }
    }

    assert_eq!(
        styles,
        vec![
            ("still */".to_string(), Some("comment")),
            (" ".to_string(), None),
            ("x".to_string(), Some("word")),
        ]
    );
}

#[test]
fn test_token_state_copies_are_independent() {
    let mut doc = TextDocument::with_mode("{{ a", c_like());
    let first = doc.token_state_at(range((0, 2), (0, 2)).from).unwrap();
    let second = doc.token_state_at(range((0, 2), (0, 2)).from).unwrap();

    let mut tokenizer = RangeTokenizer::new(first.mode, first.state, "}}", 4);
    while let Some(event) = tokenizer.next_event() {
        event.unwrap();
    }

    assert_eq!(tokenizer.into_state().downcast_ref::<CState>().unwrap().depth, 0);
    assert_eq!(second.state.downcast_ref::<CState>().unwrap().depth, 2);
}

#[test]
fn test_nested_tokens_report_inner_mode() {
    let mode = page(c_like());
    let mut tokenizer = RangeTokenizer::new(Arc::clone(&mode), mode.start_state(), "<s>a</s>", 4);
    let mut owners = Vec::new();
    while let Some(event) = tokenizer.next_event() {
        if let RangeEvent::Token(token) = event.unwrap() {
            owners.push((token.text.to_string(), token.mode.name().to_string()));
        }
    }

    let expected: Vec<(String, String)> = [("<s>", "page"), ("a", "clike"), ("</s>", "page")]
        .into_iter()
        .map(|(text, mode)| (text.to_string(), mode.to_string()))
        .collect();
    assert_eq!(owners, expected);
}
