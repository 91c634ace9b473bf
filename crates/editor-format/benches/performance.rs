use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_format::{CommentAction, Document, FormatExt, Position, TextDocument, TextRange};
use editor_format_mode::{Indentation, Mode, StringStream};
use std::sync::Arc;

/// Brace-depth mode breaking after `{`, `}` and `;`.
fn braces() -> Arc<Mode> {
    Arc::new(
        Mode::builder("braces", || 0usize, |stream: &mut StringStream<'_>, depth: &mut usize| {
            if stream.eat_space() {
                return Ok(None);
            }
            match stream.next_char() {
                Some('{') => *depth += 1,
                Some('}') => *depth = depth.saturating_sub(1),
                Some(';') => {}
                _ => {
                    stream.eat_while(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | ';'));
                }
            }
            Ok(None)
        })
        .comments("/*", "*/")
        .indent(|depth: &usize, text_after: &str, _: &str| {
            let depth = if text_after.starts_with('}') {
                depth.saturating_sub(1)
            } else {
                *depth
            };
            Indentation::Column(depth * 4)
        })
        .newline_after_token(|_, token, _, _: &usize| matches!(token, "{" | "}" | ";"))
        .build(),
    )
}

fn minified(blocks: usize) -> String {
    let mut out = String::with_capacity(blocks * 48);
    for i in 0..blocks {
        out.push_str(&format!("fn f{i}(){{let a={i};if(a){{b();c();}}}}"));
    }
    out
}

fn whole(doc: &TextDocument) -> TextRange {
    let last = doc.line_count() - 1;
    let len = doc.line_text(last).map_or(0, |line| line.chars().count());
    TextRange::new(Position::new(0, 0), Position::new(last, len))
}

fn bench_format_minified(c: &mut Criterion) {
    let text = minified(2_000);
    c.bench_function("auto_format/2k_blocks", |b| {
        b.iter_batched(
            || TextDocument::with_mode(&text, braces()),
            |mut doc| {
                let all = whole(&doc);
                doc.auto_format_range(all).unwrap();
                black_box(doc.line_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_reindent_formatted(c: &mut Criterion) {
    let mut formatted = TextDocument::with_mode(&minified(2_000), braces());
    let all = whole(&formatted);
    formatted.auto_format_range(all).unwrap();
    let text = formatted.text();

    c.bench_function("auto_indent/formatted_2k_blocks", |b| {
        b.iter_batched(
            || TextDocument::with_mode(&text, braces()),
            |mut doc| {
                let all = whole(&doc);
                doc.auto_indent_range(all).unwrap();
                black_box(doc.version());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_comment_deep_in_document(c: &mut Criterion) {
    let mut formatted = TextDocument::with_mode(&minified(2_000), braces());
    let all = whole(&formatted);
    formatted.auto_format_range(all).unwrap();
    let text = formatted.text();

    // Deep enough that the state cache has to be built first.
    let line = formatted.line_count() / 2;
    c.bench_function("toggle_comment/middle_line", |b| {
        b.iter_batched(
            || TextDocument::with_mode(&text, braces()),
            |mut doc| {
                let len = doc.line_text(line).map_or(0, |l| l.chars().count());
                let range = TextRange::new(Position::new(line, 0), Position::new(line, len));
                doc.toggle_comment(range, CommentAction::Comment).unwrap();
                black_box(doc.version());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_format_minified,
    bench_reindent_formatted,
    bench_comment_deep_in_document
);
criterion_main!(benches);
