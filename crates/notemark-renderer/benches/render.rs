//! Benchmarks for dialect rendering performance.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use notemark_renderer::{HtmlBackend, MarkdownRenderer};

/// Generate a document with the shapes a real post mixes.
fn generate_document(sections: usize) -> String {
    let mut md = String::with_capacity(sections * 400);
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!(
            "Paragraph {i} with **bold**, *italic*, ==marked== and `code`.\n\n"
        ));
        md.push_str("> [!NOTE] Section note with a [link](https://example.com).\n\n");
        md.push_str("- [x] first step\n- [ ] second step\n\n");
        md.push_str("| Col A | Col B |\n| --- | ---: |\n| 1 | 2 |\n\n");
        md.push_str("```rust\nfn demo() -> u32 {\n    41 + 1\n}\n```\n\n");
    }
    md
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");
    for sections in [1usize, 10, 100] {
        let markdown = generate_document(sections);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &markdown,
            |b, markdown| {
                b.iter(|| MarkdownRenderer::<HtmlBackend>::new().render_source(markdown));
            },
        );
    }
    group.finish();
}

/// Unclosed markers force the literal-fallback path everywhere; this pins
/// the cost of adversarial input.
fn bench_marker_soup(c: &mut Criterion) {
    let soup = "**a *b ~~c ==d ^e `f [g \n".repeat(2_000);
    c.bench_function("render_marker_soup", |b| {
        b.iter(|| MarkdownRenderer::<HtmlBackend>::new().render_source(&soup));
    });
}

criterion_group!(benches, bench_render_varying_sizes, bench_marker_soup);
criterion_main!(benches);
