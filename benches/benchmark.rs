//! Performance benchmarks for llm-trace-cleaner.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llm_trace_cleaner::{analyze, clean, clean_with_options, Options};

const SAMPLE_HTML: &str = r#"
<!-- wp:paragraph -->
<p data-start="0" data-end="120" class="intro">An opening paragraph with a
zero-width space​ and a soft&shy;hyphen, plus a citation marker
ContentReference[oaicite:0](index=0).</p>
<!-- /wp:paragraph -->
<div class="elementor-element" data-id="a1b2c3" data-widget_type="text-editor.default">
    <p data-llm="assistant" data-model="gpt-4">Builder-managed text that must
    survive the clean untouched in structure.</p>
</div>
<h2 data-pm-slice="1 1 []" id="model-response-message-contentr_042">Heading</h2>
<p>Read more at <a href="https://example.com/article?utm_source=newsletter&amp;utm_medium=email&amp;ref=42">the article</a>
or visit https://example.com/bare?utm_campaign=spring for details.</p>
<p data-message-id="m-7" data-testid="conversation-turn">Closing paragraph with
an invisible word joiner⁠ inside.</p>
"#;

fn bench_clean_default(c: &mut Criterion) {
    c.bench_function("clean_default", |b| {
        b.iter(|| clean(black_box(SAMPLE_HTML)));
    });
}

fn bench_clean_attributes_only(c: &mut Criterion) {
    let options = Options {
        clean_unicode: false,
        clean_content_references: false,
        clean_utm_parameters: false,
        track_locations: false,
        ..Options::default()
    };

    c.bench_function("clean_attributes_only", |b| {
        b.iter(|| clean_with_options(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_analyze(c: &mut Criterion) {
    c.bench_function("analyze", |b| {
        b.iter(|| analyze(black_box(SAMPLE_HTML)));
    });
}

criterion_group!(
    benches,
    bench_clean_default,
    bench_clean_attributes_only,
    bench_analyze
);
criterion_main!(benches);
