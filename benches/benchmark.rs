//! Performance benchmarks for html-slim.
//!
//! Run with: `cargo bench`
//!
//! - a small hand-written page under default and aggressive options
//! - the selector path, which matches against every visited element
//! - synthetic pages of growing size for throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use html_slim::{dom, slim, Options, Slimmer};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Page</title>
    <link rel="stylesheet" href="/site.css">
    <link rel="preload" href="/app.js" as="script">
    <style>body { margin: 0; }</style>
    <script type="application/ld+json">{"@type": "Article"}</script>
</head>
<body>
    <!-- header -->
    <header data-v-1f2e class="top"><a href="/" onclick="track()">Home</a></header>
    <main>
        <article>
            <h1 style="color: red">Sample Title</h1>
            <p>First paragraph     with   extra
            spacing that should collapse.</p>
            <pre>  keep
    this   </pre>
            <template><p>hidden</p></template>
        </article>
    </main>
    <script>window.dataLayer = [];</script>
</body>
</html>
"#;

fn synthetic_page(sections: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><style>p{}</style></head><body>\n");
    for i in 0..sections {
        html.push_str(&format!(
            "  <section id=\"s{i}\" data-v-{i}>\n    <!-- section {i} -->\n    <h2 onclick=\"x()\">Heading {i}</h2>\n    <p style=\"a\">Body   text\n     for {i}</p>\n    <script>track({i})</script>\n  </section>\n"
        ));
    }
    html.push_str("</body></html>\n");
    html
}

fn slimmer(options: &Options) -> Slimmer {
    match Slimmer::new(options) {
        Ok(slimmer) => slimmer,
        Err(err) => panic!("benchmark options rejected: {err}"),
    }
}

fn bench_slim_default(c: &mut Criterion) {
    c.bench_function("slim_default", |b| {
        b.iter(|| slim(black_box(SAMPLE_HTML)));
    });
}

fn bench_slim_aggressive(c: &mut Criterion) {
    let slimmer = slimmer(&Options {
        attr: Some("^data-v-".into()),
        ..Options::aggressive()
    });

    c.bench_function("slim_aggressive", |b| {
        b.iter(|| slimmer.slim(black_box(SAMPLE_HTML)));
    });
}

fn bench_selector(c: &mut Criterion) {
    let slimmer = slimmer(&Options {
        selector: Some("body > header, main article > h1:first-child, [class~=top]".into()),
        ..Options::default()
    });

    c.bench_function("slim_selector", |b| {
        b.iter(|| slimmer.slim(black_box(SAMPLE_HTML)));
    });
}

fn bench_parse_serialize(c: &mut Criterion) {
    c.bench_function("parse_serialize", |b| {
        b.iter(|| dom::parse(black_box(SAMPLE_HTML)).html());
    });
}

fn bench_page_sizes(c: &mut Criterion) {
    let slimmer = slimmer(&Options::aggressive());
    let mut group = c.benchmark_group("page_size");

    for sections in [10, 100, 1000] {
        let html = synthetic_page(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| slimmer.slim(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_slim_default,
    bench_slim_aggressive,
    bench_selector,
    bench_parse_serialize,
    bench_page_sizes,
);
criterion_main!(benches);
