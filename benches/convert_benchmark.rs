//! Benchmarks for htmldocx conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks convert synthetic HTML documents of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use htmldocx::{ConvertOptions, HtmlParser, ModelBuilder};

/// Creates a synthetic document with the given number of sections.
fn create_test_html(sections: usize) -> String {
    let mut html = String::from("<html><body>");

    for i in 0..sections {
        html.push_str(&format!("<h2>Section {}</h2>", i + 1));
        html.push_str(
            "<p style=\"color: #333; line-height: 1.5\">Benchmark text with <b>bold</b>, \
             <i>italic</i> and <span style=\"color: tomato; font-size: 14px\">styled</span> runs.</p>",
        );
        html.push_str("<ul><li>First point<ol><li>Nested</li><li>Items</li></ol></li><li>Second point</li></ul>");
        html.push_str(
            "<table><tr><th>Name</th><th>Value</th></tr>\
             <tr><td>alpha</td><td>1</td></tr><tr><td>beta</td></tr></table>",
        );
    }

    html.push_str("</body></html>");
    html
}

/// Benchmark the full pipeline at various sizes.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let options = ConvertOptions::default();

    for sections in [1, 10, 100].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| htmldocx::convert(black_box(&html), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parsing and model building without emission.
fn bench_stages(c: &mut Criterion) {
    let html = create_test_html(10);

    c.bench_function("parse_html", |b| {
        b.iter(|| HtmlParser::new().parse(black_box(&html)).unwrap());
    });

    let tree = HtmlParser::new().parse(&html).unwrap();
    c.bench_function("build_model", |b| {
        b.iter(|| ModelBuilder::new().build(black_box(&tree)).unwrap());
    });
}

/// Benchmark color resolution.
fn bench_colors(c: &mut Criterion) {
    c.bench_function("resolve_colors", |b| {
        b.iter(|| {
            for token in ["tomato", "#1e90ff", "rgb(10, 20, 30)", "LightGoldenRodYellow"] {
                let _ = htmldocx::resolve_color(black_box(token));
            }
        });
    });
}

criterion_group!(benches, bench_convert, bench_stages, bench_colors);
criterion_main!(benches);
