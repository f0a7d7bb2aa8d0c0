//! Benchmarks for trie queries and computed-style lookups
//!
//! Run with: cargo bench -p css-style

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use css_selectors::Selector;
use css_style::StyleEngine;
use std::hint::black_box;

/// A stylesheet-shaped rule set: type, class, compound and descendant rules.
fn populated_engine() -> StyleEngine {
    let mut engine = StyleEngine::with_builtins().unwrap();

    let rules: &[(&str, &[(&str, &str)])] = &[
        ("div", &[("display", "block")]),
        ("span", &[("display", "inline")]),
        (".container", &[("width", "100%"), ("margin-left", "auto")]),
        (".row", &[("display", "flex"), ("flex-direction", "row")]),
        (".col", &[("display", "flex"), ("flex-direction", "column")]),
        (".card", &[("padding-top", "16px"), ("background-color", "#ffffff")]),
        ("div.card", &[("border-top-width", "1px")]),
        ("#header", &[("height", "64px"), ("position", "fixed")]),
        ("#header .title", &[("font-size", "20px"), ("font-weight", "bold")]),
        ("body div p", &[("line-height", "1.5")]),
        ("section article p", &[("color", "#333333")]),
        (".sidebar a:hover", &[("color", "#0066cc")]),
        ("*", &[("box-sizing", "border-box")]),
    ];

    for (selector, pairs) in rules {
        let properties = engine.parse_properties(pairs);
        engine.add_rule(selector, properties, Some("bench.css")).unwrap();
    }

    engine
}

const QUERIES: &[(&str, &str)] = &[
    ("type", "div"),
    ("classes", "div.card.container"),
    ("descendants", "body section article p"),
    ("deep", "html body#root div.container section article div.card p.text"),
];

fn bench_query(c: &mut Criterion) {
    let engine = populated_engine();
    let mut group = c.benchmark_group("trie_query");

    for (name, text) in QUERIES {
        let selector = Selector::parse(text).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &selector, |b, selector| {
            b.iter(|| engine.query_selector(black_box(selector)));
        });
    }

    group.finish();
}

fn bench_computed_style(c: &mut Criterion) {
    let mut group = c.benchmark_group("computed_style");

    for (name, text) in QUERIES {
        let mut engine = populated_engine();
        let selector = Selector::parse(text).unwrap();

        // Primed cache: the common steady-state lookup.
        engine.computed_style(&selector);
        group.bench_with_input(
            BenchmarkId::new("cached", name),
            &selector,
            |b, selector| {
                b.iter(|| engine.computed_style(black_box(selector)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_query, bench_computed_style);
criterion_main!(benches);
