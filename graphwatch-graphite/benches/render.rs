//! Benchmarks for building render URLs and parsing rate responses.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graphwatch_graphite::{
    parse_rate, rate_query, ChannelStats, GraphOptions, GraphSettings, MetricTarget,
    NoPreference, Topic,
};

fn options() -> GraphOptions {
    let settings = GraphSettings::builder()
        .graphite_url("http://graphite.local")
        .statsd_prefix(true)
        .build();
    GraphOptions::resolve(&settings, Some("24h"), &mut NoPreference).unwrap()
}

fn bench_resolve_options(c: &mut Criterion) {
    let settings = GraphSettings::builder()
        .graphite_url("http://graphite.local")
        .build();

    c.bench_function("resolve_options", |b| {
        b.iter(|| GraphOptions::resolve(&settings, black_box(Some("48h")), &mut NoPreference))
    });
}

fn bench_sparkline(c: &mut Criterion) {
    let options = options();
    let topic = Topic::new("orders");

    c.bench_function("sparkline_topic", |b| {
        b.iter(|| topic.sparkline(&options, black_box("depth")))
    });
}

fn bench_large_graph(c: &mut Criterion) {
    let options = options();
    let channel = ChannelStats::new("orders", "archive", "10.0.0.1:4151");

    c.bench_function("large_graph_channel", |b| {
        b.iter(|| channel.large_graph(&options, black_box("message_count")))
    });
}

fn bench_rate(c: &mut Criterion) {
    let options = options();
    let topic = Topic::new("orders");
    let body = br#"[{"target":"x","datapoints":[[120,1000],[180,1060]]}]"#;

    c.bench_function("rate_query", |b| {
        b.iter(|| rate_query(&topic.rate_target(&options)))
    });

    c.bench_function("parse_rate", |b| b.iter(|| parse_rate(black_box(body))));
}

criterion_group!(
    benches,
    bench_resolve_options,
    bench_sparkline,
    bench_large_graph,
    bench_rate
);
criterion_main!(benches);
