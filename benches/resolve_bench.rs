// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pfp_resolver::{extract_from_markup, select_largest, PageSnapshot, Pipeline, ResolverConfig};
use url::Url;

/// Profile page padded with script payload, roughly the size of a real one
fn profile_page() -> String {
    let filler = r#"{"require":[["ScheduledServerJS","handle",null,[{"__bbox":{"define":[]}}]]]}"#.repeat(2_000);
    format!(
        r#"<!DOCTYPE html><html><head><title>someone</title>
        <meta property="og:image" content="https://cdn.example.com/og.jpg"></head>
        <body><script>{}</script>
        <script>{{"user":{{"hd_profile_pic_versions":[{{"width":320,"url":"https://cdn.example.com/320.jpg"}},{{"width":1080,"url":"https://cdn.example.com/1080.jpg"}}]}}}}</script>
        </body></html>"#,
        filler
    )
}

fn srcset_benchmark(c: &mut Criterion) {
    let srcset = "https://cdn.example.com/150.jpg 150w, https://cdn.example.com/240.jpg 240w, \
                  https://cdn.example.com/320.jpg 320w, https://cdn.example.com/640.jpg 640w, \
                  https://cdn.example.com/1080.jpg 1080w";

    c.bench_function("select_largest", |b| b.iter(|| select_largest(black_box(srcset))));
}

fn embedded_benchmark(c: &mut Criterion) {
    let page = profile_page();

    c.bench_function("extract_from_markup", |b| {
        b.iter(|| extract_from_markup(black_box(&page)))
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let pipeline = Pipeline::new(&ResolverConfig::default()).unwrap();
    let url = Url::parse("https://www.example.com/someone/").unwrap();
    let snapshot = PageSnapshot::from_markup(url.clone(), profile_page());

    c.bench_function("pipeline_resolve", |b| {
        b.iter(|| pipeline.resolve(black_box(&snapshot)))
    });

    c.bench_function("snapshot_parse", |b| {
        b.iter(|| PageSnapshot::from_markup(url.clone(), black_box(profile_page())))
    });
}

criterion_group!(benches, srcset_benchmark, embedded_benchmark, pipeline_benchmark);
criterion_main!(benches);
