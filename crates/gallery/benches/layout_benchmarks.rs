//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gallery::{Gallery, GalleryConfig, RecordingNotifier};
use layout::memory::{MemoryContainer, MemoryElement, MemoryHost};
use layout::{place, plan_columns, Masonry, MasonryConfig, MasonryOptions};
use std::sync::Arc;

fn page_options() -> MasonryOptions {
    gallery::config::page_options()
}

/// Deterministic pseudo-random heights.
fn heights(count: usize) -> Vec<f32> {
    (0..count).map(|i| 80.0 + ((i * 37) % 160) as f32).collect()
}

/// Benchmark the pure planning and placement step.
fn bench_placement(c: &mut Criterion) {
    let config = page_options().resolve();
    let mut group = c.benchmark_group("placement");

    for count in [10, 100, 1000] {
        let sizes = heights(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| {
                let plan = plan_columns(&config, black_box(1280.0));
                black_box(place(&config, &plan, sizes))
            })
        });
    }

    group.finish();
}

/// Benchmark full layout passes against the in-memory host.
fn bench_memory_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_layout");

    for count in [10, 100, 1000] {
        let host = MemoryHost::new();
        let container =
            MemoryContainer::with_children(1280.0, heights(count).into_iter().map(MemoryElement::fixed));
        host.register(".cards", container.clone());
        let masonry = Masonry::new(&host, MasonryConfig::new(".cards").with_options(page_options()))
            .expect("container registered");

        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| masonry.layout())
        });

        group.bench_function(BenchmarkId::new("resize", count), |b| {
            let mut wide = false;
            b.iter(|| {
                wide = !wide;
                container.set_width(if wide { 1280.0 } else { 900.0 });
                host.notify_resize()
            })
        });
    }

    group.finish();
}

/// Benchmark a layout pass over the headless DOM.
fn bench_dom_layout(c: &mut Criterion) {
    let gallery = Gallery::new(&GalleryConfig::new(), Arc::new(RecordingNotifier::new()))
        .expect("gallery page");
    let document = gallery.window().document();
    {
        let mut document = document.write();
        let cards = document
            .query_selector(".cards")
            .ok()
            .flatten()
            .expect("cards container");
        for (i, height) in heights(200).into_iter().enumerate() {
            let card = document.create_element_with_class("div", "card");
            let img = document.create_element("img");
            document.set_natural_size(img, common::geometry::Size::new(100.0 + i as f32, height));
            document.tree.append_child(card, img);
            document.tree.append_child(cards, card);
        }
    }

    c.bench_function("dom_layout_200", |b| b.iter(|| gallery.masonry().layout()));
}

criterion_group!(benches, bench_placement, bench_memory_layout, bench_dom_layout);
criterion_main!(benches);
