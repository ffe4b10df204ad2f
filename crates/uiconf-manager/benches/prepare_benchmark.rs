//! Preparation benchmarks.

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uiconf_builder::build_pool;
use uiconf_cache::MemoryCacheStore;
use uiconf_core::{ComponentSchema, Descriptor, DescriptorGraph, Value};
use uiconf_manager::{ManagerBuilder, ManagerOptions, SessionContext};
use uiconf_source::MemorySource;

const SURFACE: &str = "cms_page_listing";

/// A listing with `groups` column groups of 20 columns each.
fn listing(groups: usize) -> DescriptorGraph {
    let mut root = Descriptor::new().named("listing");
    for group in 0..groups {
        let mut columns = Descriptor::new().named(&format!("columns_{group}"));
        for column in 0..20 {
            let descriptor = Descriptor::new()
                .named(&format!("column_{group}_{column}"))
                .with_argument(
                    "data",
                    Value::map([("config", Value::map([("sortOrder", column as i64)]))]),
                );
            columns = columns.with_child("column", descriptor);
        }
        root = root.with_child("columns", columns);
    }
    DescriptorGraph::with_root("listing", root)
}

fn source(groups: usize) -> MemorySource {
    MemorySource::new()
        .with_surface(SURFACE, listing(groups))
        .with_schema(
            "column",
            ComponentSchema::new().with_argument(
                "data",
                Value::map([(
                    "config",
                    Value::map([("sortable", true), ("visible", true)]),
                )]),
            ),
        )
}

fn build_tree(c: &mut Criterion) {
    let source = source(10);
    let graph = listing(10);
    c.bench_function("build_pool_200_columns", |b| {
        b.iter(|| build_pool(black_box(SURFACE), black_box(&graph), &source))
    });
}

fn prepare_cached(c: &mut Criterion) {
    let manager = ManagerBuilder::from_source(source(10))
        .cache_store(Rc::new(MemoryCacheStore::new()))
        .build();
    c.bench_function("prepare_cached_200_columns", |b| {
        b.iter(|| {
            let mut ctx = SessionContext::new();
            manager.prepare_data(&mut ctx, black_box(SURFACE))
        })
    });
}

fn prepare_uncached(c: &mut Criterion) {
    let manager = ManagerBuilder::from_source(source(10))
        .options(ManagerOptions::new().with_cache_enabled(false))
        .build();
    c.bench_function("prepare_uncached_200_columns", |b| {
        b.iter(|| {
            let mut ctx = SessionContext::new();
            manager.prepare_data(&mut ctx, black_box(SURFACE))
        })
    });
}

criterion_group!(benches, build_tree, prepare_cached, prepare_uncached);
criterion_main!(benches);
