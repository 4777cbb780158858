//! Benchmarks for position lookups in the sectioned list
//!
//! Lookups walk the sections linearly; these measure how that scales with
//! screen-sized lists.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use backer::sections::SectionedList;

/// A feed-shaped list: a few small header sections, then one large section.
fn feed_shaped(rows: usize) -> SectionedList<u64> {
    let mut list = SectionedList::new();
    list.add_sections([vec![], vec![0], vec![], vec![1, 2]]);
    list.add_section((0..rows as u64).collect());
    list
}

/// Many small sections, the worst case for the walk.
fn many_sections(rows: usize) -> SectionedList<u64> {
    SectionedList::from_sections((0..rows as u64).map(|i| vec![i]).collect())
}

fn bench_section_row_from_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_row_from_position");

    for size in [10, 100, 500].iter() {
        let feed = feed_shaped(*size);
        let scattered = many_sections(*size);
        group.throughput(Throughput::Elements(feed.item_count() as u64));

        group.bench_with_input(BenchmarkId::new("feed", size), &feed, |b, list| {
            b.iter(|| {
                for position in 0..list.item_count() {
                    black_box(list.section_row_from_position(black_box(position)).ok());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("one_per_section", size), &scattered, |b, list| {
            b.iter(|| {
                for position in 0..list.item_count() {
                    black_box(list.section_row_from_position(black_box(position)).ok());
                }
            });
        });
    }

    group.finish();
}

fn bench_snapshot_after_mutation(c: &mut Criterion) {
    c.bench_function("set_section_with_live_snapshot", |b| {
        let mut list = feed_shaped(100);
        b.iter(|| {
            let snapshot = list.snapshot();
            let _ = list.set_section(1, vec![black_box(7)]);
            black_box(snapshot.item_count())
        });
    });
}

criterion_group!(benches, bench_section_row_from_position, bench_snapshot_after_mutation);
criterion_main!(benches);
