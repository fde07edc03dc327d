use criterion::{black_box, criterion_group, criterion_main, Criterion};
use passivecalc::catalog::series::{E192, E24};
use passivecalc::designers::design_divider;
use passivecalc::{find_nearest, Catalog, DecadeRange};

fn bench_find_nearest(c: &mut Criterion) {
    let catalog = E192.expand(DecadeRange::RESISTORS);

    c.bench_function("find_nearest_e192", |b| {
        b.iter(|| find_nearest(black_box(31_415.9), black_box(catalog.iter().copied())));
    });
}

fn bench_divider(c: &mut Criterion) {
    let catalog = Catalog::series(&E24, DecadeRange::RESISTORS);

    c.bench_function("design_divider_e24", |b| {
        b.iter(|| design_divider(black_box(12.0), black_box(3.3), &catalog, 10));
    });
}

criterion_group!(benches, bench_find_nearest, bench_divider);
criterion_main!(benches);
