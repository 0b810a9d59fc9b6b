use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use beachline::{
    generators::{grid, random_sites, uniform_sites},
    voronoi, Bounds, Sweeper,
};

fn uniform(c: &mut Criterion) {
    let bounds = Bounds::new((0.0, 0.0), 500.0, 500.0);
    let mut group = c.benchmark_group("uniform");
    for count in [10, 100, 1000] {
        let sites = uniform_sites(count, &bounds, 0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sites, |b, sites| {
            b.iter(|| black_box(voronoi(sites.iter().copied(), bounds)))
        });
    }
    group.finish();
}

fn integer_grid(c: &mut Criterion) {
    // Integer coordinates in a small area, so lots of duplicates and co-circular sites.
    let bounds = Bounds::new((0.0, 0.0), 50.0, 50.0);
    let sites = random_sites(500, 50, 50, 0);
    c.bench_function("random integer sites", |b| {
        b.iter(|| black_box(voronoi(sites.iter().copied(), bounds)))
    });

    let sites = grid(20, 2.5);
    c.bench_function("square grid", |b| {
        b.iter(|| black_box(voronoi(sites.iter().copied(), bounds)))
    });
}

fn just_the_sweep(c: &mut Criterion) {
    let bounds = Bounds::new((0.0, 0.0), 500.0, 500.0);
    let sites = uniform_sites(1000, &bounds, 1);
    c.bench_function("just the sweep", |b| {
        b.iter(|| {
            let mut sweeper = Sweeper::new(sites.iter().copied(), bounds).unwrap();
            while sweeper.step().unwrap() != beachline::SweepState::Finished {}
            black_box(sweeper.half_edges().len())
        })
    });
}

criterion_group!(benches, uniform, integer_grid, just_the_sweep);
criterion_main!(benches);
