use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn populate_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");
    for (name, config) in [
        ("beginner", GameConfig::BEGINNER),
        ("intermediate", GameConfig::INTERMEDIATE),
        ("expert", GameConfig::EXPERT),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut layout = MineLayout::create_empty(config);
                let mut placer = RandomMinePlacer::seeded(seed);
                layout.populate((0, 0), &mut placer).unwrap();
                black_box(layout)
            })
        });
    }
    group.finish();
}

fn flood_fill_full_board(c: &mut Criterion) {
    let config = GameConfig::new(200, 200, 1).unwrap();
    c.bench_function("flood_fill_200x200", |b| {
        b.iter(|| {
            let mut session = GameSession::new(config, PresetMinePlacer::new([(199, 199)]));
            black_box(session.reveal((0, 0)).unwrap())
        })
    });
}

criterion_group!(benches, populate_tiers, flood_fill_full_board);
criterion_main!(benches);
