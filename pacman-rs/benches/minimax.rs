use std::sync::Arc;

use pacman_rs::{
    evaluation::reflex_evaluation, minimax_agent::choose_action, Direction, Layout, WorldState,
};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn small_classic(max_ghosts: usize) -> WorldState {
    let layout: Layout = include_str!("../fixtures/small_classic.lay").parse().unwrap();
    WorldState::new(Arc::new(layout), max_ghosts)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax small_classic");

    for (max_ghosts, depth) in [(1, 2), (1, 3), (2, 2)] {
        let state = small_classic(max_ghosts);

        group.bench_function(format!("ghosts {} depth {}", max_ghosts, depth), |b| {
            b.iter(|| {
                let state = black_box(&state);
                choose_action(state, black_box(depth)).unwrap()
            })
        });
    }

    group.finish();

    c.bench_function("reflex small_classic", |b| {
        let state = small_classic(2);

        b.iter(|| {
            let state = black_box(&state);
            Direction::all()
                .iter()
                .filter_map(|&action| reflex_evaluation(state, action).ok())
                .count()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
