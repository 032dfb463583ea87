use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chess_rules::game::{notation::CoordinateMove, perft::perft, state::GameState};

/// Giuoco piano after both sides castled, a busy middlegame with castling and
/// captures available.
const OPENING: &[&str] = &[
    "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "c2c3", "g8f6", "d2d3", "d7d6", "e1g1",
    "e8g8",
];

fn opening_position() -> GameState {
    let mut state = GameState::initial();
    for mv in OPENING {
        let CoordinateMove {
            from,
            to,
            promoting_to,
        } = mv.parse().unwrap();
        state.play(from, to, promoting_to).unwrap();
    }
    state
}

fn bench_valid_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("valid_moves");
    for (name, state) in [
        ("initial", GameState::initial()),
        ("giuoco_piano", opening_position()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &state, |b, state| {
            b.iter(|| black_box(state).valid_moves().len())
        });
    }
    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    let state = GameState::initial();
    for (depth, nodes) in [(2u8, 400u64), (3, 8902)] {
        group.throughput(Throughput::Elements(nodes));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let counted = perft(black_box(&state), depth);
                assert_eq!(counted, nodes);
                counted
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_valid_moves, bench_perft);
criterion_main!(benches);
