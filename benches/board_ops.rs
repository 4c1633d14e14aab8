use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparse_stack::core::Board;
use sparse_stack::engine::{run, EngineConfig};
use sparse_stack::types::Piece;

fn bench_dense_placements(c: &mut Criterion) {
    c.bench_function("place_1000_dense", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for i in 0..1000i64 {
                let color = ((i * 7 + i / 3) % 5) as u8;
                let piece = Piece::new(color).unwrap();
                board.place_piece(black_box(i % 16), piece).unwrap();
            }
            board
        })
    });
}

fn bench_sparse_placements(c: &mut Criterion) {
    c.bench_function("place_200_far_apart", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for i in 0..200i64 {
                let x = (i * 7_919_993) % 999_999_999 - 499_999_999;
                board.place_piece(black_box(x), Piece::new(1).unwrap()).unwrap();
            }
            board
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    let setup = [
        (1, 0),
        (2, 0),
        (1, 1),
        (2, 1),
        (1, 2),
        (2, 2),
        (2, 3),
        (7, 3),
    ];

    c.bench_function("two_round_cascade", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for (color, x) in setup {
                board.place_piece(x, Piece::new(color).unwrap()).unwrap();
            }
            board.place_piece(black_box(-1), Piece::new(1).unwrap()).unwrap()
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let input: String = (0..2000)
        .map(|i| format!("{} {}\n", (i * 3 + i / 5) % 4, (i % 40) - 20))
        .collect();
    let config = EngineConfig::default();

    c.bench_function("pipeline_2000_lines", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(16 * 1024);
            run(&config, Cursor::new(black_box(input.as_bytes())), &mut out).unwrap();
            out
        })
    });
}

criterion_group!(
    benches,
    bench_dense_placements,
    bench_sparse_placements,
    bench_cascade,
    bench_pipeline
);
criterion_main!(benches);
