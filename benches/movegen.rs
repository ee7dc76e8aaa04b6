// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use arbiter::{GameState, Move, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn legal_moves_start(c: &mut Criterion) {
    let state = GameState::new();
    c.bench_function("legal moves, start position", move |b| {
        b.iter(|| black_box(&state).legal_moves())
    });
}

fn legal_moves_kiwipete(c: &mut Criterion) {
    let state = GameState::from_fen(KIWIPETE).unwrap();
    c.bench_function("legal moves, kiwipete", move |b| {
        b.iter(|| black_box(&state).legal_moves())
    });
}

fn apply_move_start(c: &mut Criterion) {
    let state = GameState::new();
    let mov = Move::double_pawn_push(Square::E2, Square::E4);
    c.bench_function("apply move, start position", move |b| {
        b.iter(|| black_box(&state).apply_move(mov, None).unwrap())
    });
}

fn perft_start_3(c: &mut Criterion) {
    let state = GameState::new();
    c.bench_function("perft(3), start position", move |b| {
        b.iter(|| arbiter::perft(black_box(&state), 3))
    });
}

criterion_group!(
    benches,
    legal_moves_start,
    legal_moves_kiwipete,
    apply_move_start,
    perft_start_3
);
criterion_main!(benches);
