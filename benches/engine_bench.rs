use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use assimilate::board::{Board, Coord, Player, CORNERS};
use assimilate::game::Game;
use assimilate::movegen::legal_moves;
use assimilate::search::{analyse, recommend, TieBreak};

/// A crowded midgame position reached by seeded advisor play.
fn midgame() -> Board {
    let mut game = Game::new(9, &CORNERS).unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);
    while game.ply() < 30 && !game.outcome().is_over() {
        game.step(TieBreak::Random, &mut rng).unwrap();
    }
    game.board().clone()
}

fn bench_recommend_opening(c: &mut Criterion) {
    let board = Board::with_preset(9, &CORNERS).unwrap();
    c.bench_function("recommend_opening", |b| {
        b.iter(|| recommend(black_box(board.grid()), black_box(Player::Black)))
    });
}

fn bench_recommend_midgame(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("recommend_midgame", |b| {
        b.iter(|| recommend(black_box(board.grid()), black_box(Player::Black)))
    });
}

fn bench_analyse_midgame(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("analyse_midgame", |b| {
        b.iter(|| analyse(black_box(board.grid()), black_box(Player::White)))
    });
}

fn bench_legal_moves_midgame(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| legal_moves(black_box(board.grid()), black_box(Player::Black)))
    });
}

fn bench_judge_end(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("judge_end_midgame", |b| {
        b.iter(|| black_box(&board).judge_end())
    });
}

fn bench_copy_move(c: &mut Criterion) {
    let board = Board::with_preset(9, &CORNERS).unwrap();
    let mut scratch = board.clone();
    c.bench_function("copy_move_then_reset", |b| {
        b.iter(|| {
            scratch.clone_from(&board);
            scratch
                .copy_move(Player::Black, black_box(Coord::new(1, 1)))
                .unwrap()
        })
    });
}

fn bench_board_clone(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("board_clone", |b| b.iter(|| black_box(&board).clone()));
}

criterion_group!(
    benches,
    bench_recommend_opening,
    bench_recommend_midgame,
    bench_analyse_midgame,
    bench_legal_moves_midgame,
    bench_judge_end,
    bench_copy_move,
    bench_board_clone,
);
criterion_main!(benches);
