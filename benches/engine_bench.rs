//! Benchmarks for the hot paths: hand evaluation, equity simulation, and
//! one CFR iteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use holdem_engine::cards::{parse_cards, Card, Deck, FastRng};
use holdem_engine::cfr::{CfrConfig, CfrSolver};
use holdem_engine::equity::equity_with_threads;
use holdem_engine::eval::evaluate_seven;
use holdem_engine::games::kuhn::KuhnPoker;

fn evaluator_benchmark(c: &mut Criterion) {
    let mut rng = FastRng::new(42);
    let mut deck = Deck::new();
    let mut hands: Vec<[Card; 7]> = Vec::with_capacity(1_000);
    for _ in 0..1_000 {
        deck.shuffle_with(&mut rng);
        let cards = deck.cards();
        hands.push([cards[0], cards[1], cards[2], cards[3], cards[4], cards[5], cards[6]]);
    }

    c.bench_function("evaluate_seven_1000_hands", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for hand in &hands {
                acc = acc.wrapping_add(evaluate_seven(black_box(hand)).value() as u64);
            }
            acc
        })
    });
}

fn equity_benchmark(c: &mut Criterion) {
    let hero = parse_cards("AsKs").unwrap();
    let board = parse_cards("7h8d2c").unwrap();

    c.bench_function("equity_10k_single_thread", |b| {
        b.iter(|| {
            equity_with_threads(
                [hero[0], hero[1]],
                black_box(&board),
                2,
                10_000,
                Some(1),
                1,
            )
            .unwrap()
        })
    });
}

fn cfr_benchmark(c: &mut Criterion) {
    let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());

    c.bench_function("kuhn_cfr_iteration", |b| {
        b.iter(|| {
            solver.run_iteration();
            black_box(solver.iteration())
        })
    });
}

criterion_group!(benches, evaluator_benchmark, equity_benchmark, cfr_benchmark);
criterion_main!(benches);
