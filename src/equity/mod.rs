//! Monte Carlo equity estimation.
//!
//! Estimates the probability that a hero hand wins (plus half the
//! probability that it ties) at showdown against `N` opponents holding
//! random cards. Iterations are partitioned across independent workers
//! seeded `base_seed + worker_index`; workers share no mutable state and
//! their counts are summed once every worker has finished.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardMask, Deck, FastRng};
use crate::error::EngineError;
use crate::eval::evaluate_seven;

/// Aggregated outcome of an equity simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// Iterations where hero strictly beat every opponent.
    pub wins: u64,
    /// Iterations where hero tied at least one opponent and lost to none.
    pub ties: u64,
    /// Iterations where at least one opponent beat hero.
    pub losses: u64,
    /// Iterations actually run (may round down from the request).
    pub iterations: u64,
    /// `(wins + ties / 2) / iterations`, or 0 when no iterations ran.
    pub equity: f64,
}

impl EquityResult {
    fn from_counts(wins: u64, ties: u64, losses: u64) -> Self {
        let iterations = wins + ties + losses;
        let equity = if iterations > 0 {
            (wins as f64 + ties as f64 * 0.5) / iterations as f64
        } else {
            0.0
        };
        Self { wins, ties, losses, iterations, equity }
    }

    /// The zero-iteration identity result.
    fn empty() -> Self {
        Self { wins: 0, ties: 0, losses: 0, iterations: 0, equity: 0.0 }
    }
}

/// Estimate hero equity with the default worker count (one per hardware
/// thread).
///
/// `board` holds 0-5 community cards. A `seed` of `None` or `Some(0)`
/// draws a hardware seed; pass an explicit non-zero seed for reproducible
/// results.
pub fn equity(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: u64,
    seed: Option<u64>,
) -> Result<EquityResult, EngineError> {
    equity_with_threads(hero, board, opponents, iterations, seed, rayon::current_num_threads())
}

/// Estimate hero equity with an explicit worker count.
///
/// Counts are bit-reproducible for a fixed `(seed, threads)` pair.
pub fn equity_with_threads(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: u64,
    seed: Option<u64>,
    threads: usize,
) -> Result<EquityResult, EngineError> {
    let dead = validate_request(hero, board, opponents)?;
    if iterations == 0 {
        return Ok(EquityResult::empty());
    }

    let base_seed = match seed {
        Some(s) if s != 0 => s,
        _ => FastRng::new(0).next_u64(),
    };

    // Never let a worker own zero iterations.
    let workers = threads.max(1).min(iterations as usize);
    let per_worker = iterations / workers as u64;

    let counts: Vec<(u64, u64, u64)> = (0..workers as u64)
        .into_par_iter()
        .map(|w| {
            run_worker(hero, board, opponents, per_worker, base_seed.wrapping_add(w), dead)
        })
        .collect();

    let (mut wins, mut ties, mut losses) = (0u64, 0u64, 0u64);
    for (w, t, l) in counts {
        wins += w;
        ties += t;
        losses += l;
    }
    Ok(EquityResult::from_counts(wins, ties, losses))
}

/// Check the request is dealable and return the dead-card mask.
fn validate_request(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
) -> Result<CardMask, EngineError> {
    if board.len() > 5 {
        return Err(EngineError::InvalidBoard(board.len()));
    }

    let mut dead = CardMask::EMPTY;
    for &card in hero.iter().chain(board.iter()) {
        if dead.contains(card) {
            return Err(EngineError::DuplicateCards);
        }
        dead.add(card);
    }

    let live = 52 - dead.count() as usize;
    let needed_board = 5 - board.len();
    let maximum = live.saturating_sub(needed_board) / 2;
    if opponents == 0 || opponents > maximum {
        return Err(EngineError::TooManyOpponents { requested: opponents, maximum });
    }

    Ok(dead)
}

/// One worker: its own survivor deck, its own generator, no shared state.
fn run_worker(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: u64,
    seed: u64,
    dead: CardMask,
) -> (u64, u64, u64) {
    let mut rng = FastRng::new(seed);
    let mut deck = Deck::new();
    deck.exclude(dead);

    let board_count = board.len();
    let mut hero_hand = [Card::SENTINEL; 7];
    let mut opp_hand = [Card::SENTINEL; 7];
    hero_hand[0] = hero[0];
    hero_hand[1] = hero[1];
    for (i, &c) in board.iter().enumerate() {
        hero_hand[2 + i] = c;
        opp_hand[2 + i] = c;
    }

    let (mut wins, mut ties, mut losses) = (0u64, 0u64, 0u64);

    for _ in 0..iterations {
        deck.shuffle_with(&mut rng);
        let drawn = deck.cards();
        let mut pos = 0;

        // Complete the board from the shuffled survivors.
        for slot in board_count..5 {
            let card = drawn[pos];
            pos += 1;
            hero_hand[2 + slot] = card;
            opp_hand[2 + slot] = card;
        }

        let hero_score = evaluate_seven(&hero_hand);

        let mut won = true;
        let mut tied = false;
        for _ in 0..opponents {
            opp_hand[0] = drawn[pos];
            opp_hand[1] = drawn[pos + 1];
            pos += 2;

            let opp_score = evaluate_seven(&opp_hand);
            if opp_score > hero_score {
                won = false;
                break;
            } else if opp_score == hero_score {
                tied = true;
            }
        }

        if !won {
            losses += 1;
        } else if tied {
            ties += 1;
        } else {
            wins += 1;
        }
    }

    (wins, ties, losses)
}
