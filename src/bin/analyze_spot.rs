//! Spot analysis binary.
//!
//! Assesses a handful of representative decision points end to end
//! (equity, texture, EQR, pot odds, recommendation) and writes the
//! results to a JSON report.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use serde::Serialize;

use holdem_engine::advisor::{assess, Spot, SpotAssessment};
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::eqr::Position;
use holdem_engine::eval::evaluate_seven;

const ITERATIONS: u64 = 200_000;
const SEED: u64 = 1;

#[derive(Serialize)]
struct Report {
    iterations_per_spot: u64,
    seed: u64,
    elapsed_seconds: f64,
    spots: Vec<SpotReport>,
}

#[derive(Serialize)]
struct SpotReport {
    name: String,
    assessment: SpotAssessment,
}

fn main() {
    println!("=== Spot Analyzer ===");
    println!("{} Monte Carlo iterations per spot, seed {}\n", ITERATIONS, SEED);

    let spots = example_spots();
    let start = Instant::now();
    let mut reports = Vec::new();

    for (name, spot) in spots {
        let spot_start = Instant::now();
        let assessment = match assess(&spot, ITERATIONS, Some(SEED)) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("{}: {}", name, e);
                continue;
            }
        };

        let made_hand = if spot.board.len() == 5 {
            let mut cards = [Card::SENTINEL; 7];
            cards[0] = spot.hero[0];
            cards[1] = spot.hero[1];
            cards[2..7].copy_from_slice(&spot.board);
            format!("  [{}]", evaluate_seven(&cards).category().name())
        } else {
            String::new()
        };

        println!(
            "{:<28} equity {:>5.1}%  eqr {:>5.1}%  -> fold {:.2} / call {:.2} / raise {:.2}  ({:.2}s){}",
            name,
            assessment.equity.equity * 100.0,
            assessment.realized_equity * 100.0,
            assessment.distribution.fold,
            assessment.distribution.call,
            assessment.distribution.raise,
            spot_start.elapsed().as_secs_f64(),
            made_hand,
        );

        reports.push(SpotReport { name, assessment });
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!("\nAnalyzed {} spots in {:.2}s", reports.len(), elapsed);

    let report = Report {
        iterations_per_spot: ITERATIONS,
        seed: SEED,
        elapsed_seconds: elapsed,
        spots: reports,
    };

    let filename = "spot_report.json";
    let json = serde_json::to_string_pretty(&report).expect("report serializes");
    let mut file = File::create(filename).expect("create report file");
    file.write_all(json.as_bytes()).expect("write report file");
    println!("Report written to {}", filename);
}

fn example_spots() -> Vec<(String, Spot)> {
    let spot = |hero: &str, board: &str, position, stack, pot, to_call, opponents, in_position| {
        let hero_cards = parse_cards(hero).expect("valid hero cards");
        Spot {
            hero: [hero_cards[0], hero_cards[1]],
            board: parse_cards(board).expect("valid board"),
            position,
            stack,
            pot,
            to_call,
            opponents,
            in_position,
            opponent_skill: 0.5,
        }
    };

    vec![
        (
            "AA preflop, button".to_string(),
            spot("AsAh", "", Position::Button, 100.0, 3.0, 2.0, 1, true),
        ),
        (
            "AKs on wet flop".to_string(),
            spot("AhKh", "9h8h7d", Position::Cutoff, 95.0, 20.0, 0.0, 2, true),
        ),
        (
            "72o facing turn barrel".to_string(),
            spot("2c7d", "AhKdQs4c", Position::BigBlind, 80.0, 60.0, 45.0, 1, false),
        ),
        (
            "Middle pair, river decision".to_string(),
            spot("9c9d", "Kh7s2d5c9s", Position::SmallBlind, 150.0, 40.0, 30.0, 1, false),
        ),
    ]
}
