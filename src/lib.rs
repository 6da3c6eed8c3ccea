//! # holdem-engine
//!
//! A decision engine for no-limit hold'em: given hole cards, a partial
//! board, and situational context, it produces a quantitative strength
//! estimate and, optionally, a mixed strategy over actions.
//!
//! ## Subsystems
//!
//! - [`cards`]: card encoding, bitmask sets, deck handling, the shared
//!   xorshift generator
//! - [`eval`]: constant-time 7-card hand evaluation over precomputed
//!   lookup tables
//! - [`equity`]: multithreaded Monte Carlo equity against random holdings
//! - [`cfr`]: counterfactual regret minimization over a caller-supplied
//!   [`cfr::GameRules`] abstraction
//! - [`mcts`]: UCB1 tree search for action-level decisions
//! - [`eqr`]: realized-equity adjustment from position, stacks, texture,
//!   field size, and opponent skill
//! - [`math`]: pot odds, defense frequencies, expected values
//! - [`advisor`]: the integration layer producing fold/call/raise advice
//! - [`games`]: the Kuhn-poker fixture exercising the solver interfaces
//!
//! ## Quick start
//!
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::equity::equity;
//!
//! let hero = parse_cards("AsAh").unwrap();
//! let result = equity([hero[0], hero[1]], &[], 1, 10_000, Some(1)).unwrap();
//! assert!(result.equity > 0.8);
//! ```
//!
//! ```
//! use holdem_engine::cfr::{CfrConfig, CfrSolver};
//! use holdem_engine::games::kuhn::KuhnPoker;
//!
//! let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
//! solver.train(1_000);
//! println!("info sets: {}", solver.num_info_sets());
//! ```

#![warn(missing_docs)]

pub mod advisor;
pub mod cards;
pub mod cfr;
pub mod eqr;
pub mod equity;
pub mod error;
pub mod eval;
pub mod games;
pub mod math;
pub mod mcts;

pub use cards::{Card, CardMask, Deck, FastRng};
pub use equity::{equity, EquityResult};
pub use error::EngineError;
pub use eval::{evaluate_seven, HandCategory, HandScore};
