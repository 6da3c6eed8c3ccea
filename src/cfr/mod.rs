//! Counterfactual Regret Minimization.
//!
//! CFR converges to an approximate Nash equilibrium by repeatedly
//! traversing the game tree, measuring per-action regret at every
//! information set, and shifting probability toward actions it regrets
//! not having taken. The time-averaged strategy is the equilibrium
//! approximation.
//!
//! The implementation here is the engine's production variant:
//! full-tree traversal, CFR+ clipping, linear strategy weighting, and
//! periodic regret/strategy discounting. Games plug in through the
//! [`GameRules`] trait; see [`crate::games::kuhn`] for a complete
//! worked implementation with a known equilibrium.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+"
//!   (2014)

pub mod config;
pub mod rules;
pub mod solver;
pub mod storage;

pub use config::{CfrConfig, CfrStats, ExploitabilityPoint};
pub use rules::{Action, GameRules};
pub use solver::{CfrSolver, SolverState};
pub use storage::{InfoSet, RegretStore, StoreExport};
