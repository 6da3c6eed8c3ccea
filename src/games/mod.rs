//! Game implementations for the solver interfaces.
//!
//! Production abstractions (chance enumeration, betting rounds, payoff
//! logic) are supplied by callers through
//! [`GameRules`](crate::cfr::GameRules); this module holds the in-tree
//! fixture used to validate the solvers.
//!
//! - [`kuhn`]: Kuhn poker, a 3-card game with a known Nash equilibrium.

pub mod kuhn;
