//! Game-rules abstraction consumed by the CFR solver and the MCTS engine.
//!
//! The engine never encodes a concrete betting tree; callers supply one by
//! implementing [`GameRules`]. The interface is stateful: the solver walks
//! the tree by applying an action or chance outcome, recursing, and then
//! reverting it, so an implementation only ever holds one node's state. A
//! `GameRules` value is single-threaded within one solver.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for actions a player can take.
///
/// Actions are small copyable tokens (typically a fieldless enum or an
/// integer newtype); the solvers index strategies by an action's position
/// in the `legal_actions()` list, not by the action value itself.
pub trait Action: Copy + Eq + Hash + Debug + Send + Sync {
    /// Short human-readable name used in reports and strategy dumps.
    fn label(&self) -> String;
}

/// The rules of a two-player zero-sum game, exposed as a walkable tree.
///
/// # State discipline
///
/// `apply_action`/`revert_action` and `apply_chance`/`revert_chance` must
/// be exact inverses: after a paired apply and revert the state is
/// indistinguishable from before. The solvers rely on this to restore the
/// root between traversals.
///
/// # Example
///
/// ```ignore
/// struct MyGame { /* betting state */ }
///
/// impl GameRules for MyGame {
///     type Action = MyAction;
///     type Chance = MyDeal;
///     // ... walk the betting tree in place
/// }
/// ```
pub trait GameRules {
    /// The action token type.
    type Action: Action;

    /// The chance-outcome token type (a deal, a rolled card, ...).
    type Chance: Copy + Debug;

    /// Whether the current state is terminal (hand over).
    fn is_terminal(&self) -> bool;

    /// Whether the current state is a chance node (cards about to be dealt).
    fn is_chance_node(&self) -> bool;

    /// Index of the player to act. Only meaningful when the state is
    /// neither terminal nor a chance node.
    fn current_player(&self) -> usize;

    /// Opaque key identifying the current player's information set:
    /// everything they can see, nothing they cannot.
    fn info_set_key(&self) -> String;

    /// Legal actions for the player to act. Empty at terminal states.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Payoff for `player` at a terminal state. Positive means winning.
    fn payoff(&self, player: usize) -> f64;

    /// Heuristic value of a *non-terminal* state for `player`, used when a
    /// rollout hits its depth bound. Defaults to `payoff`; hold'em
    /// abstractions typically back this with a Monte Carlo equity
    /// estimate of the current hand.
    fn evaluate(&self, player: usize) -> f64 {
        self.payoff(player)
    }

    /// The outcomes of a chance node with their probabilities. The
    /// probabilities must sum to 1.
    fn chance_outcomes(&self) -> Vec<(Self::Chance, f64)>;

    /// Advance through a chance outcome.
    fn apply_chance(&mut self, outcome: Self::Chance);

    /// Undo a chance outcome applied by `apply_chance`.
    fn revert_chance(&mut self, outcome: Self::Chance);

    /// Advance by a player action.
    fn apply_action(&mut self, action: Self::Action);

    /// Undo a player action applied by `apply_action`.
    fn revert_action(&mut self, action: Self::Action);
}
