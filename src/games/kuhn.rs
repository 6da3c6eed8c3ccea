//! Kuhn poker on the [`GameRules`] interface.
//!
//! Kuhn poker is the standard validation game for equilibrium solvers:
//! three cards (Jack = 0, Queen = 1, King = 2), one card each, a single
//! betting round, and a mathematically known Nash equilibrium.
//!
//! ## Game tree
//!
//! ```text
//! P0 (first to act)
//! ├── Pass
//! │   └── P1
//! │       ├── Pass → Showdown (pot = 2)
//! │       └── Bet
//! │           └── P0
//! │               ├── Pass → P1 wins (pot = 3)
//! │               └── Bet → Showdown (pot = 4)
//! └── Bet
//!     └── P1
//!         ├── Pass → P0 wins (pot = 3)
//!         └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Known equilibrium
//!
//! - P0 with Jack: bet (bluff) with probability alpha in [0, 1/3]
//! - P0 with Queen: always pass
//! - P0 with King: bet with probability 3 * alpha
//! - P1 facing a bet: fold Jack, call Queen 1/3 of the time, call King
//!
//! P0's expected value at equilibrium is -1/18.

use crate::cfr::{Action, GameRules};

/// Actions in Kuhn poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuhnAction {
    /// Check if unfaced, fold if facing a bet.
    Pass,
    /// Bet if unfaced, call if facing a bet.
    Bet,
}

impl Action for KuhnAction {
    fn label(&self) -> String {
        match self {
            KuhnAction::Pass => "pass".to_string(),
            KuhnAction::Bet => "bet".to_string(),
        }
    }
}

/// Kuhn poker state, walked in place by the solvers.
///
/// Starts at the chance node (cards undealt). Applying a chance outcome
/// deals both cards; actions push onto the history and adjust the pot.
#[derive(Debug, Clone)]
pub struct KuhnPoker {
    /// Cards for players 0 and 1 (0 = Jack, 1 = Queen, 2 = King).
    cards: [u8; 2],
    /// Action history, one char per action ('p' or 'b').
    history: String,
    /// Per-player pot contribution, starting from the antes.
    pot: [i32; 2],
    /// Whether the deal has happened.
    dealt: bool,
}

impl KuhnPoker {
    /// A fresh game at the chance node.
    pub fn new() -> Self {
        Self {
            cards: [0, 0],
            history: String::new(),
            pot: [1, 1],
            dealt: false,
        }
    }

    /// A game with the deal already fixed, at player 0's decision.
    ///
    /// Useful for searches rooted below the chance node.
    pub fn with_cards(card0: u8, card1: u8) -> Self {
        debug_assert!(card0 < 3 && card1 < 3 && card0 != card1);
        Self {
            cards: [card0, card1],
            history: String::new(),
            pot: [1, 1],
            dealt: true,
        }
    }

    /// Display name of a card.
    pub fn card_name(card: u8) -> &'static str {
        match card {
            0 => "Jack",
            1 => "Queen",
            2 => "King",
            _ => "Unknown",
        }
    }
}

impl Default for KuhnPoker {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for KuhnPoker {
    type Action = KuhnAction;
    type Chance = (u8, u8);

    fn is_terminal(&self) -> bool {
        matches!(self.history.as_str(), "pp" | "pbp" | "pbb" | "bp" | "bb")
    }

    fn is_chance_node(&self) -> bool {
        !self.dealt
    }

    fn current_player(&self) -> usize {
        match self.history.as_str() {
            "" | "pb" => 0,
            _ => 1,
        }
    }

    fn info_set_key(&self) -> String {
        format!("{}:{}", self.cards[self.current_player()], self.history)
    }

    fn legal_actions(&self) -> Vec<KuhnAction> {
        if self.is_terminal() || self.is_chance_node() {
            return vec![];
        }
        vec![KuhnAction::Pass, KuhnAction::Bet]
    }

    fn payoff(&self, player: usize) -> f64 {
        debug_assert!(self.is_terminal(), "payoff on non-terminal state");

        let p0_payoff: f64 = match self.history.as_str() {
            // Showdown for the antes.
            "pp" => {
                if self.cards[0] > self.cards[1] {
                    1.0
                } else {
                    -1.0
                }
            }
            // Bet takes it down.
            "bp" => 1.0,
            "pbp" => -1.0,
            // Showdown for two chips each.
            "bb" | "pbb" => {
                if self.cards[0] > self.cards[1] {
                    2.0
                } else {
                    -2.0
                }
            }
            _ => 0.0,
        };

        if player == 0 {
            p0_payoff
        } else {
            -p0_payoff
        }
    }

    fn chance_outcomes(&self) -> Vec<((u8, u8), f64)> {
        // Six ordered deals of two distinct cards from three.
        let mut outcomes = Vec::with_capacity(6);
        for c0 in 0..3u8 {
            for c1 in 0..3u8 {
                if c0 != c1 {
                    outcomes.push(((c0, c1), 1.0 / 6.0));
                }
            }
        }
        outcomes
    }

    fn apply_chance(&mut self, outcome: (u8, u8)) {
        self.cards = [outcome.0, outcome.1];
        self.dealt = true;
    }

    fn revert_chance(&mut self, _outcome: (u8, u8)) {
        self.dealt = false;
    }

    fn apply_action(&mut self, action: KuhnAction) {
        match action {
            KuhnAction::Pass => self.history.push('p'),
            KuhnAction::Bet => {
                let player = self.current_player();
                self.history.push('b');
                self.pot[player] += 1;
            }
        }
    }

    fn revert_action(&mut self, action: KuhnAction) {
        self.history.pop();
        if action == KuhnAction::Bet {
            let player = self.current_player();
            self.pot[player] -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::{CfrConfig, CfrSolver};
    use crate::mcts::{MctsConfig, MctsSearch};

    #[test]
    fn test_game_tree_shape() {
        let mut game = KuhnPoker::new();
        assert!(game.is_chance_node());
        assert!(game.legal_actions().is_empty());

        game.apply_chance((2, 0));
        assert!(!game.is_chance_node());
        assert!(!game.is_terminal());
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.legal_actions().len(), 2);

        game.revert_chance((2, 0));
        assert!(game.is_chance_node());
    }

    #[test]
    fn test_chance_outcomes_sum_to_one() {
        let game = KuhnPoker::new();
        let outcomes = game.chance_outcomes();
        assert_eq!(outcomes.len(), 6);
        let total: f64 = outcomes.iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_payoffs() {
        let mut game = KuhnPoker::with_cards(2, 0); // K vs J

        game.apply_action(KuhnAction::Pass);
        game.apply_action(KuhnAction::Pass);
        assert!(game.is_terminal());
        assert_eq!(game.payoff(0), 1.0);
        assert_eq!(game.payoff(1), -1.0);

        game.revert_action(KuhnAction::Pass);
        game.revert_action(KuhnAction::Pass);
        assert!(!game.is_terminal());

        game.apply_action(KuhnAction::Bet);
        game.apply_action(KuhnAction::Bet);
        assert!(game.is_terminal());
        assert_eq!(game.payoff(0), 2.0);
    }

    #[test]
    fn test_apply_revert_round_trip() {
        let mut game = KuhnPoker::with_cards(1, 2);
        let before = format!("{:?}", game);

        game.apply_action(KuhnAction::Pass);
        game.apply_action(KuhnAction::Bet);
        game.apply_action(KuhnAction::Bet);
        assert!(game.is_terminal());
        game.revert_action(KuhnAction::Bet);
        game.revert_action(KuhnAction::Bet);
        game.revert_action(KuhnAction::Pass);

        assert_eq!(format!("{:?}", game), before);
        assert_eq!(game.pot, [1, 1]);
    }

    #[test]
    fn test_info_set_keys_hide_opponent_card() {
        let game = KuhnPoker::with_cards(1, 2);
        assert_eq!(game.info_set_key(), "1:");

        let mut game = game;
        game.apply_action(KuhnAction::Pass);
        // Now player 1 acts and sees their own King.
        assert_eq!(game.info_set_key(), "2:p");
    }

    #[test]
    fn test_cfr_converges_to_equilibrium() {
        let mut solver =
            CfrSolver::with_capacity(KuhnPoker::new(), CfrConfig::default(), 16);
        solver.train(20_000);

        for card in 0..3u8 {
            let strategy = solver.average_strategy(&format!("{}:", card), 2);
            println!(
                "P0 {}: pass={:.3} bet={:.3}",
                KuhnPoker::card_name(card),
                strategy[0],
                strategy[1]
            );
        }

        // P0 with Queen at the root: almost always pass.
        let queen = solver.average_strategy("1:", 2);
        assert!(queen[0] > 0.95, "Queen pass probability {} should be near 1", queen[0]);

        // P0 with Jack bluffs at most a third of the time.
        let jack = solver.average_strategy("0:", 2);
        assert!(jack[1] < 0.45, "Jack bet probability {} should stay below 1/3-ish", jack[1]);

        // P0 with King bets more than Jack.
        let king = solver.average_strategy("2:", 2);
        assert!(king[1] > jack[1], "King should bet more than Jack");

        // P1 responses to a bet: fold Jack, call King.
        let p1_jack = solver.average_strategy("0:b", 2);
        assert!(p1_jack[0] > 0.95, "P1 Jack should fold to a bet");
        let p1_king = solver.average_strategy("2:b", 2);
        assert!(p1_king[1] > 0.95, "P1 King should call a bet");

        // P1 with Queen calls about a third of the time.
        let p1_queen = solver.average_strategy("1:b", 2);
        assert!(
            p1_queen[1] > 0.2 && p1_queen[1] < 0.5,
            "P1 Queen call probability {} should be near 1/3",
            p1_queen[1]
        );
    }

    #[test]
    fn test_cfr_regrets_stay_non_negative() {
        let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        solver.train(500);

        let store = solver.store();
        let sets = store.info_sets();
        assert!(!sets.is_empty());
        for (key, set) in sets.iter() {
            for &regret in &set.regrets {
                assert!(regret >= 0.0, "negative regret at {}", key);
            }
        }
    }

    #[test]
    fn test_cfr_average_strategies_normalized() {
        let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        solver.train(1_000);

        let keys: Vec<String> = solver.store().info_sets().keys().cloned().collect();
        for key in keys {
            let strategy = solver.average_strategy(&key, 2);
            let sum: f64 = strategy.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "strategy at {} sums to {}", key, sum);
        }
    }

    #[test]
    fn test_cfr_exploitability_proxy_decreases() {
        let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        solver.train(500);
        let early = solver.exploitability();
        solver.train(19_500);
        let late = solver.exploitability();
        assert!(
            late <= early,
            "exploitability should not rise over a long run: {} -> {}",
            early,
            late
        );
        assert_eq!(solver.stats().exploitability_history.len(), 2);
    }

    #[test]
    fn test_cfr_checkpoint_round_trip() {
        let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        solver.train(1_000);
        let strategy_before = solver.average_strategy("0:", 2);

        let checkpoint = solver.export_state();
        let json = serde_json::to_string(&checkpoint).unwrap();
        let restored_state = serde_json::from_str(&json).unwrap();

        let mut restored = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        restored.import_state(restored_state);
        assert_eq!(restored.iteration(), 1_000);
        assert_eq!(restored.average_strategy("0:", 2), strategy_before);

        restored.reset();
        assert_eq!(restored.iteration(), 0);
        assert_eq!(restored.num_info_sets(), 0);
    }

    #[test]
    fn test_strategy_pairs_align_with_actions() {
        let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
        solver.train(1_000);

        let game = KuhnPoker::with_cards(2, 0);
        let pairs = solver.average_strategy_pairs("2:", &game.legal_actions());
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.label(), "pass");
        assert_eq!(pairs[1].0.label(), "bet");
        let total: f64 = pairs.iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mcts_bets_the_king() {
        // K vs J, player 0 to act: betting dominates against any response.
        let game = KuhnPoker::with_cards(2, 0);
        let mut search = MctsSearch::new(game, MctsConfig::default().with_seed(42)).unwrap();
        search.search(2_000);
        assert_eq!(search.best_action().unwrap(), KuhnAction::Bet);

        let policy = search.policy_distribution().unwrap();
        let sum: f64 = policy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mcts_visit_partition_invariant() {
        let game = KuhnPoker::with_cards(2, 0);
        let mut search = MctsSearch::new(game, MctsConfig::default().with_seed(7)).unwrap();
        search.search(1_000);

        let stats = search.stats();
        assert_eq!(stats.simulations, 1_000);
        assert!(stats.max_depth >= 2);

        // Every expanded non-root node: visits = sum of child visits + 1.
        for id in 1..stats.node_count {
            let node = search.node(id);
            if !node.children.is_empty() && node.untried.is_empty() {
                let child_sum: u64 =
                    node.children.iter().map(|&c| search.node(c).visits).sum();
                assert_eq!(node.visits, child_sum + 1, "node {} breaks the partition", id);
            }
        }
    }

    #[test]
    fn test_mcts_leaves_rules_at_root() {
        let game = KuhnPoker::with_cards(2, 1);
        let mut search = MctsSearch::new(game, MctsConfig::default().with_seed(3)).unwrap();
        search.search(500);
        // After searching, the rules object is back at the root.
        assert_eq!(search.rules().history, "");
        assert_eq!(search.rules().pot, [1, 1]);
    }
}
