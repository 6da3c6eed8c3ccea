//! Counterfactual Regret Minimization solver.
//!
//! Full-traversal CFR with the engine's production refinements:
//! - **CFR+**: cumulative regrets are clipped at zero after every update
//! - **Linear weighting**: strategies accumulate with weight `t/(t+1)`
//! - **Periodic discounting**: every `discount_interval` iterations,
//!   regrets scale by `1/alpha` and strategy sums by `1/beta`
//!
//! Each iteration traverses the whole tree once per player. At the
//! updating player's nodes every action is explored and regrets updated;
//! at opponent nodes the opponent's mixed strategy weights the subtree
//! values; chance nodes enumerate their outcomes. The solver is strictly
//! single-threaded: it walks the caller's [`GameRules`] state in place.

use std::time::Instant;

use crate::cfr::config::{CfrConfig, CfrStats};
use crate::cfr::rules::GameRules;
use crate::cfr::storage::{RegretStore, StoreExport};

/// The CFR solver.
///
/// Generic over any game implementing [`GameRules`].
///
/// # Example
/// ```
/// use holdem_engine::cfr::{CfrConfig, CfrSolver};
/// use holdem_engine::games::kuhn::KuhnPoker;
///
/// let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
/// solver.train(1_000);
/// let strategy = solver.average_strategy("2:", 2);
/// assert!((strategy.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub struct CfrSolver<G: GameRules> {
    /// The game being solved, always at its root between iterations.
    rules: G,

    /// Solver configuration.
    config: CfrConfig,

    /// Regrets and strategy sums per information set.
    store: RegretStore,

    /// 1-indexed iteration counter.
    iteration: u64,

    /// Statistics tracking.
    stats: CfrStats,
}

impl<G: GameRules> CfrSolver<G> {
    /// Create a new solver for `rules`.
    pub fn new(rules: G, config: CfrConfig) -> Self {
        Self {
            rules,
            config,
            store: RegretStore::new(),
            iteration: 0,
            stats: CfrStats::new(),
        }
    }

    /// Create a solver with pre-allocated info-set capacity.
    pub fn with_capacity(rules: G, config: CfrConfig, capacity: usize) -> Self {
        Self {
            rules,
            config,
            store: RegretStore::with_capacity(capacity),
            iteration: 0,
            stats: CfrStats::new(),
        }
    }

    /// Run a single iteration: one full traversal per player, then the
    /// discount pass when the interval comes up.
    pub fn run_iteration(&mut self) {
        self.iteration += 1;

        for player in 0..2 {
            self.traverse(player, 1.0, 1.0);
        }

        let interval = self.config.discount_interval;
        if interval > 0 && self.iteration % interval == 0 {
            self.store.discount(
                1.0 / self.config.regret_discount_alpha,
                1.0 / self.config.strategy_discount_beta,
            );
        }
    }

    /// Train for a given number of iterations.
    pub fn train(&mut self, iterations: u64) -> &CfrStats {
        let start = Instant::now();

        for _ in 0..iterations {
            self.run_iteration();
        }

        self.refresh_stats(start.elapsed().as_secs_f64());
        &self.stats
    }

    /// Train with a progress callback invoked every `callback_interval`
    /// iterations.
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &CfrStats
    where
        F: FnMut(&CfrStats),
    {
        let start = Instant::now();
        let interval = callback_interval.max(1);

        for i in 0..iterations {
            self.run_iteration();

            if (i + 1) % interval == 0 {
                self.refresh_stats(start.elapsed().as_secs_f64());
                callback(&self.stats);
            }
        }

        self.refresh_stats(start.elapsed().as_secs_f64());
        &self.stats
    }

    fn refresh_stats(&mut self, elapsed: f64) {
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.store.num_info_sets();
        self.stats.elapsed_seconds = elapsed;
        self.stats.update_rate();
    }

    /// Recursive traversal for `player`, carrying both reach
    /// probabilities.
    fn traverse(&mut self, player: usize, reach_player: f64, reach_opponent: f64) -> f64 {
        if self.rules.is_terminal() {
            return self.rules.payoff(player);
        }

        if self.rules.is_chance_node() {
            let mut value = 0.0;
            for (outcome, probability) in self.rules.chance_outcomes() {
                self.rules.apply_chance(outcome);
                value += probability * self.traverse(player, reach_player, reach_opponent);
                self.rules.revert_chance(outcome);
            }
            return value;
        }

        let actions = self.rules.legal_actions();
        if actions.is_empty() {
            return self.rules.payoff(player);
        }

        let info_key = self.rules.info_set_key();
        let strategy = self.store.strategy(&info_key, actions.len());

        if self.rules.current_player() == player {
            // Updating player: explore every action.
            let mut action_values = vec![0.0; actions.len()];
            for (i, &action) in actions.iter().enumerate() {
                self.rules.apply_action(action);
                action_values[i] =
                    self.traverse(player, reach_player * strategy[i], reach_opponent);
                self.rules.revert_action(action);
            }

            let node_value: f64 = strategy
                .iter()
                .zip(action_values.iter())
                .map(|(&s, &v)| s * v)
                .sum();

            let deltas: Vec<f64> =
                action_values.iter().map(|&v| v - node_value).collect();
            self.store.update_regrets(&info_key, &deltas, reach_opponent);

            // Linear CFR: later iterations weigh more.
            let t = self.iteration as f64;
            self.store.accumulate_strategy(&info_key, &strategy, t / (t + 1.0));

            node_value
        } else {
            // Opponent: weight subtrees by their strategy, no updates.
            let mut value = 0.0;
            for (i, &action) in actions.iter().enumerate() {
                self.rules.apply_action(action);
                value += strategy[i]
                    * self.traverse(player, reach_player, reach_opponent * strategy[i]);
                self.rules.revert_action(action);
            }
            value
        }
    }

    /// Average strategy for an info set; uniform when unknown.
    pub fn average_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        self.store.average_strategy(info_key, num_actions)
    }

    /// Average strategy zipped with the caller's action list.
    pub fn average_strategy_pairs(
        &self,
        info_key: &str,
        actions: &[G::Action],
    ) -> Vec<(G::Action, f64)> {
        let probs = self.store.average_strategy(info_key, actions.len());
        actions.iter().copied().zip(probs).collect()
    }

    /// Exploitability proxy (average positive regret per info set),
    /// recorded into the stats history. Ordinal only.
    pub fn exploitability(&mut self) -> f64 {
        let value = self.store.exploitability();
        self.stats.record_exploitability(self.iteration, value);
        value
    }

    /// Current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Number of information sets discovered.
    pub fn num_info_sets(&self) -> usize {
        self.store.num_info_sets()
    }

    /// Current statistics.
    pub fn stats(&self) -> &CfrStats {
        &self.stats
    }

    /// The underlying store, for analysis.
    pub fn store(&self) -> &RegretStore {
        &self.store
    }

    /// The game being solved.
    pub fn rules(&self) -> &G {
        &self.rules
    }

    /// The solver configuration.
    pub fn config(&self) -> &CfrConfig {
        &self.config
    }

    /// Export solver state for checkpointing.
    pub fn export_state(&self) -> SolverState {
        SolverState {
            iteration: self.iteration,
            store: self.store.export(),
            stats: self.stats.clone(),
        }
    }

    /// Restore solver state from a checkpoint.
    pub fn import_state(&mut self, state: SolverState) {
        self.iteration = state.iteration;
        self.store.import(state.store);
        self.stats = state.stats;
    }

    /// Reset to a fresh, untrained solver.
    pub fn reset(&mut self) {
        self.store.clear();
        self.iteration = 0;
        self.stats = CfrStats::new();
    }
}

/// Serializable solver state for checkpointing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SolverState {
    /// Iteration counter at export time.
    pub iteration: u64,
    /// Info-set store snapshot.
    pub store: StoreExport,
    /// Statistics at export time.
    pub stats: CfrStats,
}
