//! The search engine: selection, expansion, simulation, backpropagation.

use serde::{Deserialize, Serialize};

use super::node::{MctsNode, NodeId};
use crate::cards::FastRng;
use crate::cfr::GameRules;
use crate::error::EngineError;

/// Configuration for the MCTS engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MctsConfig {
    /// UCB1 exploration constant. The default is the classic sqrt(2).
    pub exploration_constant: f64,

    /// Maximum number of steps a rollout may take before falling back to
    /// the heuristic evaluation.
    pub max_rollout_depth: usize,

    /// Seed for the rollout generator. 0 draws a hardware seed.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_rollout_depth: 100,
            seed: 0,
        }
    }
}

impl MctsConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder method: set the rollout depth bound.
    pub fn with_max_rollout_depth(mut self, depth: usize) -> Self {
        self.max_rollout_depth = depth;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(EngineError::InvalidConfig(
                "exploration_constant",
                self.exploration_constant,
            ));
        }
        if self.max_rollout_depth == 0 {
            return Err(EngineError::InvalidConfig("max_rollout_depth", 0.0));
        }
        Ok(())
    }
}

/// Search statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total simulations run so far.
    pub simulations: u64,
    /// Deepest expanded node below the root.
    pub max_depth: usize,
    /// Total nodes in the tree (root included).
    pub node_count: usize,
    /// Average value of the best root child, 0 before any search.
    pub best_value: f64,
}

enum RolloutStep<G: GameRules> {
    Action(G::Action),
    Chance(G::Chance),
}

/// A Monte Carlo tree search rooted at the current state of a
/// [`GameRules`] value.
///
/// The rules object is owned by the search and must sit at the decision
/// point being analyzed; every simulation applies moves into it and
/// reverts them before returning, so between `search` calls it is back
/// at the root. Tree nodes are decision points; chance nodes reached
/// during a rollout are sampled by their probabilities.
#[derive(Debug)]
pub struct MctsSearch<G: GameRules> {
    rules: G,
    config: MctsConfig,
    arena: Vec<MctsNode<G::Action>>,
    rng: FastRng,
    simulations: u64,
}

impl<G: GameRules> MctsSearch<G> {
    /// Create a search rooted at the current state of `rules`, taking the
    /// root's legal actions from the rules themselves.
    pub fn new(rules: G, config: MctsConfig) -> Result<Self, EngineError> {
        let actions = rules.legal_actions();
        Self::with_root_actions(rules, actions, config)
    }

    /// Create a search whose root action list is supplied by the caller.
    pub fn with_root_actions(
        rules: G,
        actions: Vec<G::Action>,
        config: MctsConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if actions.is_empty() {
            return Err(EngineError::EmptyActionList);
        }
        let rng = FastRng::new(config.seed);
        Ok(Self {
            rules,
            config,
            arena: vec![MctsNode::root(actions)],
            rng,
            simulations: 0,
        })
    }

    /// Run `iterations` simulations.
    pub fn search(&mut self, iterations: u64) {
        for _ in 0..iterations {
            self.run_simulation();
        }
    }

    fn run_simulation(&mut self) {
        let exploration = self.config.exploration_constant;
        let mut node_id: NodeId = 0;
        let mut applied: Vec<G::Action> = Vec::new();
        let mut perspective = self.rules.current_player();

        // Selection: descend fully expanded nodes by UCB1.
        loop {
            let node = &self.arena[node_id];
            if !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            let parent_visits = node.visits;
            let mut best = node.children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &child_id in &node.children {
                let score = self.arena[child_id].ucb1(parent_visits, exploration);
                if score > best_score {
                    best_score = score;
                    best = child_id;
                }
            }

            let action = self.arena[best]
                .action
                .expect("non-root node carries its action");
            perspective = self.rules.current_player();
            self.rules.apply_action(action);
            applied.push(action);
            node_id = best;
        }

        // Expansion: pop one untried action uniformly at random.
        if !self.arena[node_id].terminal && !self.arena[node_id].untried.is_empty() {
            let untried_len = self.arena[node_id].untried.len();
            let pick = self.rng.next_below(untried_len);
            let action = self.arena[node_id].untried.remove(pick);

            perspective = self.rules.current_player();
            self.rules.apply_action(action);
            applied.push(action);

            let child = MctsNode::child(
                node_id,
                action,
                self.rules.legal_actions(),
                self.rules.is_terminal(),
            );
            let child_id = self.arena.len();
            self.arena.push(child);
            self.arena[node_id].children.push(child_id);
            node_id = child_id;
        }

        // Simulation: random playout, value for the player who moved into
        // the node.
        let value = self.rollout(perspective);

        // Backpropagation: alternate sign on the way up.
        let mut v = value;
        let mut current = Some(node_id);
        while let Some(id) = current {
            let node = &mut self.arena[id];
            node.visits += 1;
            node.total_value += v;
            v = -v;
            current = node.parent;
        }

        // Restore the rules to the root state.
        for &action in applied.iter().rev() {
            self.rules.revert_action(action);
        }

        self.simulations += 1;
    }

    /// Uniform random playout bounded by the configured depth. Leaves the
    /// rules exactly as it found them.
    fn rollout(&mut self, perspective: usize) -> f64 {
        let mut steps: Vec<RolloutStep<G>> = Vec::new();
        let mut depth = 0;

        while depth < self.config.max_rollout_depth && !self.rules.is_terminal() {
            if self.rules.is_chance_node() {
                let outcomes = self.rules.chance_outcomes();
                if outcomes.is_empty() {
                    break;
                }
                let outcome = sample_outcome(&outcomes, self.rng.next_f64());
                self.rules.apply_chance(outcome);
                steps.push(RolloutStep::Chance(outcome));
            } else {
                let actions = self.rules.legal_actions();
                if actions.is_empty() {
                    break;
                }
                let action = actions[self.rng.next_below(actions.len())];
                self.rules.apply_action(action);
                steps.push(RolloutStep::Action(action));
            }
            depth += 1;
        }

        let value = if self.rules.is_terminal() {
            self.rules.payoff(perspective)
        } else {
            self.rules.evaluate(perspective)
        };

        while let Some(step) = steps.pop() {
            match step {
                RolloutStep::Action(a) => self.rules.revert_action(a),
                RolloutStep::Chance(o) => self.rules.revert_chance(o),
            }
        }

        value
    }

    /// The root child with the most visits; ties keep the child expanded
    /// first.
    pub fn best_action(&self) -> Result<G::Action, EngineError> {
        let root = &self.arena[0];
        if self.simulations == 0 || root.children.is_empty() {
            return Err(EngineError::NoSearchPerformed);
        }

        let mut best_id = root.children[0];
        let mut best_visits = self.arena[best_id].visits;
        for &child_id in &root.children[1..] {
            if self.arena[child_id].visits > best_visits {
                best_visits = self.arena[child_id].visits;
                best_id = child_id;
            }
        }
        Ok(self.arena[best_id].action.expect("root child carries its action"))
    }

    /// Visit-proportional distribution over the root's expanded children,
    /// paired with their actions.
    pub fn policy(&self) -> Result<Vec<(G::Action, f64)>, EngineError> {
        let root = &self.arena[0];
        if self.simulations == 0 || root.children.is_empty() {
            return Err(EngineError::NoSearchPerformed);
        }

        let total: u64 = root.children.iter().map(|&id| self.arena[id].visits).sum();
        Ok(root
            .children
            .iter()
            .map(|&id| {
                let node = &self.arena[id];
                let action = node.action.expect("root child carries its action");
                (action, node.visits as f64 / total as f64)
            })
            .collect())
    }

    /// Visit-proportional probabilities alone, in root-child order.
    pub fn policy_distribution(&self) -> Result<Vec<f64>, EngineError> {
        Ok(self.policy()?.into_iter().map(|(_, p)| p).collect())
    }

    /// Current search statistics.
    pub fn stats(&self) -> SearchStats {
        let best_value = self.arena[0]
            .children
            .iter()
            .map(|&id| self.arena[id].average_value())
            .fold(f64::NEG_INFINITY, f64::max);

        SearchStats {
            simulations: self.simulations,
            max_depth: self.max_depth(),
            node_count: self.arena.len(),
            best_value: if best_value.is_finite() { best_value } else { 0.0 },
        }
    }

    /// Deepest node below the root.
    fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for &child in &self.arena[id].children {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Read a node by id (the root is id 0).
    pub fn node(&self, id: NodeId) -> &MctsNode<G::Action> {
        &self.arena[id]
    }

    /// Number of simulations run so far.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// The rules object, back at the root state.
    pub fn rules(&self) -> &G {
        &self.rules
    }
}

/// Pick an outcome from a cumulative probability walk.
fn sample_outcome<C: Copy>(outcomes: &[(C, f64)], r: f64) -> C {
    let mut cumulative = 0.0;
    for &(outcome, prob) in outcomes {
        cumulative += prob;
        if r < cumulative {
            return outcome;
        }
    }
    // Floating point slack: fall back to the last outcome.
    outcomes[outcomes.len() - 1].0
}
