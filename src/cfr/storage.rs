//! Storage for CFR regrets and average-strategy weights.
//!
//! Information sets are keyed by the opaque strings produced by
//! [`GameRules::info_set_key`](crate::cfr::GameRules::info_set_key) and
//! materialized lazily on first visit. Per-action quantities live in dense
//! arrays indexed by the action's position in the `legal_actions()` list;
//! action spaces are small and fixed per info set, so this beats a map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard};

/// One information set's accumulated state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoSet {
    /// Cumulative regret per action. Never negative (CFR+ clip).
    pub regrets: Vec<f64>,
    /// Cumulative weighted strategy per action.
    pub strategy_sum: Vec<f64>,
    /// Number of traversal visits as the updating player.
    pub visits: u64,
}

impl InfoSet {
    fn new(num_actions: usize) -> Self {
        Self {
            regrets: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
            visits: 0,
        }
    }
}

/// The solver's info-set store.
///
/// Interior mutability keeps the read paths (`strategy`, `average_strategy`)
/// usable from `&self` during traversal; the store itself grows
/// monotonically for the solver's lifetime.
#[derive(Debug, Default)]
pub struct RegretStore {
    info_sets: RwLock<FxHashMap<String, InfoSet>>,
}

impl RegretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    ///
    /// Realistic abstractions reach millions of info sets; pre-sizing
    /// avoids rehashing during training.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            info_sets: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
        }
    }

    /// Current strategy for an info set via regret matching.
    ///
    /// Each action's probability is proportional to its positive regret;
    /// uniform when no regret is positive or the key is unknown.
    pub fn strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        let info_sets = self.info_sets.read().unwrap();

        match info_sets.get(info_key) {
            Some(set) => {
                let positive: Vec<f64> = set.regrets.iter().map(|&r| r.max(0.0)).collect();
                let sum: f64 = positive.iter().sum();
                if sum > 0.0 {
                    positive.iter().map(|&r| r / sum).collect()
                } else {
                    uniform(num_actions)
                }
            }
            None => uniform(num_actions),
        }
    }

    /// Average strategy for an info set (the equilibrium approximation).
    pub fn average_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        let info_sets = self.info_sets.read().unwrap();

        match info_sets.get(info_key) {
            Some(set) => {
                let total: f64 = set.strategy_sum.iter().sum();
                if total > 0.0 {
                    set.strategy_sum.iter().map(|&w| w / total).collect()
                } else {
                    uniform(num_actions)
                }
            }
            None => uniform(num_actions),
        }
    }

    /// Add weighted regret deltas and clip the totals at zero (CFR+).
    pub fn update_regrets(&self, info_key: &str, deltas: &[f64], weight: f64) {
        let mut info_sets = self.info_sets.write().unwrap();
        let set = info_sets
            .entry(info_key.to_string())
            .or_insert_with(|| InfoSet::new(deltas.len()));

        debug_assert_eq!(
            set.regrets.len(),
            deltas.len(),
            "action count changed for {}",
            info_key
        );

        for (regret, &delta) in set.regrets.iter_mut().zip(deltas) {
            *regret = (*regret + weight * delta).max(0.0);
        }
    }

    /// Accumulate a weighted strategy and count the visit.
    pub fn accumulate_strategy(&self, info_key: &str, strategy: &[f64], weight: f64) {
        let mut info_sets = self.info_sets.write().unwrap();
        let set = info_sets
            .entry(info_key.to_string())
            .or_insert_with(|| InfoSet::new(strategy.len()));

        for (sum, &prob) in set.strategy_sum.iter_mut().zip(strategy) {
            *sum += prob * weight;
        }
        set.visits += 1;
    }

    /// Scale every regret by `regret_factor` and every strategy weight by
    /// `strategy_factor`.
    pub fn discount(&self, regret_factor: f64, strategy_factor: f64) {
        let mut info_sets = self.info_sets.write().unwrap();
        for set in info_sets.values_mut() {
            for r in set.regrets.iter_mut() {
                *r *= regret_factor;
            }
            for w in set.strategy_sum.iter_mut() {
                *w *= strategy_factor;
            }
        }
    }

    /// Average positive regret per info set.
    ///
    /// An ordinal convergence indicator, not a true best-response
    /// exploitability: useful for stopping criteria, meaningless as a
    /// game value.
    pub fn exploitability(&self) -> f64 {
        let info_sets = self.info_sets.read().unwrap();
        if info_sets.is_empty() {
            return 0.0;
        }

        let total: f64 = info_sets
            .values()
            .map(|set| set.regrets.iter().map(|&r| r.max(0.0)).sum::<f64>())
            .sum();

        total / info_sets.len() as f64
    }

    /// Number of information sets materialized so far.
    pub fn num_info_sets(&self) -> usize {
        self.info_sets.read().unwrap().len()
    }

    /// Whether an info set exists in the store.
    pub fn contains(&self, info_key: &str) -> bool {
        self.info_sets.read().unwrap().contains_key(info_key)
    }

    /// Visit count for an info set, 0 if unknown.
    pub fn visits(&self, info_key: &str) -> u64 {
        self.info_sets
            .read()
            .unwrap()
            .get(info_key)
            .map_or(0, |set| set.visits)
    }

    /// Read access to the whole map (analysis, export).
    pub fn info_sets(&self) -> RwLockReadGuard<'_, FxHashMap<String, InfoSet>> {
        self.info_sets.read().unwrap()
    }

    /// Remove every info set.
    pub fn clear(&self) {
        self.info_sets.write().unwrap().clear();
    }

    /// Export to a serializable snapshot.
    pub fn export(&self) -> StoreExport {
        StoreExport {
            info_sets: self.info_sets.read().unwrap().clone(),
        }
    }

    /// Replace contents from a snapshot.
    pub fn import(&self, data: StoreExport) {
        *self.info_sets.write().unwrap() = data.info_sets;
    }
}

impl Clone for RegretStore {
    fn clone(&self) -> Self {
        Self {
            info_sets: RwLock::new(self.info_sets.read().unwrap().clone()),
        }
    }
}

/// Serializable store snapshot for checkpointing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreExport {
    /// All materialized info sets.
    pub info_sets: FxHashMap<String, InfoSet>,
}

fn uniform(num_actions: usize) -> Vec<f64> {
    vec![1.0 / num_actions as f64; num_actions]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_is_uniform() {
        let store = RegretStore::new();
        assert_eq!(store.strategy("missing", 4), vec![0.25; 4]);
        assert_eq!(store.average_strategy("missing", 2), vec![0.5; 2]);
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_regret_matching_proportions() {
        let store = RegretStore::new();
        store.update_regrets("k", &[3.0, 1.0, -5.0], 1.0);

        let strategy = store.strategy("k", 3);
        assert!((strategy[0] - 0.75).abs() < 1e-12);
        assert!((strategy[1] - 0.25).abs() < 1e-12);
        assert_eq!(strategy[2], 0.0);
    }

    #[test]
    fn test_cfr_plus_clips_negative_totals() {
        let store = RegretStore::new();
        store.update_regrets("k", &[-2.0, 1.0], 1.0);

        let sets = store.info_sets();
        let set = sets.get("k").unwrap();
        assert_eq!(set.regrets[0], 0.0);
        assert_eq!(set.regrets[1], 1.0);
    }

    #[test]
    fn test_average_strategy_normalizes() {
        let store = RegretStore::new();
        store.accumulate_strategy("k", &[0.6, 0.4], 2.0);
        store.accumulate_strategy("k", &[0.2, 0.8], 1.0);

        let avg = store.average_strategy("k", 2);
        let sum: f64 = avg.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(store.visits("k"), 2);
    }

    #[test]
    fn test_discount_scales_both_tables() {
        let store = RegretStore::new();
        store.update_regrets("k", &[3.0, 0.0], 1.0);
        store.accumulate_strategy("k", &[1.0, 0.0], 1.0);
        store.discount(1.0 / 1.5, 2.0);

        let sets = store.info_sets();
        let set = sets.get("k").unwrap();
        assert!((set.regrets[0] - 2.0).abs() < 1e-12);
        assert!((set.strategy_sum[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_exploitability_proxy() {
        let store = RegretStore::new();
        assert_eq!(store.exploitability(), 0.0);

        store.update_regrets("a", &[2.0, 0.0], 1.0);
        store.update_regrets("b", &[1.0, 1.0], 1.0);
        // (2 + 2) / 2 keys
        assert!((store.exploitability() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_export_import_round_trip() {
        let store = RegretStore::new();
        store.update_regrets("k", &[1.0, 2.0], 1.0);
        store.accumulate_strategy("k", &[0.5, 0.5], 1.0);

        let snapshot = store.export();
        let restored = RegretStore::new();
        restored.import(snapshot);
        assert_eq!(restored.num_info_sets(), 1);
        assert_eq!(restored.strategy("k", 2), store.strategy("k", 2));
    }
}
