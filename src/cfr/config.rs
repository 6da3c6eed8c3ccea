//! Configuration and statistics for the CFR solver.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for the CFR solver.
///
/// The defaults reproduce the engine's production settings: CFR+ regret
/// clipping, linear `t/(t+1)` strategy weighting, and a discount pass
/// every 100 iterations scaling regrets by `1/alpha` and strategy sums by
/// `1/beta`.
///
/// The discount form is deliberately the literal one the engine has
/// always used rather than the textbook `t^a / (t^a + 1)` schedule;
/// validate against a reference before changing either knob in anger.
///
/// # Example
/// ```
/// use holdem_engine::cfr::CfrConfig;
///
/// let config = CfrConfig::default().with_discount_interval(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfrConfig {
    /// Iterations between discount passes. 0 disables discounting.
    pub discount_interval: u64,

    /// Regret discount divisor `alpha`; each pass multiplies every stored
    /// regret by `1/alpha`.
    pub regret_discount_alpha: f64,

    /// Strategy-sum discount divisor `beta`; each pass multiplies every
    /// stored strategy weight by `1/beta`.
    pub strategy_discount_beta: f64,
}

impl Default for CfrConfig {
    fn default() -> Self {
        Self {
            discount_interval: 100,
            regret_discount_alpha: 1.5,
            strategy_discount_beta: 0.5,
        }
    }
}

impl CfrConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with discounting disabled (plain CFR+ with linear
    /// averaging).
    pub fn undiscounted() -> Self {
        Self { discount_interval: 0, ..Default::default() }
    }

    /// Builder method: set the discount interval (0 disables).
    pub fn with_discount_interval(mut self, interval: u64) -> Self {
        self.discount_interval = interval;
        self
    }

    /// Builder method: set the regret discount divisor.
    pub fn with_regret_discount(mut self, alpha: f64) -> Self {
        self.regret_discount_alpha = alpha;
        self
    }

    /// Builder method: set the strategy discount divisor.
    pub fn with_strategy_discount(mut self, beta: f64) -> Self {
        self.strategy_discount_beta = beta;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.regret_discount_alpha.is_finite() || self.regret_discount_alpha <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "regret_discount_alpha",
                self.regret_discount_alpha,
            ));
        }
        if !self.strategy_discount_beta.is_finite() || self.strategy_discount_beta <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "strategy_discount_beta",
                self.strategy_discount_beta,
            ));
        }
        Ok(())
    }
}

/// Statistics tracked during CFR training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfrStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Most recent exploitability proxy, if measured.
    pub exploitability: Option<f64>,

    /// History of exploitability measurements.
    pub exploitability_history: Vec<ExploitabilityPoint>,
}

/// A single exploitability measurement at a specific iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploitabilityPoint {
    /// Iteration number when this measurement was taken.
    pub iteration: u64,
    /// Exploitability proxy value.
    pub exploitability: f64,
}

impl CfrStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second from elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }

    /// Record an exploitability measurement.
    pub fn record_exploitability(&mut self, iteration: u64, exploitability: f64) {
        self.exploitability = Some(exploitability);
        self.exploitability_history.push(ExploitabilityPoint {
            iteration,
            exploitability,
        });
    }
}
