//! Spot assessment: the thin layer that turns raw numbers into advice.
//!
//! Runs the full pipeline for one decision point — Monte Carlo equity,
//! board texture, EQR adjustment, pot odds — and produces a normalized
//! mixed strategy over fold / call / raise. The thresholds are the
//! engine's simplified baseline policy, not a solver output; use the CFR
//! solver when an abstraction is available.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, FastRng};
use crate::eqr::{
    adjust_for_street, classify_texture, eqr, BoardTexture, EqrContext, EqrResult, Position,
    Street, TextureAnalysis,
};
use crate::equity::{equity, EquityResult};
use crate::error::EngineError;
use crate::math::{pot_odds, PotOdds};

/// A decision point to assess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    /// Hero's hole cards.
    pub hero: [Card; 2],
    /// Community cards (0, 3, 4, or 5).
    pub board: Vec<Card>,
    /// Hero's seat.
    pub position: Position,
    /// Effective remaining stack.
    pub stack: f64,
    /// Current pot.
    pub pot: f64,
    /// Amount hero must call; 0 when checking is available.
    pub to_call: f64,
    /// Number of live opponents.
    pub opponents: usize,
    /// Whether hero closes the action.
    pub in_position: bool,
    /// Opponent skill in [0, 1].
    pub opponent_skill: f64,
}

/// A mixed strategy over the three canonical actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ActionDistribution {
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
}

/// One of the canonical actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum AdvisedAction {
    Fold,
    Call,
    Raise,
}

impl ActionDistribution {
    /// Scale the weights to sum to 1. A fully zero distribution stays
    /// zero.
    pub fn normalize(&mut self) {
        let total = self.fold + self.call + self.raise;
        if total > 0.0 {
            self.fold /= total;
            self.call /= total;
            self.raise /= total;
        }
    }

    /// The highest-weight action (raise wins ties over call over fold).
    pub fn best(&self) -> AdvisedAction {
        if self.raise >= self.call && self.raise >= self.fold {
            AdvisedAction::Raise
        } else if self.call >= self.fold {
            AdvisedAction::Call
        } else {
            AdvisedAction::Fold
        }
    }

    /// Sample an action according to the weights.
    pub fn sample(&self, rng: &mut FastRng) -> AdvisedAction {
        let r = rng.next_f64();
        if r < self.fold {
            AdvisedAction::Fold
        } else if r < self.fold + self.call {
            AdvisedAction::Call
        } else {
            AdvisedAction::Raise
        }
    }
}

/// Everything the advisor computed for a spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotAssessment {
    /// Raw Monte Carlo equity.
    pub equity: EquityResult,
    /// Board texture, absent preflop.
    pub texture: Option<TextureAnalysis>,
    /// The EQR factor breakdown.
    pub eqr: EqrResult,
    /// Street-adjusted realized equity driving the recommendation.
    pub realized_equity: f64,
    /// Pot odds, present when facing a bet.
    pub pot_odds: Option<PotOdds>,
    /// The recommended mixed strategy.
    pub distribution: ActionDistribution,
    /// The street the spot is on.
    pub street: Street,
}

/// Assess a spot with the given simulation effort.
///
/// `iterations` and `seed` feed the equity simulator; pass a non-zero
/// seed for reproducible advice.
pub fn assess(spot: &Spot, iterations: u64, seed: Option<u64>) -> Result<SpotAssessment, EngineError> {
    let street = match spot.board.len() {
        0 => Street::Preflop,
        3 => Street::Flop,
        4 => Street::Turn,
        5 => Street::River,
        n => return Err(EngineError::InvalidBoard(n)),
    };

    let equity_result = equity(spot.hero, &spot.board, spot.opponents, iterations, seed)?;

    let texture = if street == Street::Preflop {
        None
    } else {
        Some(classify_texture(&spot.board)?)
    };

    let context = EqrContext {
        position: spot.position,
        stack: spot.stack,
        pot: spot.pot,
        texture: texture.map_or(BoardTexture::Dry, |t| t.texture),
        opponents: spot.opponents,
        in_position: spot.in_position,
        opponent_skill: spot.opponent_skill,
    };
    let eqr_result = eqr(equity_result.equity, &context);
    let realized = adjust_for_street(eqr_result.eqr, street);

    let odds = if spot.to_call > 0.0 {
        Some(pot_odds(spot.to_call, spot.pot, Some(spot.stack)))
    } else {
        None
    };

    let distribution = recommend(realized, odds.as_ref());

    Ok(SpotAssessment {
        equity: equity_result,
        texture,
        eqr: eqr_result,
        realized_equity: realized,
        pot_odds: odds,
        distribution,
        street,
    })
}

/// Baseline policy: strong hands bet, playable hands continue, the rest
/// folds — with the continue threshold tied to the price when facing a
/// bet.
fn recommend(realized_equity: f64, odds: Option<&PotOdds>) -> ActionDistribution {
    let continue_threshold = odds.map_or(0.45, |o| o.required_equity);

    let mut dist = ActionDistribution::default();
    if realized_equity > 0.65 {
        dist.raise = 0.85;
        dist.call = 0.15 * 0.3;
        dist.fold = 0.15 * 0.7;
    } else if realized_equity > continue_threshold {
        dist.call = 0.70;
        dist.fold = 0.15;
        dist.raise = 0.15;
    } else {
        dist.fold = 0.60;
        dist.call = 0.20;
        dist.raise = 0.20;
    }

    // Checking is free: never fold when there is no bet to face.
    if odds.is_none() {
        dist.call += dist.fold;
        dist.fold = 0.0;
    }

    dist.normalize();
    dist
}
