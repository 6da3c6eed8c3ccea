//! Decision arithmetic: pot odds, defense frequencies, expected values.
//!
//! Small pure functions shared by the advisor and useful on their own.

use serde::{Deserialize, Serialize};

/// Pot odds for a call decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotOdds {
    /// Amount to call.
    pub call_amount: f64,
    /// Pot before the call.
    pub pot_size: f64,
    /// `call / (pot + call)`.
    pub pot_odds: f64,
    /// Equity needed to break even on the call. Equal to `pot_odds`.
    pub required_equity: f64,
    /// Multiplier on the pot from money still behind (1.0 with no stack).
    pub implied_odds_factor: f64,
}

impl PotOdds {
    /// Express the odds as a total-pot-to-call ratio string like "4.0:1".
    pub fn ratio(&self) -> String {
        if self.pot_odds < 0.01 {
            return "inf:1".to_string();
        }
        format!("{:.1}:1", 1.0 / self.pot_odds)
    }
}

/// Compute pot odds; `effective_stack` feeds the implied-odds factor.
pub fn pot_odds(call_amount: f64, pot_size: f64, effective_stack: Option<f64>) -> PotOdds {
    let call_amount = call_amount.max(0.01);
    let total_pot = pot_size + call_amount;
    let odds = call_amount / total_pot;

    let implied_odds_factor = match effective_stack {
        Some(stack) if stack > call_amount => {
            let potential = total_pot + (stack - call_amount);
            potential / total_pot
        }
        _ => 1.0,
    };

    PotOdds {
        call_amount,
        pot_size,
        pot_odds: odds,
        required_equity: odds,
        implied_odds_factor,
    }
}

/// Minimum defense frequency against a bet: `pot / (pot + bet)`.
pub fn minimum_defense_frequency(pot_before_bet: f64, bet_size: f64) -> f64 {
    pot_before_bet / (pot_before_bet + bet_size)
}

/// Expected value of calling: win the pot at `equity`, pay the call the
/// rest of the time.
pub fn ev_call(equity: f64, pot: f64, call_amount: f64) -> f64 {
    equity * pot - (1.0 - equity) * call_amount
}

/// Expected value of raising, counting fold equity.
pub fn ev_raise(equity: f64, pot: f64, raise_amount: f64, fold_probability: f64) -> f64 {
    let win_by_fold = fold_probability * pot;
    let win_at_showdown = (1.0 - fold_probability) * equity * (pot + raise_amount);
    let cost = (1.0 - fold_probability) * (1.0 - equity) * raise_amount;
    win_by_fold + win_at_showdown - cost
}

/// Stack-to-pot ratio; a zero pot counts as 100.
pub fn spr(effective_stack: f64, pot: f64) -> f64 {
    if pot <= 0.0 {
        return 100.0;
    }
    effective_stack / pot
}

/// Coarse SPR bucket used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SprCategory {
    Committed,
    Short,
    Medium,
    Deep,
    VeryDeep,
}

/// Bucket an SPR value.
pub fn spr_category(spr: f64) -> SprCategory {
    if spr < 1.0 {
        SprCategory::Committed
    } else if spr < 3.0 {
        SprCategory::Short
    } else if spr < 7.0 {
        SprCategory::Medium
    } else if spr < 13.0 {
        SprCategory::Deep
    } else {
        SprCategory::VeryDeep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pot_odds_quarter() {
        // Calling 25 into a pot of 75: 25 / 100 = 25% required equity.
        let odds = pot_odds(25.0, 75.0, None);
        assert!((odds.pot_odds - 0.25).abs() < 1e-12);
        assert!((odds.required_equity - 0.25).abs() < 1e-12);
        assert_eq!(odds.implied_odds_factor, 1.0);
        assert_eq!(odds.ratio(), "4.0:1");
    }

    #[test]
    fn test_implied_odds_factor() {
        let odds = pot_odds(25.0, 75.0, Some(225.0));
        // 100 in the middle plus 200 behind.
        assert!((odds.implied_odds_factor - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mdf_pot_sized_bet() {
        // Against a pot-sized bet, defend half the time.
        assert!((minimum_defense_frequency(100.0, 100.0) - 0.5).abs() < 1e-12);
        // Against a half-pot bet, defend two thirds.
        assert!((minimum_defense_frequency(100.0, 50.0) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ev_call_break_even_at_required_equity() {
        let odds = pot_odds(50.0, 100.0, None);
        let ev = ev_call(odds.required_equity, 100.0, 50.0);
        assert!(ev.abs() < 1e-9);
        assert!(ev_call(0.5, 100.0, 50.0) > 0.0);
        assert!(ev_call(0.1, 100.0, 50.0) < 0.0);
    }

    #[test]
    fn test_ev_raise_fold_equity_dominates_with_trash() {
        // Zero equity: profitable only through folds.
        let all_folds = ev_raise(0.0, 100.0, 50.0, 1.0);
        assert!((all_folds - 100.0).abs() < 1e-12);
        let never_folds = ev_raise(0.0, 100.0, 50.0, 0.0);
        assert!(never_folds < 0.0);
    }

    #[test]
    fn test_spr_buckets() {
        assert_eq!(spr(100.0, 0.0), 100.0);
        assert_eq!(spr_category(0.5), SprCategory::Committed);
        assert_eq!(spr_category(2.0), SprCategory::Short);
        assert_eq!(spr_category(5.0), SprCategory::Medium);
        assert_eq!(spr_category(10.0), SprCategory::Deep);
        assert_eq!(spr_category(20.0), SprCategory::VeryDeep);
    }
}
