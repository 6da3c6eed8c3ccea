//! Equity realization (EQR).
//!
//! Raw showdown equity overstates or understates what a hand actually
//! wins once post-flop play happens. This module scales raw equity by
//! five situational factors (position, stack depth, board texture,
//! opponent count, opponent skill) and clamps the product into [0, 1].
//! All factor values are fixed design constants.

mod texture;

pub use texture::{classify_texture, TextureAnalysis};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Seat at a 9-handed table, in action order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Position {
    UnderTheGun = 0,
    UnderTheGunPlus1 = 1,
    UnderTheGunPlus2 = 2,
    MiddlePosition = 3,
    Hijack = 4,
    Cutoff = 5,
    Button = 6,
    SmallBlind = 7,
    BigBlind = 8,
}

impl Position {
    /// Convert a seat index (0-8) into a position.
    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        use Position::*;
        Ok(match index {
            0 => UnderTheGun,
            1 => UnderTheGunPlus1,
            2 => UnderTheGunPlus2,
            3 => MiddlePosition,
            4 => Hijack,
            5 => Cutoff,
            6 => Button,
            7 => SmallBlind,
            8 => BigBlind,
            _ => return Err(EngineError::InvalidPosition(index)),
        })
    }

    /// The realization factor for this seat.
    pub fn factor(&self) -> f64 {
        const FACTORS: [f64; 9] = [0.75, 0.78, 0.82, 0.86, 0.92, 0.98, 1.18, 0.70, 0.68];
        FACTORS[*self as usize]
    }
}

/// Board texture bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardTexture {
    /// Disconnected, rainbow, unpaired boards.
    Dry = 0,
    /// Some draw availability.
    SemiWet = 1,
    /// Coordinated boards with heavy draw availability.
    Wet = 2,
}

/// Street of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
}

/// Situational context for an EQR adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EqrContext {
    /// Hero's seat.
    pub position: Position,
    /// Effective remaining stack.
    pub stack: f64,
    /// Current pot.
    pub pot: f64,
    /// Board texture bucket.
    pub texture: BoardTexture,
    /// Number of live opponents (>= 1).
    pub opponents: usize,
    /// Whether hero acts last on the current street.
    pub in_position: bool,
    /// Opponent skill in [0, 1]; 0 weak, 1 strong.
    pub opponent_skill: f64,
}

/// The adjusted equity together with every factor that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EqrResult {
    /// The unadjusted Monte Carlo equity.
    pub raw_equity: f64,
    /// Final realized equity, clamped into [0, 1].
    pub eqr: f64,
    /// Seat factor from the position table.
    pub position_factor: f64,
    /// SPR factor from the piecewise stack-depth bands.
    pub stack_factor: f64,
    /// Texture factor, split by who closes the action.
    pub board_factor: f64,
    /// Decay for each extra live opponent.
    pub multiway_factor: f64,
    /// Adjustment for opponent skill.
    pub skill_factor: f64,
}

/// Stack-depth factor from the stack-to-pot ratio.
///
/// A zero pot counts as SPR 100: effectively unconstrained behind.
pub fn stack_factor(stack: f64, pot: f64) -> f64 {
    let spr = if pot > 0.0 { stack / pot } else { 100.0 };
    if spr < 1.0 {
        1.25
    } else if spr < 3.0 {
        1.15
    } else if spr < 7.0 {
        1.05
    } else if spr < 13.0 {
        1.00
    } else if spr < 25.0 {
        0.95
    } else {
        0.90
    }
}

/// Board-texture factor, split by who closes the action.
pub fn board_factor(texture: BoardTexture, in_position: bool) -> f64 {
    match (texture, in_position) {
        (BoardTexture::Dry, true) => 1.08,
        (BoardTexture::Dry, false) => 0.95,
        (BoardTexture::SemiWet, true) => 1.02,
        (BoardTexture::SemiWet, false) => 0.98,
        (BoardTexture::Wet, true) => 0.95,
        (BoardTexture::Wet, false) => 0.92,
    }
}

/// Multiway factor: realization decays with each extra opponent.
pub fn multiway_factor(opponents: usize) -> f64 {
    1.0 / (1.0 + 0.18 * (opponents.saturating_sub(1)) as f64)
}

/// Skill factor: stronger opponents realize more of *their* equity.
pub fn skill_factor(opponent_skill: f64) -> f64 {
    1.05 - 0.15 * opponent_skill
}

/// Compute the full EQR adjustment.
pub fn eqr(raw_equity: f64, context: &EqrContext) -> EqrResult {
    let position_factor = context.position.factor();
    let stack_factor = stack_factor(context.stack, context.pot);
    let board_factor = board_factor(context.texture, context.in_position);
    let multiway_factor = multiway_factor(context.opponents);
    let skill_factor = skill_factor(context.opponent_skill);

    let product = raw_equity
        * position_factor
        * stack_factor
        * board_factor
        * multiway_factor
        * skill_factor;

    EqrResult {
        raw_equity,
        eqr: product.clamp(0.0, 1.0),
        position_factor,
        stack_factor,
        board_factor,
        multiway_factor,
        skill_factor,
    }
}

/// Optional per-street multiplier applied on top of the base EQR.
pub fn adjust_for_street(eqr: f64, street: Street) -> f64 {
    const STREET_FACTORS: [f64; 4] = [0.95, 1.00, 1.03, 1.05];
    (eqr * STREET_FACTORS[street as usize]).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EqrContext {
        EqrContext {
            position: Position::Button,
            stack: 1000.0,
            pot: 10.0,
            texture: BoardTexture::Dry,
            opponents: 1,
            in_position: true,
            opponent_skill: 0.5,
        }
    }

    #[test]
    fn test_button_dry_deep_stack_spot() {
        // 0.60 * 1.18 (BTN) * 0.90 (SPR >= 25) * 1.08 (dry, IP)
        //      * 1.0 (heads-up) * 0.975 (skill 0.5)
        let result = eqr(0.60, &context());
        assert!((result.position_factor - 1.18).abs() < 1e-12);
        assert!((result.stack_factor - 0.90).abs() < 1e-12);
        assert!((result.board_factor - 1.08).abs() < 1e-12);
        assert!((result.multiway_factor - 1.0).abs() < 1e-12);
        assert!((result.skill_factor - 0.975).abs() < 1e-12);
        assert!((result.eqr - 0.671).abs() < 0.001);
    }

    #[test]
    fn test_medium_spr_is_neutral() {
        let ctx = EqrContext { stack: 100.0, ..context() };
        // SPR = 10 sits in the neutral 7-13 band.
        let result = eqr(0.60, &ctx);
        assert!((result.stack_factor - 1.00).abs() < 1e-12);
        assert!((result.eqr - 0.60 * 1.18 * 1.08 * 0.975).abs() < 1e-9);
    }

    #[test]
    fn test_spr_bands() {
        assert_eq!(stack_factor(5.0, 10.0), 1.25); // committed
        assert_eq!(stack_factor(20.0, 10.0), 1.15);
        assert_eq!(stack_factor(50.0, 10.0), 1.05);
        assert_eq!(stack_factor(100.0, 10.0), 1.00);
        assert_eq!(stack_factor(200.0, 10.0), 0.95);
        assert_eq!(stack_factor(300.0, 10.0), 0.90);
        // Zero pot is treated as very deep.
        assert_eq!(stack_factor(100.0, 0.0), 0.90);
    }

    #[test]
    fn test_position_factors() {
        assert_eq!(Position::from_index(6).unwrap(), Position::Button);
        assert_eq!(Position::Button.factor(), 1.18);
        assert_eq!(Position::BigBlind.factor(), 0.68);
        assert_eq!(Position::UnderTheGun.factor(), 0.75);
        assert!(matches!(
            Position::from_index(9),
            Err(EngineError::InvalidPosition(9))
        ));
    }

    #[test]
    fn test_multiway_decay() {
        assert_eq!(multiway_factor(1), 1.0);
        assert!((multiway_factor(2) - 1.0 / 1.18).abs() < 1e-12);
        assert!(multiway_factor(8) < multiway_factor(2));
    }

    #[test]
    fn test_result_clamped() {
        let ctx = EqrContext {
            stack: 5.0,
            pot: 10.0,
            opponent_skill: 0.0,
            ..context()
        };
        let result = eqr(0.99, &ctx);
        assert!(result.eqr <= 1.0);
        let floor = eqr(0.0, &ctx);
        assert_eq!(floor.eqr, 0.0);
    }

    #[test]
    fn test_street_multiplier() {
        assert!((adjust_for_street(0.5, Street::Preflop) - 0.475).abs() < 1e-12);
        assert_eq!(adjust_for_street(0.5, Street::Flop), 0.5);
        assert!((adjust_for_street(0.5, Street::River) - 0.525).abs() < 1e-12);
        assert_eq!(adjust_for_street(0.99, Street::River), 1.0);
    }

    #[test]
    fn test_out_of_position_wet_board_penalized() {
        let ip = board_factor(BoardTexture::Wet, true);
        let oop = board_factor(BoardTexture::Wet, false);
        assert!(oop < ip);
        assert!(oop < board_factor(BoardTexture::Dry, true));
    }
}
