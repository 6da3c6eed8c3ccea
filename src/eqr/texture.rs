//! Board texture classification.
//!
//! Buckets a 3-5 card board into [`BoardTexture`] from its connectivity,
//! draw availability, and pairing. The bucket feeds the EQR board factor;
//! callers with their own texture model can bypass this entirely.

use serde::{Deserialize, Serialize};

use super::BoardTexture;
use crate::cards::Card;
use crate::error::EngineError;

/// Everything the classifier derives from a board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureAnalysis {
    /// The texture bucket.
    pub texture: BoardTexture,
    /// Connectivity score in [0, 1]; 1 means perfectly connected ranks.
    pub connectivity: f64,
    /// Two or more cards of one suit on board.
    pub flush_draw: bool,
    /// Rank gaps small enough for open-enders or gutshots.
    pub straight_draw: bool,
    /// At least one rank appears twice.
    pub paired: bool,
}

/// Classify a 3-5 card board.
///
/// Preflop (fewer than 3 cards) has no texture; that is an input error
/// here rather than a default.
pub fn classify_texture(board: &[Card]) -> Result<TextureAnalysis, EngineError> {
    if board.len() < 3 || board.len() > 5 {
        return Err(EngineError::InvalidBoard(board.len()));
    }

    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();
    let paired = ranks.windows(2).any(|w| w[0] == w[1]);

    let mut suit_counts = [0u8; 4];
    for card in board {
        suit_counts[card.suit() as usize] += 1;
    }
    let flush_draw = suit_counts.iter().any(|&c| c >= 2);

    let mut unique = ranks.clone();
    unique.dedup();
    let gaps: Vec<u8> = unique.windows(2).map(|w| w[1] - w[0]).collect();
    let straight_draw = gaps.iter().any(|&g| g <= 3);

    let avg_gap = ranks
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64)
        .sum::<f64>()
        / (ranks.len() - 1) as f64;
    let connectivity = (1.0 / avg_gap.max(1.0)).min(1.0);

    let mut score: i32 = 0;
    if connectivity > 0.7 {
        score += 2;
    } else if connectivity > 0.5 {
        score += 1;
    }
    if flush_draw {
        score += 1;
    }
    if straight_draw {
        score += 1;
    }
    if paired {
        score -= 1;
    }

    // The EQR table knows three buckets; heavily coordinated boards all
    // land in Wet.
    let texture = if score >= 2 {
        BoardTexture::Wet
    } else if score >= 1 {
        BoardTexture::SemiWet
    } else {
        BoardTexture::Dry
    };

    Ok(TextureAnalysis { texture, connectivity, flush_draw, straight_draw, paired })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn classify(s: &str) -> TextureAnalysis {
        classify_texture(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn test_dry_rainbow_board() {
        let analysis = classify("Kh 7d 2c");
        assert_eq!(analysis.texture, BoardTexture::Dry);
        assert!(!analysis.flush_draw);
        assert!(!analysis.paired);
    }

    #[test]
    fn test_wet_connected_suited_board() {
        let analysis = classify("9h 8h 7d");
        assert_eq!(analysis.texture, BoardTexture::Wet);
        assert!(analysis.flush_draw);
        assert!(analysis.straight_draw);
        assert!(analysis.connectivity > 0.7);
    }

    #[test]
    fn test_paired_board_downgrades() {
        let paired = classify("Kh Kd 2c");
        assert!(paired.paired);
        assert_eq!(paired.texture, BoardTexture::Dry);

        // The same high cards unpaired keep their draw potential.
        let unpaired = classify("Kh Qd 2c");
        assert_eq!(unpaired.texture, BoardTexture::SemiWet);
    }

    #[test]
    fn test_monotone_broadway_is_wet() {
        let analysis = classify("Ah Kh Qh");
        assert_eq!(analysis.texture, BoardTexture::Wet);
    }

    #[test]
    fn test_five_card_board() {
        let analysis = classify("Ah 8d 8c 3s 2h");
        assert!(analysis.paired);
    }

    #[test]
    fn test_preflop_rejected() {
        assert!(classify_texture(&parse_cards("AhKs").unwrap()).is_err());
        assert!(classify_texture(&[]).is_err());
    }
}
