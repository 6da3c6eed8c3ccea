//! The 7-card evaluator proper.

use super::tables::tables;
use crate::cards::Card;
use std::cmp::Ordering;
use std::fmt;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

/// A totally ordered hand score.
///
/// Layout, high to low: category in bits 20-23, then up to five 4-bit
/// tiebreaker ranks at bits 16, 12, 8, 4, 0. Numeric ordering coincides
/// with poker hand ranking; equal scores split the pot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandScore(u32);

impl HandScore {
    /// The raw 32-bit value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The hand category encoded in the score.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_bits(self.0 >> 20)
    }

    /// The most significant tiebreaker rank (quads rank, trips rank,
    /// straight high card, top kicker, ...).
    pub fn primary_rank(&self) -> u8 {
        ((self.0 >> 16) & 0xF) as u8
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Debug for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandScore({}, {:#08x})", self.category().name(), self.0)
    }
}

/// Pack a category and descending tiebreaker ranks into a score value.
pub(super) fn pack_score(category: HandCategory, kickers: &[u8]) -> u32 {
    let mut value = (category as u32) << 20;
    for (i, &k) in kickers.iter().take(5).enumerate() {
        value |= (k as u32) << (16 - i * 4);
    }
    value
}

/// Find the highest straight in a 13-bit rank mask.
///
/// Checks each five-wide window, then the wheel (ace plus 2-5), whose
/// high card is the five (rank index 3).
pub(super) fn straight_high(mask: u16) -> Option<u8> {
    for i in (0..=8u8).rev() {
        if (mask >> i) & 0x1F == 0x1F {
            return Some(i + 4);
        }
    }
    if mask & 0x100F == 0x100F {
        return Some(3);
    }
    None
}

/// Evaluate exactly 7 distinct cards.
///
/// Card order does not matter. Passing duplicate cards is a contract
/// violation and produces a meaningless score.
pub fn evaluate_seven(cards: &[Card; 7]) -> HandScore {
    debug_assert!(
        {
            let mut ids: Vec<u8> = cards.iter().map(|c| c.id()).collect();
            ids.sort_unstable();
            ids.windows(2).all(|w| w[0] != w[1])
        },
        "evaluate_seven requires 7 distinct cards"
    );

    let mut suit_masks = [0u16; 4];
    let mut rank_counts = [0u8; 13];
    let mut rank_mask = 0u16;

    for card in cards {
        let r = card.rank();
        suit_masks[card.suit() as usize] |= 1 << r;
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
    }

    // A 7-card hand holds at most one flush suit.
    for sm in suit_masks {
        if sm.count_ones() >= 5 {
            return HandScore(tables().flush_lookup[sm as usize]);
        }
    }

    HandScore(evaluate_non_flush(&rank_counts, rank_mask))
}

/// Histogram-based scoring for hands without a flush.
fn evaluate_non_flush(counts: &[u8; 13], rank_mask: u16) -> u32 {
    let mut quads: Option<u8> = None;
    let mut trips: Option<u8> = None;
    let mut second_trips: Option<u8> = None;
    let mut pairs = [0u8; 2];
    let mut pair_count = 0;

    for r in (0..13u8).rev() {
        match counts[r as usize] {
            4 => quads = Some(r),
            3 => {
                if trips.is_none() {
                    trips = Some(r);
                } else if second_trips.is_none() {
                    second_trips = Some(r);
                }
            }
            2 => {
                if pair_count < 2 {
                    pairs[pair_count] = r;
                    pair_count += 1;
                }
            }
            _ => {}
        }
    }

    if let Some(q) = quads {
        let kicker = highest_excluding(counts, &[q]);
        return pack_score(HandCategory::FourOfAKind, &[q, kicker]);
    }

    if let Some(t) = trips {
        // Two distinct trips: the lower one supplies the pair.
        let pair = second_trips.or(if pair_count > 0 { Some(pairs[0]) } else { None });
        if let Some(p) = pair {
            return pack_score(HandCategory::FullHouse, &[t, p]);
        }
    }

    if let Some(high) = straight_high(rank_mask) {
        return pack_score(HandCategory::Straight, &[high]);
    }

    if let Some(t) = trips {
        let kickers = top_kickers(counts, &[t], 2);
        return pack_score(
            HandCategory::ThreeOfAKind,
            &[t, kickers[0], kickers[1]],
        );
    }

    if pair_count >= 2 {
        let kicker = highest_excluding(counts, &pairs);
        return pack_score(HandCategory::TwoPair, &[pairs[0], pairs[1], kicker]);
    }

    if pair_count == 1 {
        let kickers = top_kickers(counts, &[pairs[0]], 3);
        return pack_score(
            HandCategory::OnePair,
            &[pairs[0], kickers[0], kickers[1], kickers[2]],
        );
    }

    // No pairs: 7 distinct ranks, table probe covers high card.
    tables().unique5_lookup[(rank_mask & 0x1FFF) as usize]
}

/// Highest present rank not in `exclude`.
fn highest_excluding(counts: &[u8; 13], exclude: &[u8]) -> u8 {
    for r in (0..13u8).rev() {
        if counts[r as usize] > 0 && !exclude.contains(&r) {
            return r;
        }
    }
    0
}

/// The `n` highest present ranks not in `exclude`, descending.
fn top_kickers(counts: &[u8; 13], exclude: &[u8], n: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(n);
    for r in (0..13u8).rev() {
        if counts[r as usize] > 0 && !exclude.contains(&r) {
            out.push(r);
            if out.len() == n {
                break;
            }
        }
    }
    out
}
