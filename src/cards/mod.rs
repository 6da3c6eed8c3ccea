//! Card representation and primitives.
//!
//! This module provides the fundamental types used throughout the engine:
//! - [`Card`]: a single playing card encoded as `suit * 13 + rank`
//! - [`CardMask`]: a 52-bit set of cards for fast membership tests
//! - [`Deck`]: a 52-card deck with seeded shuffling and dead-card exclusion
//! - [`FastRng`]: the cheap xorshift generator used for all sampling

mod deck;
mod rng;

pub use deck::Deck;
pub use rng::FastRng;

use std::fmt;

/// Number of ranks in a suit.
pub const RANK_COUNT: u8 = 13;
/// Number of suits in a deck.
pub const SUIT_COUNT: u8 = 4;
/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_SPADES: u8 = 0;
pub const SUIT_HEARTS: u8 = 1;
pub const SUIT_DIAMONDS: u8 = 2;
pub const SUIT_CLUBS: u8 = 3;

/// Rank characters for display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

/// A single playing card.
///
/// Cards are indexed 0-51 where `id = suit * 13 + rank`. The value 255 is
/// reserved as the "empty slot" sentinel used by [`Deck`] compaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Card {
    id: u8,
}

impl Card {
    /// Sentinel card marking an empty deck slot.
    pub const SENTINEL: Card = Card { id: 255 };

    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < RANK_COUNT, "rank must be 0-12");
        debug_assert!(suit < SUIT_COUNT, "suit must be 0-3");
        Self { id: suit * RANK_COUNT + rank }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < DECK_SIZE as u8, "card id must be 0-51");
        Self { id }
    }

    /// Parse a card from a string like "As", "Kh", "2c".
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let rank_ch = chars.next()?;
        let suit_ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        let rank = RANK_CHARS.iter().position(|&c| c == rank_ch.to_ascii_uppercase())?;
        let suit = SUIT_CHARS.iter().position(|&c| c == suit_ch.to_ascii_lowercase())?;

        Some(Self::new(rank as u8, suit as u8))
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id % RANK_COUNT
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id / RANK_COUNT
    }

    /// Whether this card is the empty-slot sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.id == 255
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            return write!(f, "--");
        }
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A set of cards packed into a 64-bit word; bit `c` is set iff card `c`
/// is present. Only the low 52 bits are ever used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardMask(u64);

impl CardMask {
    /// The empty set.
    pub const EMPTY: CardMask = CardMask(0);

    /// Build a mask from a slice of cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut mask = Self::EMPTY;
        for &c in cards {
            mask.add(c);
        }
        mask
    }

    /// Test whether `card` is in the set.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.id()) != 0
    }

    /// Insert `card` into the set.
    #[inline]
    pub fn add(&mut self, card: Card) {
        self.0 |= 1u64 << card.id();
    }

    /// Remove `card` from the set.
    #[inline]
    pub fn remove(&mut self, card: Card) {
        self.0 &= !(1u64 << card.id());
    }

    /// Number of cards in the set.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Raw 64-bit value.
    #[inline]
    pub fn bits(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CardMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardMask({} cards)", self.count())
    }
}

/// Parse a run of cards from a string like "AhKs" or "Ah Ks Qd".
pub fn parse_cards(s: &str) -> Option<Vec<Card>> {
    let s = s.replace(' ', "");
    if s.len() % 2 != 0 {
        return None;
    }
    let mut cards = Vec::with_capacity(s.len() / 2);
    for i in (0..s.len()).step_by(2) {
        cards.push(Card::parse(&s[i..i + 2])?);
    }
    Some(cards)
}
