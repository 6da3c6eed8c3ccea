//! A deck of 52 playing cards with seeded shuffling and dead-card removal.

use super::{Card, CardMask, FastRng, DECK_SIZE};
use crate::error::EngineError;
use std::fmt;

/// An ordered deck with a read cursor.
///
/// Created in canonical order (card ids 0-51). [`Deck::exclude`] compacts
/// the live cards to the front, fills the tail with [`Card::SENTINEL`],
/// and records the effective size; subsequent shuffles and deals only
/// touch the survivors.
#[derive(Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    /// Index of the next card to deal.
    cursor: usize,
    /// Number of live (non-sentinel) cards.
    size: usize,
}

impl Deck {
    /// Create a new deck in canonical order.
    pub fn new() -> Self {
        let mut cards = [Card::SENTINEL; DECK_SIZE];
        for (i, slot) in cards.iter_mut().enumerate() {
            *slot = Card::from_id(i as u8);
        }
        Self { cards, cursor: 0, size: DECK_SIZE }
    }

    /// Fisher-Yates shuffle of the live cards, seeded by `seed`, and reset
    /// the cursor. A zero seed draws a hardware seed (non-reproducible).
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = FastRng::new(seed);
        self.shuffle_with(&mut rng);
    }

    /// Fisher-Yates shuffle using a caller-owned generator.
    pub fn shuffle_with(&mut self, rng: &mut FastRng) {
        self.cursor = 0;
        for i in (1..self.size).rev() {
            let j = rng.next_below(i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Deal the next card, advancing the cursor.
    ///
    /// Fails once every live card has been dealt.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        if self.cursor >= self.size {
            return Err(EngineError::DeckExhausted);
        }
        let card = self.cards[self.cursor];
        self.cursor += 1;
        Ok(card)
    }

    /// Rewind the cursor without reordering.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Remove every card in `dead` from the deck.
    ///
    /// Survivors shift left, the tail fills with sentinels, and the
    /// effective size shrinks. The cursor rewinds to 0.
    pub fn exclude(&mut self, dead: CardMask) {
        let mut write = 0;
        for read in 0..self.size {
            let card = self.cards[read];
            if !dead.contains(card) {
                self.cards[write] = card;
                write += 1;
            }
        }
        for slot in write..DECK_SIZE {
            self.cards[slot] = Card::SENTINEL;
        }
        self.size = write;
        self.cursor = 0;
    }

    /// Number of cards still dealable.
    pub fn remaining(&self) -> usize {
        self.size - self.cursor
    }

    /// Number of live cards (dealt or not).
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the deck holds no live cards at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The live cards in current order.
    pub fn cards(&self) -> &[Card] {
        &self.cards[..self.size]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} live, {} remaining)", self.size, self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let mut deck = Deck::new();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.deal().unwrap().id(), 0);
        assert_eq!(deck.deal().unwrap().id(), 1);
        assert_eq!(deck.remaining(), 50);
    }

    #[test]
    fn test_deal_exhaustion() {
        let mut deck = Deck::new();
        for _ in 0..52 {
            assert!(deck.deal().is_ok());
        }
        assert_eq!(deck.deal().unwrap_err(), EngineError::DeckExhausted);
        deck.reset();
        assert!(deck.deal().is_ok());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck = Deck::new();
        deck.shuffle(12345);
        let mut seen = [false; 52];
        while let Ok(card) = deck.deal() {
            assert!(!seen[card.id() as usize]);
            seen[card.id() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_shuffle_reproducible() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(99);
        b.shuffle(99);
        assert_eq!(a.cards(), b.cards());

        let mut c = Deck::new();
        c.shuffle(100);
        assert_ne!(a.cards(), c.cards());
    }

    #[test]
    fn test_exclude() {
        let dead = CardMask::from_cards(&[
            Card::parse("As").unwrap(),
            Card::parse("Ah").unwrap(),
        ]);
        let mut deck = Deck::new();
        deck.exclude(dead);
        assert_eq!(deck.len(), 50);
        assert_eq!(deck.remaining(), 50);

        let mut count = 0;
        while let Ok(card) = deck.deal() {
            assert!(!dead.contains(card));
            assert!(!card.is_sentinel());
            count += 1;
        }
        assert_eq!(count, 50);
    }

    #[test]
    fn test_exclude_then_shuffle_stays_in_survivors() {
        let dead = CardMask::from_cards(&parse_all("2s3s4s5s"));
        let mut deck = Deck::new();
        deck.exclude(dead);
        deck.shuffle(7);
        assert_eq!(deck.len(), 48);
        while let Ok(card) = deck.deal() {
            assert!(!dead.contains(card));
        }
    }

    fn parse_all(s: &str) -> Vec<Card> {
        super::super::parse_cards(s).unwrap()
    }
}
