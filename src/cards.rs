//! Card indexing and a 52-bit card set
//!
//! A card's index is `rank + suit * 13`, so each suit occupies 13
//! consecutive bits with the ace in the lowest bit of its suit.
//! Bit 0 = Spade Ace, Bit 1 = Spade 2, Bit 12 = Spade King, Bit 13 = Heart Ace, etc.

use super::types::*;

/// Get suit of a card (0-51 -> 0-3)
#[inline]
pub fn suit_of(card: usize) -> Suit {
    card / NUM_RANKS
}

/// Get rank of a card (0-51 -> 0-12, where 0=Ace)
#[inline]
pub fn rank_of(card: usize) -> Rank {
    card % NUM_RANKS
}

/// Get card index from suit and rank
#[inline]
pub fn card_of(suit: Suit, rank: Rank) -> usize {
    rank + suit * NUM_RANKS
}

/// Get mask for a suit (13 bits)
#[inline]
pub fn mask_of(suit: Suit) -> u64 {
    0x1FFF << (suit * NUM_RANKS)
}

/// Get card name as string, e.g. "SA" or "DT"
pub fn name_of(card: usize) -> String {
    const SUIT_LETTERS: [char; NUM_SUITS] = ['S', 'H', 'D', 'C'];
    format!("{}{}", SUIT_LETTERS[suit_of(card)], rank_name(rank_of(card)))
}

const FULL_DECK: u64 = (1u64 << TOTAL_CARDS) - 1;

/// Cards represented as a 52-bit bitboard
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cards {
    bits: u64,
}

impl Cards {
    /// Create empty card set
    #[inline]
    pub const fn new() -> Self {
        Cards { bits: 0 }
    }

    /// The full 52-card deck
    #[inline]
    pub const fn deck() -> Self {
        Cards { bits: FULL_DECK }
    }

    /// Create from raw bits; bits above the deck are dropped
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Cards {
            bits: bits & FULL_DECK,
        }
    }

    /// Get raw bits value
    #[inline]
    pub fn value(&self) -> u64 {
        self.bits
    }

    /// Count number of cards
    #[inline]
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if a card is present
    #[inline]
    pub fn have(&self, card: usize) -> bool {
        self.bits & (1u64 << card) != 0
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Get cards in a specific suit
    #[inline]
    pub fn suit(&self, suit: Suit) -> Cards {
        Cards::from_bits(self.bits & mask_of(suit))
    }

    /// Union of two card sets
    #[inline]
    pub fn union(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits | other.bits)
    }

    /// Complement (all cards not in self)
    #[inline]
    pub fn complement(&self) -> Cards {
        Cards::from_bits(FULL_DECK ^ self.bits)
    }

    /// Add a single card
    #[inline]
    pub fn add(&mut self, card: usize) -> &mut Self {
        self.bits |= 1u64 << card;
        self
    }

    /// Iterate over cards in index order (spades first, ace first within a suit)
    pub fn iter(&self) -> CardsIterator {
        CardsIterator { bits: self.bits }
    }
}

impl std::fmt::Debug for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cards(")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", name_of(card))?;
        }
        write!(f, ")")
    }
}

/// Formats as one PBN hand: four suit groups joined by `.`, honours first
impl std::fmt::Display for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suit in 0..NUM_SUITS {
            if suit > 0 {
                write!(f, ".")?;
            }
            for &rank in &DISPLAY_ORDER {
                if self.have(card_of(suit, rank)) {
                    write!(f, "{}", rank_name(rank))?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator over cards in a Cards bitset
pub struct CardsIterator {
    bits: u64,
}

impl Iterator for CardsIterator {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let card = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1; // Clear lowest set bit
            Some(card)
        }
    }
}

impl IntoIterator for Cards {
    type Item = usize;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        CardsIterator { bits: self.bits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_indices() {
        // Spade Ace should be card 0
        assert_eq!(card_of(SPADE, ACE), 0);
        assert_eq!(suit_of(0), SPADE);
        assert_eq!(rank_of(0), ACE);

        // Spade King should be card 12
        assert_eq!(card_of(SPADE, KING), 12);
        assert_eq!(rank_of(12), KING);

        // Heart Ace should be card 13
        assert_eq!(card_of(HEART, ACE), 13);
        assert_eq!(suit_of(13), HEART);

        // Club King should be card 51
        assert_eq!(card_of(CLUB, KING), 51);
        assert_eq!(suit_of(51), CLUB);
        assert_eq!(rank_of(51), KING);
    }

    #[test]
    fn test_cards_basic() {
        let mut cards = Cards::new();
        assert!(cards.is_empty());
        assert_eq!(cards.size(), 0);

        cards.add(card_of(SPADE, ACE));
        assert!(!cards.is_empty());
        assert_eq!(cards.size(), 1);
        assert!(cards.have(card_of(SPADE, ACE)));

        cards.add(card_of(HEART, KING));
        assert_eq!(cards.size(), 2);
        assert_eq!(cards.complement().size(), 50);
        assert_eq!(Cards::deck().size(), TOTAL_CARDS);
    }

    #[test]
    fn test_cards_suit() {
        let mut cards = Cards::new();
        cards.add(card_of(SPADE, ACE));
        cards.add(card_of(SPADE, KING));
        cards.add(card_of(HEART, ACE));

        let spades = cards.suit(SPADE);
        assert_eq!(spades.size(), 2);
        assert!(spades.have(card_of(SPADE, KING)));
        assert!(!spades.have(card_of(HEART, ACE)));
    }

    #[test]
    fn test_cards_display_is_pbn_hand() {
        let mut cards = Cards::new();
        for (suit, rank) in [(SPADE, TWO), (SPADE, ACE), (SPADE, TEN), (DIAMOND, KING)] {
            cards.add(card_of(suit, rank));
        }
        assert_eq!(cards.to_string(), "AT2..K.");
        assert_eq!(Cards::new().to_string(), "...");
    }

    #[test]
    fn test_cards_iteration() {
        let mut cards = Cards::new();
        cards.add(card_of(HEART, ACE));
        cards.add(card_of(SPADE, KING));
        cards.add(card_of(SPADE, ACE));

        let collected: Vec<_> = cards.iter().collect();
        assert_eq!(
            collected,
            vec![card_of(SPADE, ACE), card_of(SPADE, KING), card_of(HEART, ACE)]
        );
        assert_eq!(name_of(card_of(CLUB, TEN)), "CT");
    }
}
