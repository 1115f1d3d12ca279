//! Conversion between bridge-types and the table's deal representation.
//!
//! Deals parsed elsewhere with bridge-types can be keyed directly without
//! a round-trip through PBN text.

use super::cards::*;
use super::deal::Deal;
use super::error::FormatError;
use super::types::*;

impl Deal {
    /// Create a Deal from a bridge_types::Deal
    ///
    /// Fails if the hands overlap or do not cover the whole deck.
    pub fn from_bridge_deal(deal: &bridge_types::Deal) -> Result<Self, FormatError> {
        let mut hands = [Cards::new(); NUM_SEATS];

        let directions = [
            bridge_types::Direction::North,
            bridge_types::Direction::East,
            bridge_types::Direction::South,
            bridge_types::Direction::West,
        ];

        for dir in directions {
            let seat = direction_to_seat(dir);
            for card in deal.hand(dir).cards() {
                hands[seat].add(convert_card(card));
            }
        }

        Deal::from_hands(hands)
    }
}

/// Convert a bridge_types::Card to a card index
fn convert_card(card: &bridge_types::Card) -> usize {
    card_of(convert_suit(card.suit), convert_rank(card.rank))
}

/// Convert bridge_types::Suit to Suit
/// bridge_types: Clubs=0, Diamonds=1, Hearts=2, Spades=3
/// here: SPADE=0, HEART=1, DIAMOND=2, CLUB=3
fn convert_suit(suit: bridge_types::Suit) -> Suit {
    match suit {
        bridge_types::Suit::Spades => SPADE,
        bridge_types::Suit::Hearts => HEART,
        bridge_types::Suit::Diamonds => DIAMOND,
        bridge_types::Suit::Clubs => CLUB,
    }
}

/// Convert bridge_types::Rank to Rank
/// bridge_types: Two=2, Three=3, ..., Ace=14
/// here: ACE=0, TWO=1, ..., KING=12
fn convert_rank(rank: bridge_types::Rank) -> Rank {
    match rank as usize {
        14 => ACE,
        r => r - 1,
    }
}

/// Convert bridge_types::Direction to Seat
pub fn direction_to_seat(dir: bridge_types::Direction) -> Seat {
    match dir {
        bridge_types::Direction::North => NORTH,
        bridge_types::Direction::East => EAST,
        bridge_types::Direction::South => SOUTH,
        bridge_types::Direction::West => WEST,
    }
}

/// Convert Seat to bridge_types::Direction
pub fn seat_to_direction(seat: Seat) -> bridge_types::Direction {
    match seat {
        NORTH => bridge_types::Direction::North,
        EAST => bridge_types::Direction::East,
        SOUTH => bridge_types::Direction::South,
        WEST => bridge_types::Direction::West,
        _ => unreachable!(),
    }
}
