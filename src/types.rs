//! Core constants and symbol tables for deal and result text.
//!
//! Suits follow PBN hand order, ranks follow the table encoding (ace lowest
//! index), and denominations follow the trick-table column order.

/// Suits: SPADE=0, HEART=1, DIAMOND=2, CLUB=3 (PBN hand order)
pub type Suit = usize;
pub const SPADE: Suit = 0;
pub const HEART: Suit = 1;
pub const DIAMOND: Suit = 2;
pub const CLUB: Suit = 3;
pub const NUM_SUITS: usize = 4;

/// Ranks: ACE=0, TWO=1, ..., TEN=9, JACK=10, QUEEN=11, KING=12
pub type Rank = usize;
pub const ACE: Rank = 0;
pub const TWO: Rank = 1;
pub const THREE: Rank = 2;
pub const FOUR: Rank = 3;
pub const FIVE: Rank = 4;
pub const SIX: Rank = 5;
pub const SEVEN: Rank = 6;
pub const EIGHT: Rank = 7;
pub const NINE: Rank = 8;
pub const TEN: Rank = 9;
pub const JACK: Rank = 10;
pub const QUEEN: Rank = 11;
pub const KING: Rank = 12;
pub const NUM_RANKS: usize = 13;

/// Seats are positions in the deal text: the first hand is seat 0.
/// With the usual `N:` marker that gives NORTH=0, EAST=1, SOUTH=2, WEST=3.
pub type Seat = usize;
pub const NORTH: Seat = 0;
pub const EAST: Seat = 1;
pub const SOUTH: Seat = 2;
pub const WEST: Seat = 3;
pub const NUM_SEATS: usize = 4;

/// Denominations in trick-table column order: C, D, H, S, NT
pub type Denomination = usize;
pub const CLUBS: Denomination = 0;
pub const DIAMONDS: Denomination = 1;
pub const HEARTS: Denomination = 2;
pub const SPADES: Denomination = 3;
pub const NOTRUMP: Denomination = 4;
pub const NUM_DENOMINATIONS: usize = 5;

pub const TOTAL_TRICKS: usize = NUM_RANKS;
pub const TOTAL_CARDS: usize = NUM_RANKS * NUM_SUITS;

/// Rank symbols indexed by rank
pub const RANK_SYMBOLS: [char; NUM_RANKS] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

/// Ranks from highest to lowest, the order hands are written in
pub const DISPLAY_ORDER: [Rank; NUM_RANKS] = [
    ACE, KING, QUEEN, JACK, TEN, NINE, EIGHT, SEVEN, SIX, FIVE, FOUR, THREE, TWO,
];

/// Get rank symbol
#[inline]
pub fn rank_name(rank: Rank) -> char {
    RANK_SYMBOLS[rank]
}

/// Convert a rank symbol to its rank. Only upper-case symbols are accepted.
pub fn char_to_rank(c: char) -> Option<Rank> {
    match c {
        'A' => Some(ACE),
        '2' => Some(TWO),
        '3' => Some(THREE),
        '4' => Some(FOUR),
        '5' => Some(FIVE),
        '6' => Some(SIX),
        '7' => Some(SEVEN),
        '8' => Some(EIGHT),
        '9' => Some(NINE),
        'T' => Some(TEN),
        'J' => Some(JACK),
        'Q' => Some(QUEEN),
        'K' => Some(KING),
        _ => None,
    }
}

/// Get seat name
pub fn seat_name(seat: Seat) -> &'static str {
    const NAMES: [&str; NUM_SEATS] = ["North", "East", "South", "West"];
    NAMES[seat]
}

/// Get seat letter
pub fn seat_letter(seat: Seat) -> char {
    const LETTERS: [char; NUM_SEATS] = ['N', 'E', 'S', 'W'];
    LETTERS[seat]
}

/// Convert a deal marker character to a seat
pub fn char_to_seat(c: char) -> Option<Seat> {
    match c {
        'N' => Some(NORTH),
        'E' => Some(EAST),
        'S' => Some(SOUTH),
        'W' => Some(WEST),
        _ => None,
    }
}

/// Get denomination name
pub fn denomination_name(denom: Denomination) -> &'static str {
    const NAMES: [&str; NUM_DENOMINATIONS] = ["C", "D", "H", "S", "NT"];
    NAMES[denom]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_rank() {
        assert_eq!(char_to_rank('A'), Some(ACE));
        assert_eq!(char_to_rank('2'), Some(TWO));
        assert_eq!(char_to_rank('T'), Some(TEN));
        assert_eq!(char_to_rank('K'), Some(KING));
        assert_eq!(char_to_rank('X'), None);
        assert_eq!(char_to_rank('1'), None);
        assert_eq!(char_to_rank('a'), None);
    }

    #[test]
    fn test_rank_symbols_roundtrip() {
        for rank in 0..NUM_RANKS {
            assert_eq!(char_to_rank(rank_name(rank)), Some(rank));
        }
    }

    #[test]
    fn test_char_to_seat() {
        assert_eq!(char_to_seat('N'), Some(NORTH));
        assert_eq!(char_to_seat('W'), Some(WEST));
        assert_eq!(char_to_seat('X'), None);
        assert_eq!(seat_letter(SOUTH), 'S');
        assert_eq!(seat_name(EAST), "East");
    }

    #[test]
    fn test_display_order_covers_all_ranks() {
        let mut seen = [false; NUM_RANKS];
        for &rank in &DISPLAY_ORDER {
            seen[rank] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(denomination_name(NOTRUMP), "NT");
        assert_eq!(denomination_name(CLUBS), "C");
    }
}
