//! Deal parsing and the canonical deal key
//!
//! A deal is stored as a 52-slot owner table (one seat per card). The key
//! packs each suit's 13 owners as a base-4 number, ace most significant,
//! so two deals with the same ownership always share a key.

use serde::{Deserialize, Serialize};

use super::cards::*;
use super::error::FormatError;
use super::packing::{pack, unpack, DEAL_BASE, DEAL_DIGITS, MAX_DEAL_COMPONENT};
use super::types::*;

/// Canonical encoding of a deal: one base-4 integer per suit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DealKey(pub [u32; NUM_SUITS]);

impl DealKey {
    /// Get the packed owners for one suit
    #[inline]
    pub fn suit(&self, suit: Suit) -> u32 {
        self.0[suit]
    }

    /// Check every component is below 4^13
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|&c| c <= MAX_DEAL_COMPONENT)
    }

    /// Decode back into a deal.
    ///
    /// Any in-range key decodes, since every base-4 digit names a seat.
    /// Returns None if a component is 4^13 or more.
    pub fn to_deal(&self) -> Option<Deal> {
        if !self.is_valid() {
            return None;
        }
        let mut owners = [0u8; TOTAL_CARDS];
        for (suit, &packed) in self.0.iter().enumerate() {
            let digits = unpack::<DEAL_DIGITS>(packed, DEAL_BASE);
            owners[suit * NUM_RANKS..(suit + 1) * NUM_RANKS].copy_from_slice(&digits);
        }
        Some(Deal { owners })
    }
}

impl std::fmt::Display for DealKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [s, h, d, c] = self.0;
        write!(f, "[{s}, {h}, {d}, {c}]")
    }
}

/// Every card of the deck assigned to one of four seats
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deal {
    owners: [u8; TOTAL_CARDS],
}

impl Deal {
    /// Parse from PBN-style deal string
    /// Format: "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"
    ///
    /// The seat marker must be present but does not rotate the hands: the
    /// first hand listed is always seat 0. Every card must appear exactly once.
    pub fn from_pbn(s: &str) -> Result<Self, FormatError> {
        if s.is_empty() {
            return Err(FormatError::Empty);
        }

        let mut chars = s.chars();
        let rest = match (chars.next().and_then(char_to_seat), chars.next()) {
            (Some(_), Some(':')) => &s[2..],
            _ => return Err(FormatError::SeatMarker(s.chars().take(2).collect())),
        };

        let hand_strs: Vec<&str> = rest.split(' ').collect();
        if hand_strs.len() != NUM_SEATS {
            return Err(FormatError::HandCount {
                found: hand_strs.len(),
                text: rest.to_string(),
            });
        }

        let mut hands = [Cards::new(); NUM_SEATS];
        for (hand, hand_str) in hands.iter_mut().zip(&hand_strs) {
            *hand = parse_hand(hand_str)?;
        }
        Deal::from_hands(hands)
    }

    /// Build from four disjoint hands covering the whole deck
    pub fn from_hands(hands: [Cards; NUM_SEATS]) -> Result<Self, FormatError> {
        let mut owners = [0u8; TOTAL_CARDS];
        let mut assigned = Cards::new();
        for (seat, hand) in hands.iter().enumerate() {
            for card in *hand {
                if assigned.have(card) {
                    return Err(FormatError::DuplicateCard {
                        card: name_of(card),
                    });
                }
                assigned.add(card);
                owners[card] = seat as u8;
            }
        }

        let missing = assigned.complement().size();
        if missing > 0 {
            return Err(FormatError::IncompleteDeal { missing });
        }
        Ok(Deal { owners })
    }

    /// Get the seat holding a card
    #[inline]
    pub fn owner(&self, card: usize) -> Seat {
        self.owners[card] as Seat
    }

    /// Get hand for a seat
    pub fn hand(&self, seat: Seat) -> Cards {
        let mut cards = Cards::new();
        for card in 0..TOTAL_CARDS {
            if self.owner(card) == seat {
                cards.add(card);
            }
        }
        cards
    }

    /// Compute the canonical key
    pub fn key(&self) -> DealKey {
        let mut key = [0u32; NUM_SUITS];
        for (suit, slot) in key.iter_mut().enumerate() {
            *slot = pack(&self.owners[suit * NUM_RANKS..(suit + 1) * NUM_RANKS], DEAL_BASE);
        }
        DealKey(key)
    }

    /// Render as a PBN deal string starting from North, ranks high to low
    pub fn to_pbn(&self) -> String {
        let hands: Vec<String> = (0..NUM_SEATS).map(|seat| self.hand(seat).to_string()).collect();
        format!("{}:{}", seat_letter(NORTH), hands.join(" "))
    }
}

impl std::fmt::Debug for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for seat in 0..NUM_SEATS {
            write!(f, "{}: {} ", seat_letter(seat), self.hand(seat))?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pbn())
    }
}

impl std::str::FromStr for Deal {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Deal::from_pbn(s)
    }
}

/// Encode deal text straight to its key
pub fn encode_deal(text: &str) -> Result<DealKey, FormatError> {
    Ok(Deal::from_pbn(text)?.key())
}

/// Parse a single hand from PBN format (SHDC separated by dots)
fn parse_hand(s: &str) -> Result<Cards, FormatError> {
    let suits: Vec<&str> = s.split('.').collect();
    if suits.len() != NUM_SUITS {
        return Err(FormatError::SuitCount {
            found: suits.len(),
            hand: s.to_string(),
        });
    }

    let mut cards = Cards::new();
    for (suit, group) in suits.iter().enumerate() {
        for c in group.chars() {
            let rank = char_to_rank(c).ok_or_else(|| FormatError::InvalidRank {
                symbol: c,
                group: group.to_string(),
            })?;
            let card = card_of(suit, rank);
            if cards.have(card) {
                return Err(FormatError::DuplicateCard {
                    card: name_of(card),
                });
            }
            cards.add(card);
        }
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "N:JT987.752.A3.J65 AQ542..J52.AT732 .T9863.T8764.K94 K63.AKQJ4.KQ9.Q8";
    const SOLVER_DEAL: &str =
        "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    #[test]
    fn test_known_key() {
        let key = encode_deal(SAMPLE).expect("Should parse");
        assert_eq!(key, DealKey([24494087, 53250751, 4828063, 22552142]));
        assert_eq!(encode_deal(SAMPLE).unwrap(), key);

        let key = encode_deal(SOLVER_DEAL).unwrap();
        assert_eq!(key, DealKey([4812576, 24526473, 20174724, 48543870]));
    }

    #[test]
    fn test_owner_and_hands() {
        let deal = Deal::from_pbn(SOLVER_DEAL).unwrap();
        assert_eq!(deal.owner(card_of(SPADE, ACE)), NORTH);
        assert_eq!(deal.owner(card_of(HEART, ACE)), EAST);
        assert_eq!(deal.owner(card_of(CLUB, ACE)), SOUTH);
        assert_eq!(deal.owner(card_of(CLUB, QUEEN)), WEST);
        for seat in 0..NUM_SEATS {
            assert_eq!(deal.hand(seat).size(), 13);
        }
    }

    #[test]
    fn test_rank_order_within_group_is_irrelevant() {
        let shuffled = "N:78T9J.275.3A.56J AQ542..J52.AT732 .T9863.T8764.K94 K63.AKQJ4.KQ9.Q8";
        assert_eq!(encode_deal(shuffled).unwrap(), encode_deal(SAMPLE).unwrap());
    }

    #[test]
    fn test_seat_marker_does_not_rotate() {
        let east = SOLVER_DEAL.replacen('N', "E", 1);
        assert_eq!(encode_deal(&east).unwrap(), encode_deal(SOLVER_DEAL).unwrap());
    }

    #[test]
    fn test_unequal_hands_accepted() {
        let all_north = "N:AKQJT98765432.AKQJT98765432.AKQJT98765432.AKQJT98765432 ... ... ...";
        assert_eq!(encode_deal(all_north).unwrap(), DealKey([0; 4]));

        let all_west = "N:... ... ... AKQJT98765432.AKQJT98765432.AKQJT98765432.AKQJT98765432";
        assert_eq!(
            encode_deal(all_west).unwrap(),
            DealKey([MAX_DEAL_COMPONENT; 4])
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(encode_deal(""), Err(FormatError::Empty));
        assert!(matches!(
            encode_deal("AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::SeatMarker(_))
        ));
        assert!(matches!(
            encode_deal("N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863"),
            Err(FormatError::HandCount { found: 3, .. })
        ));
        assert!(matches!(
            encode_deal("N:AKQT3.J6.KJ42.95  652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::HandCount { found: 5, .. })
        ));
        assert!(matches!(
            encode_deal("N:AKQT3.J6.KJ4295 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::SuitCount { found: 3, .. })
        ));
        assert_eq!(
            encode_deal("N:AKQX3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::InvalidRank {
                symbol: 'X',
                group: "AKQX3".to_string()
            })
        );
        assert!(matches!(
            encode_deal("N:akqt3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::InvalidRank { symbol: 'a', .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_missing_cards() {
        // Spade ace twice in North's spades
        assert_eq!(
            encode_deal("N:AAKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"),
            Err(FormatError::DuplicateCard {
                card: "SA".to_string()
            })
        );
        // Spade ace held by North and West
        assert_eq!(
            encode_deal("N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 A98.873.9653.QJ72"),
            Err(FormatError::DuplicateCard {
                card: "SA".to_string()
            })
        );
        // Club two missing
        assert_eq!(
            encode_deal("N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ7"),
            Err(FormatError::IncompleteDeal { missing: 1 })
        );
    }

    #[test]
    fn test_to_pbn_roundtrip() {
        for pbn in [SAMPLE, SOLVER_DEAL] {
            let deal = Deal::from_pbn(pbn).unwrap();
            assert_eq!(deal.to_pbn(), pbn);
            assert_eq!(deal.to_string().parse::<Deal>().unwrap(), deal);
        }
    }

    #[test]
    fn test_key_decodes_to_same_deal() {
        let deal = Deal::from_pbn(SAMPLE).unwrap();
        let key = deal.key();
        assert!(key.is_valid());
        assert_eq!(key.to_deal(), Some(deal));
        assert_eq!(DealKey([MAX_DEAL_COMPONENT + 1, 0, 0, 0]).to_deal(), None);
    }

    #[test]
    fn test_from_hands() {
        let deal = Deal::from_pbn(SOLVER_DEAL).unwrap();
        let hands = [deal.hand(0), deal.hand(1), deal.hand(2), deal.hand(3)];
        assert_eq!(Deal::from_hands(hands), Ok(deal));

        let overlapping = [deal.hand(0), deal.hand(0), deal.hand(2), deal.hand(3)];
        assert!(matches!(
            Deal::from_hands(overlapping),
            Err(FormatError::DuplicateCard { .. })
        ));
    }
}
