//! Double-dummy trick tables and their packed value
//!
//! A result row holds tricks for every (player, denomination) pair. Each
//! player's five counts pack into one base-16 integer, clubs most significant.

use serde::{Deserialize, Serialize};

use super::error::FormatError;
use super::packing::{pack, unpack, MAX_RESULT_COMPONENT, RESULT_BASE, RESULT_DIGITS};
use super::types::*;

const NUM_ENTRIES: usize = NUM_SEATS * NUM_DENOMINATIONS;

/// Canonical encoding of a trick table: one base-16 integer per player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultValue(pub [u32; NUM_SEATS]);

impl ResultValue {
    /// Get the packed tricks for one player
    #[inline]
    pub fn player(&self, seat: Seat) -> u32 {
        self.0[seat]
    }

    /// Check every component is below 16^5
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|&c| c <= MAX_RESULT_COMPONENT)
    }

    /// Decode back into a trick table
    pub fn to_row(&self) -> Result<ResultRow, FormatError> {
        let mut tricks = [[0u8; NUM_DENOMINATIONS]; NUM_SEATS];
        for (seat, &packed) in self.0.iter().enumerate() {
            if packed > MAX_RESULT_COMPONENT {
                return Err(FormatError::TricksOutOfRange(packed));
            }
            let digits = unpack::<RESULT_DIGITS>(packed, RESULT_BASE);
            if let Some(&bad) = digits.iter().find(|&&d| d as usize > TOTAL_TRICKS) {
                return Err(FormatError::TricksOutOfRange(u32::from(bad)));
            }
            tricks[seat] = digits;
        }
        Ok(ResultRow { tricks })
    }
}

impl std::fmt::Display for ResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [n, e, s, w] = self.0;
        write!(f, "[{n}, {e}, {s}, {w}]")
    }
}

/// Tricks per player (rows) and denomination (columns, C D H S NT)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ResultRow {
    tricks: [[u8; NUM_DENOMINATIONS]; NUM_SEATS],
}

impl ResultRow {
    /// Build from a trick table, checking each count is at most 13
    pub fn new(tricks: [[u8; NUM_DENOMINATIONS]; NUM_SEATS]) -> Result<Self, FormatError> {
        for &t in tricks.iter().flatten() {
            if t as usize > TOTAL_TRICKS {
                return Err(FormatError::TricksOutOfRange(u32::from(t)));
            }
        }
        Ok(ResultRow { tricks })
    }

    /// Parse 20 comma-separated counts, player-major
    /// Format: "3,4,3,3,2,10,9,10,10,11,2,4,3,3,2,9,9,10,10,11"
    pub fn from_text(s: &str) -> Result<Self, FormatError> {
        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() != NUM_ENTRIES {
            return Err(FormatError::TokenCount {
                found: tokens.len(),
            });
        }

        let mut tricks = [[0u8; NUM_DENOMINATIONS]; NUM_SEATS];
        for (i, token) in tokens.iter().enumerate() {
            tricks[i / NUM_DENOMINATIONS][i % NUM_DENOMINATIONS] = parse_tricks(token)?;
        }
        Ok(ResultRow { tricks })
    }

    /// Get tricks for a player in a denomination
    #[inline]
    pub fn tricks(&self, seat: Seat, denom: Denomination) -> u8 {
        self.tricks[seat][denom]
    }

    /// Get all five counts for a player
    #[inline]
    pub fn player(&self, seat: Seat) -> [u8; NUM_DENOMINATIONS] {
        self.tricks[seat]
    }

    /// Compute the canonical value
    pub fn value(&self) -> ResultValue {
        let mut value = [0u32; NUM_SEATS];
        for (slot, row) in value.iter_mut().zip(self.tricks.iter()) {
            *slot = pack(row, RESULT_BASE);
        }
        ResultValue(value)
    }

    /// Render as 20 comma-separated counts
    pub fn to_text(&self) -> String {
        self.tricks
            .iter()
            .flatten()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for ResultRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for denom in 0..NUM_DENOMINATIONS {
            write!(f, " {:>3}", denomination_name(denom))?;
        }
        for seat in 0..NUM_SEATS {
            writeln!(f)?;
            write!(f, "{} ", seat_letter(seat))?;
            for denom in 0..NUM_DENOMINATIONS {
                write!(f, " {:>3}", self.tricks[seat][denom])?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ResultRow {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultRow::from_text(s)
    }
}

/// Encode result text straight to its value
pub fn encode_result(text: &str) -> Result<ResultValue, FormatError> {
    Ok(ResultRow::from_text(text)?.value())
}

/// Parse one trick count token (plain decimal digits, 0..=13)
fn parse_tricks(token: &str) -> Result<u8, FormatError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidTricks(token.to_string()));
    }
    let value: u32 = token
        .parse()
        .map_err(|_| FormatError::InvalidTricks(token.to_string()))?;
    if value as usize > TOTAL_TRICKS {
        return Err(FormatError::TricksOutOfRange(value));
    }
    Ok(value as u8)
}
