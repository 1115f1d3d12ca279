//! Base-N positional packing of small digits into a `u32`
//!
//! The first digit is the most significant. All arithmetic is integer;
//! both encodings used here fit comfortably in 32 bits.

/// Base and digit count for one suit of a deal key (owner per rank)
pub const DEAL_BASE: u32 = 4;
pub const DEAL_DIGITS: usize = 13;

/// Base and digit count for one player of a result value (tricks per denomination)
pub const RESULT_BASE: u32 = 16;
pub const RESULT_DIGITS: usize = 5;

/// Largest deal key component: 4^13 - 1
pub const MAX_DEAL_COMPONENT: u32 = DEAL_BASE.pow(DEAL_DIGITS as u32) - 1;

/// Largest result value component: 16^5 - 1
pub const MAX_RESULT_COMPONENT: u32 = RESULT_BASE.pow(RESULT_DIGITS as u32) - 1;

/// Pack digits (most significant first) into a single integer.
///
/// Every digit must be below `base`, and `base^digits.len()` must fit in a `u32`.
#[inline]
pub fn pack(digits: &[u8], base: u32) -> u32 {
    digits.iter().fold(0u32, |acc, &d| {
        debug_assert!(u32::from(d) < base);
        acc * base + u32::from(d)
    })
}

/// Unpack an integer into `N` digits (most significant first).
///
/// Digits beyond `N` are discarded, so callers range-check first.
#[inline]
pub fn unpack<const N: usize>(mut value: u32, base: u32) -> [u8; N] {
    let mut digits = [0u8; N];
    for slot in digits.iter_mut().rev() {
        *slot = (value % base) as u8;
        value /= base;
    }
    digits
}
