//! Error types for deal/result parsing, corpus records and table artifacts.

use thiserror::Error;

/// Malformed deal or result text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty deal")]
    Empty,

    #[error("deal must start with a seat marker like 'N:', got '{0}'")]
    SeatMarker(String),

    #[error("expected 4 hands separated by single spaces, found {found} in '{text}'")]
    HandCount { found: usize, text: String },

    #[error("expected 4 suit groups in hand '{hand}', found {found}")]
    SuitCount { found: usize, hand: String },

    #[error("invalid rank symbol '{symbol}' in suit group '{group}'")]
    InvalidRank { symbol: char, group: String },

    #[error("card {card} assigned more than once")]
    DuplicateCard { card: String },

    #[error("incomplete deal: {missing} card(s) unassigned")]
    IncompleteDeal { missing: usize },

    #[error("expected 20 comma-separated trick counts, found {found}")]
    TokenCount { found: usize },

    #[error("invalid trick count '{0}'")]
    InvalidTricks(String),

    #[error("trick count {0} out of range 0..=13")]
    TricksOutOfRange(u32),
}

/// What went wrong with a single corpus line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    #[error("expected '<deal>\\t<result>', found {fields} tab-separated field(s)")]
    MissingSeparator { fields: usize },

    #[error("invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// A corpus line that could not be converted, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {fault}")]
pub struct RecordError {
    pub line: usize,
    pub fault: RecordFault,
}

impl RecordError {
    pub fn new(line: usize, fault: impl Into<RecordFault>) -> Self {
        Self {
            line,
            fault: fault.into(),
        }
    }
}

/// A persisted table that cannot be read back into keys and values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptDataError {
    #[error("not a deal table artifact (bad magic)")]
    BadMagic,

    #[error("unsupported artifact version {0}")]
    UnsupportedVersion(u32),

    #[error("artifact truncated")]
    Truncated,

    #[error("unexpected trailing bytes after {count} records")]
    TrailingBytes { count: u64 },

    #[error("key/value length mismatch: {keys} keys, {values} values")]
    LengthMismatch { keys: usize, values: usize },

    #[error("record {index}: component {component} out of range")]
    OutOfRange { index: usize, component: u32 },

    #[error("reloaded table differs from the saved one at record {index}")]
    Mismatch { index: usize },

    #[error("artifact decode: {0}")]
    Decode(String),
}

/// Top-level error for building, saving and loading tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("corrupt table: {0}")]
    Corrupt(#[from] CorruptDataError),

    #[error("table I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
