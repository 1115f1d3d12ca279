//! Double-dummy lookup tables - compact keys for bridge deals and their trick tables
//!
//! A deal (52 cards among four seats) packs into a [`DealKey`] of four
//! base-4 integers, one per suit. A double-dummy trick table packs into a
//! [`ResultValue`] of four base-16 integers, one per player. A corpus of
//! `<deal>\t<tricks>` lines builds into a [`LookupTable`] of parallel keys
//! and values that can be persisted and reloaded byte-for-byte.
//!
//! # Example
//!
//! ```
//! use dd_table::{encode_deal, encode_result, BuildConfig, TableBuilder};
//!
//! let deal = "N:JT987.752.A3.J65 AQ542..J52.AT732 .T9863.T8764.K94 K63.AKQJ4.KQ9.Q8";
//! let tricks = "3,4,3,3,2,10,9,10,10,11,2,4,3,3,2,9,9,10,10,11";
//!
//! let key = encode_deal(deal).unwrap();
//! assert_eq!(key.0, [24494087, 53250751, 4828063, 22552142]);
//! assert_eq!(encode_result(tricks).unwrap().0, [213810, 694955, 148274, 629419]);
//!
//! let corpus = format!("{deal}\t{tricks}\n");
//! let table = TableBuilder::new(BuildConfig::default())
//!     .build(corpus.as_bytes())
//!     .unwrap();
//! let index = table.index();
//! assert_eq!(index.get(&key).unwrap().0[0], 213810);
//! ```

pub mod builder;
pub mod cards;
mod convert;
pub mod corpus;
pub mod deal;
mod error;
pub mod packing;
pub mod persist;
pub mod result;
pub mod table;
pub mod types;

pub use builder::{BuildConfig, BuildReport, FailurePolicy, TableBuilder};
pub use cards::Cards;
pub use convert::{direction_to_seat, seat_to_direction};
pub use corpus::{format_record, parse_record, parse_record_bytes, write_corpus, CorpusError, TricksSolver};
pub use deal::{encode_deal, Deal, DealKey};
pub use error::{CorruptDataError, FormatError, RecordError, RecordFault, Result, TableError};
pub use persist::{load, load_file, save, save_file, verify_file};
pub use result::{encode_result, ResultRow, ResultValue};
pub use table::{LookupTable, TableIndex};
pub use types::{Denomination, Rank, Seat, Suit, NUM_DENOMINATIONS, NUM_RANKS, NUM_SEATS, NUM_SUITS};
pub use types::{CLUB, DIAMOND, HEART, SPADE};
pub use types::{CLUBS, DIAMONDS, HEARTS, NOTRUMP, SPADES};
pub use types::{EAST, NORTH, SOUTH, WEST};
