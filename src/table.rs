//! Paired key/value sequences built from a corpus
//!
//! Position `i` of `values` is the solved result for the deal whose key is
//! at position `i` of `keys`. Keys may repeat; order is corpus order.

use std::collections::HashMap;

use super::deal::DealKey;
use super::error::CorruptDataError;
use super::result::ResultValue;

/// Keys and values in corpus order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupTable {
    keys: Vec<DealKey>,
    values: Vec<ResultValue>,
}

impl LookupTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from parallel sequences of equal length
    pub fn from_parts(
        keys: Vec<DealKey>,
        values: Vec<ResultValue>,
    ) -> Result<Self, CorruptDataError> {
        if keys.len() != values.len() {
            return Err(CorruptDataError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self { keys, values })
    }

    pub(crate) fn push(&mut self, key: DealKey, value: ResultValue) {
        self.keys.push(key);
        self.values.push(value);
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get the record at a position
    pub fn get(&self, index: usize) -> Option<(DealKey, ResultValue)> {
        Some((*self.keys.get(index)?, *self.values.get(index)?))
    }

    pub fn keys(&self) -> &[DealKey] {
        &self.keys
    }

    pub fn values(&self) -> &[ResultValue] {
        &self.values
    }

    /// Iterate over records in corpus order
    pub fn iter(&self) -> impl Iterator<Item = (DealKey, ResultValue)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Build a hash index over the keys
    pub fn index(&self) -> TableIndex<'_> {
        let mut positions = HashMap::with_capacity(self.len());
        for (i, key) in self.keys.iter().enumerate() {
            positions.entry(*key).or_insert(i);
        }
        TableIndex {
            table: self,
            positions,
        }
    }

    pub fn into_parts(self) -> (Vec<DealKey>, Vec<ResultValue>) {
        (self.keys, self.values)
    }
}

/// Key lookup over a borrowed table; duplicate keys resolve to their first position
pub struct TableIndex<'a> {
    table: &'a LookupTable,
    positions: HashMap<DealKey, usize>,
}

impl TableIndex<'_> {
    /// Position of the first record with this key
    pub fn position(&self, key: &DealKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Value of the first record with this key
    pub fn get(&self, key: &DealKey) -> Option<&ResultValue> {
        self.position(key).map(|i| &self.table.values[i])
    }

    /// Number of distinct keys
    pub fn distinct(&self) -> usize {
        self.positions.len()
    }
}
