//! Clamped-index lookup table
//!
//! Models a hardware ROM: a dense mapping over a contiguous signed key
//! range, addressed by a quantized input that is saturated to the table
//! bounds before the lookup. Out-of-range inputs therefore read the
//! boundary entry, never fault.

use crate::error::{KernelError, Result};

/// Immutable lookup table over a contiguous signed key range
#[derive(Debug, Clone)]
pub struct LookupTable {
    min_key: i32,
    values: Vec<i32>,
}

impl LookupTable {
    /// Build from an ordered list of (key, value) entries.
    ///
    /// Keys must be contiguous ascending integers; an empty entry list is
    /// the only failure, and it fails here rather than at lookup time.
    pub fn build(entries: &[(i32, i32)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(KernelError::IndexOutOfDomain);
        }

        let min_key = entries[0].0;
        let mut values = Vec::with_capacity(entries.len());
        for (offset, &(key, value)) in entries.iter().enumerate() {
            debug_assert_eq!(key, min_key + offset as i32, "table keys must be contiguous");
            values.push(value);
        }

        Ok(Self { min_key, values })
    }

    /// Smallest addressable key
    pub fn min_key(&self) -> i32 {
        self.min_key
    }

    /// Largest addressable key
    pub fn max_key(&self) -> i32 {
        self.min_key + self.values.len() as i32 - 1
    }

    /// Look up a quantized index, saturating to the table bounds.
    ///
    /// The raw index is i64 because callers hand in shifted wide
    /// accumulators; the clamp brings it back into the i32 key range.
    pub fn lookup(&self, raw_index: i64) -> i32 {
        let idx = raw_index.clamp(self.min_key as i64, self.max_key() as i64) as i32;
        self.values[(idx - self.min_key) as usize]
    }
}
