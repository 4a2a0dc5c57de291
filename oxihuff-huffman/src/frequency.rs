//! Symbol frequency counting.

/// Number of distinct symbols (byte values).
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for each byte value present in an input.
///
/// The table is sparse from the caller's point of view: symbols that never
/// occur are absent, so [`get`](Self::get) returns `None` for them and
/// [`iter`](Self::iter) skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    distinct: usize,
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            distinct: 0,
            total: 0,
        }
    }
}

impl FrequencyTable {
    /// Count every byte of `data` in one pass.
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self::from_array(counts)
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate; zero counts are dropped.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        for (symbol, count) in pairs {
            let slot = &mut counts[symbol as usize];
            *slot = slot.saturating_add(count);
        }
        Self::from_array(counts)
    }

    fn from_array(counts: [u64; ALPHABET_SIZE]) -> Self {
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        let total = counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c));
        Self {
            counts,
            distinct,
            total,
        }
    }

    /// Occurrence count of `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether no symbol occurs.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }
}
