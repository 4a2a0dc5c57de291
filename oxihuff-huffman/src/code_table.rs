//! Symbol to code mapping and its fixed-record serialization.
//!
//! # Wire format
//!
//! All integers are little-endian.
//!
//! ```text
//! [entry_count: u32]
//! entry_count x {
//!     symbol:      u8
//!     code_length: u8    (1-32)
//!     code_bits:   u32   (code left-aligned, zero-padded on the right)
//! }
//! ```
//!
//! Records are written in ascending symbol order. The layout does not depend
//! on the shape of the tree that produced the codes, and every record has the
//! same size, so all 256 byte values are representable without escaping.

use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::wire::FieldReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Longest code the fixed-width code field can hold.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Size of the entry count field.
pub const COUNT_FIELD_SIZE: usize = 4;

/// Size of one serialized entry.
pub const RECORD_SIZE: usize = 6;

/// A Huffman code: `len` bits stored right-aligned in `bits`, first bit most
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u32,
    len: u8,
}

impl Code {
    /// Create a code from its right-aligned bits and length.
    ///
    /// Returns `None` if `len` is outside 1-32 or `bits` has set bits above
    /// `len`.
    pub fn new(bits: u32, len: u8) -> Option<Self> {
        if !(1..=MAX_CODE_LENGTH).contains(&len) {
            return None;
        }
        if len < 32 && bits >> len != 0 {
            return None;
        }
        Some(Self { bits, len })
    }

    /// Parse a code from a string of `0` and `1` characters.
    pub fn from_bits_str(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > MAX_CODE_LENGTH as usize {
            return None;
        }
        let mut bits = 0u32;
        for c in s.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return None,
            };
            bits = (bits << 1) | bit;
        }
        Self::new(bits, s.len() as u8)
    }

    /// Recover a code from its left-aligned wire field.
    ///
    /// Returns `None` if `len` is invalid or any bit past `len` is set.
    pub fn from_padded(field: u32, len: u8) -> Option<Self> {
        if !(1..=MAX_CODE_LENGTH).contains(&len) {
            return None;
        }
        let pad = 32 - len as u32;
        let low_mask = ((1u64 << pad) - 1) as u32;
        if field & low_mask != 0 {
            return None;
        }
        let bits = ((field as u64) >> pad) as u32;
        Some(Self { bits, len })
    }

    /// Right-aligned code bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Code length in bits.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Code left-aligned in a 32-bit field, as stored on the wire.
    pub fn padded(&self) -> u32 {
        ((self.bits as u64) << (32 - self.len as u32)) as u32
    }

    /// The `i`-th bit, counting from the root of the tree, or `None` past
    /// the end of the code.
    pub fn bit(&self, i: u8) -> Option<bool> {
        let shift = self.len.checked_sub(1)?.checked_sub(i)?;
        Some((self.bits >> shift) & 1 == 1)
    }

    /// Bits from first to last.
    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(|i| self.bit(i))
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// Key that orders codes lexicographically as bit strings.
    fn lex_key(&self) -> (u32, u8) {
        (self.padded(), self.len)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(symbol, code)` pairs, rejecting duplicate symbols
    /// and code sets that are not prefix-free.
    pub fn from_codes<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut table = Self::new();
        for (symbol, code) in pairs {
            if table.insert(symbol, code).is_some() {
                return Err(OxiHuffError::malformed(
                    0,
                    format!("duplicate code for symbol {symbol:#04x}"),
                ));
            }
        }
        if !table.is_prefix_free() {
            return Err(OxiHuffError::malformed(0, "codes are not prefix-free"));
        }
        Ok(table)
    }

    pub(crate) fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Longest code length, 0 for an empty table.
    pub fn max_code_length(&self) -> u8 {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Shortest code length, 0 for an empty table.
    pub fn min_code_length(&self) -> u8 {
        self.codes.values().map(Code::len).min().unwrap_or(0)
    }

    /// Whether no code is a prefix of another.
    ///
    /// In lexicographic order a code that prefixes any other code also
    /// prefixes its immediate successor, so adjacent pairs suffice.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<Code> = self.codes.values().copied().collect();
        sorted.sort_unstable_by_key(Code::lex_key);
        sorted.windows(2).all(|w| !w[0].is_prefix_of(&w[1]))
    }

    /// Exact payload length in bits for an input with these frequencies, or
    /// `None` if some symbol has no code or the total overflows `u64`.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> Option<u64> {
        freq.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self.get(symbol)?;
            acc.checked_add(count.checked_mul(code.len() as u64)?)
        })
    }

    /// Serialized size in bytes.
    pub fn serialized_len(&self) -> usize {
        COUNT_FIELD_SIZE + self.len() * RECORD_SIZE
    }

    /// Serialize into a new buffer.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut out);
        out
    }

    /// Append the serialized table to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.len() as u32).to_le_bytes());
        for (symbol, code) in self.iter() {
            out.push(symbol);
            out.push(code.len());
            out.extend_from_slice(&code.padded().to_le_bytes());
        }
    }

    /// Parse a table from the start of `bytes`, returning it together with
    /// the number of bytes consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = FieldReader::new(bytes);
        let table = Self::read_from(&mut reader)?;
        Ok((table, reader.consumed()))
    }

    pub(crate) fn read_from(reader: &mut FieldReader<'_>) -> Result<Self> {
        let table_offset = reader.offset();
        let count = reader.u32("code table entry count")? as usize;

        let needed = count.saturating_mul(RECORD_SIZE);
        if needed > reader.remaining() {
            return Err(OxiHuffError::malformed(
                table_offset,
                format!(
                    "entry count {count} implies {needed} bytes of records but only {} remain",
                    reader.remaining()
                ),
            ));
        }
        if count > ALPHABET_SIZE {
            return Err(OxiHuffError::malformed(
                table_offset,
                format!("entry count {count} exceeds the {ALPHABET_SIZE} possible symbols"),
            ));
        }

        let mut table = Self::new();
        for _ in 0..count {
            let record_offset = reader.offset();
            let symbol = reader.u8("code table symbol")?;
            let len = reader.u8("code length")?;
            let field = reader.u32("code bits")?;

            if !(1..=MAX_CODE_LENGTH).contains(&len) {
                return Err(OxiHuffError::malformed(
                    record_offset + 1,
                    format!("code length {len} for symbol {symbol:#04x} outside 1-{MAX_CODE_LENGTH}"),
                ));
            }
            let code = Code::from_padded(field, len).ok_or_else(|| {
                OxiHuffError::malformed(
                    record_offset + 2,
                    format!("code field for symbol {symbol:#04x} has bits set past length {len}"),
                )
            })?;
            if table.insert(symbol, code).is_some() {
                return Err(OxiHuffError::malformed(
                    record_offset,
                    format!("duplicate code for symbol {symbol:#04x}"),
                ));
            }
        }

        if !table.is_prefix_free() {
            return Err(OxiHuffError::malformed(
                table_offset,
                "codes are not prefix-free",
            ));
        }

        Ok(table)
    }
}
