//! The persisted compression artifact.
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! [original_symbol_count: u32]
//! [code table]                    see crate::code_table
//! [usable_bits_in_last_byte: u8]  0 for an empty payload, else 1-8
//! [payload_byte_count: u32]
//! payload_byte_count x byte       codes packed MSB-first
//! ```
//!
//! The explicit symbol count tells the decoder when to stop, so a
//! single-symbol input (whose one-bit code carries no length information)
//! decodes to the right number of repetitions and padding bits are never
//! read as data.

use crate::code_table::CodeTable;
use crate::wire::FieldReader;
use oxihuff_core::bitstream::{PackedBits, validate_usable_bits};
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::Write;

/// Size of the `original_symbol_count` field.
const SYMBOL_COUNT_SIZE: usize = 4;
/// Size of the usable-bits and payload length fields.
const PAYLOAD_HEADER_SIZE: usize = 1 + 4;

/// Parsed or freshly encoded container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    original_len: u32,
    table: CodeTable,
    usable_bits: u8,
    payload: Vec<u8>,
}

impl Container {
    /// Container for an empty input.
    pub fn empty() -> Self {
        Self {
            original_len: 0,
            table: CodeTable::new(),
            usable_bits: 0,
            payload: Vec::new(),
        }
    }

    /// Assemble a container, checking that the parts agree with each other.
    pub fn from_parts(original_len: u32, table: CodeTable, packed: PackedBits) -> Result<Self> {
        let container = Self {
            original_len,
            table,
            usable_bits: packed.usable_bits,
            payload: packed.bytes,
        };
        container
            .consistency_problem()
            .map_or(Ok(container), |message| Err(OxiHuffError::malformed(0, message)))
    }

    /// Number of symbols (bytes) in the original input.
    pub fn original_len(&self) -> u32 {
        self.original_len
    }

    /// Code table.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Meaningful bits in the last payload byte.
    pub fn usable_bits(&self) -> u8 {
        self.usable_bits
    }

    /// Packed payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Number of meaningful payload bits.
    pub fn payload_bits(&self) -> u64 {
        if self.payload.is_empty() {
            0
        } else {
            (self.payload.len() as u64 - 1) * 8 + self.usable_bits as u64
        }
    }

    /// Byte offset of the payload within the serialized container.
    pub fn payload_offset(&self) -> usize {
        SYMBOL_COUNT_SIZE + self.table.serialized_len() + PAYLOAD_HEADER_SIZE
    }

    /// Size of the serialized container.
    pub fn encoded_len(&self) -> usize {
        self.payload_offset() + self.payload.len()
    }

    /// Describe the first inconsistency between the fields, if any.
    fn consistency_problem(&self) -> Option<String> {
        if validate_usable_bits(self.payload.len(), self.usable_bits).is_err() {
            return Some(format!(
                "usable bit count {} invalid for a {}-byte payload",
                self.usable_bits,
                self.payload.len()
            ));
        }
        if (self.original_len == 0) != self.table.is_empty() {
            return Some(format!(
                "symbol count {} disagrees with a {}-entry code table",
                self.original_len,
                self.table.len()
            ));
        }

        let symbols = self.original_len as u64;
        let bits = self.payload_bits();
        let min_bits = symbols * self.table.min_code_length() as u64;
        let max_bits = symbols * self.table.max_code_length() as u64;
        if bits < min_bits || bits > max_bits {
            return Some(format!(
                "{bits} payload bits cannot hold {symbols} symbols with codes of {}-{} bits",
                self.table.min_code_length(),
                self.table.max_code_length()
            ));
        }
        None
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.original_len.to_le_bytes());
        self.table.write_to(&mut out);
        out.push(self.usable_bits);
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Serialize to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Parse a complete container. Trailing bytes are rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(data);

        let original_len = reader.u32("original symbol count")?;
        let table = CodeTable::read_from(&mut reader)?;
        let usable_offset = reader.offset();
        let usable_bits = reader.u8("usable bit count")?;
        let payload_len = reader.u32("payload byte count")? as usize;
        let payload = reader.bytes(payload_len, "payload")?.to_vec();

        if reader.remaining() > 0 {
            return Err(OxiHuffError::malformed(
                reader.offset(),
                format!("{} trailing bytes after payload", reader.rest().len()),
            ));
        }

        let container = Self {
            original_len,
            table,
            usable_bits,
            payload,
        };
        match container.consistency_problem() {
            Some(message) => Err(OxiHuffError::malformed(usable_offset, message)),
            None => Ok(container),
        }
    }

    /// Size and code statistics.
    pub fn stats(&self) -> CompressionStats {
        CompressionStats {
            original_size: self.original_len as u64,
            compressed_size: self.encoded_len() as u64,
            payload_bits: self.payload_bits(),
            distinct_symbols: self.table.len(),
            max_code_length: self.table.max_code_length(),
        }
    }
}

/// Summary of one compression result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Input size in bytes.
    pub original_size: u64,
    /// Serialized container size in bytes.
    pub compressed_size: u64,
    /// Meaningful payload bits.
    pub payload_bits: u64,
    /// Number of code table entries.
    pub distinct_symbols: usize,
    /// Longest code in bits.
    pub max_code_length: u8,
}

impl CompressionStats {
    /// Container size divided by input size (1.0 for empty input).
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.original_size as f64
        }
    }

    /// Space savings as a percentage (negative when the container is larger).
    pub fn space_savings(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            (1.0 - self.compression_ratio()) * 100.0
        }
    }

    /// Average payload bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.original_size as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::Code;
    use oxihuff_core::bitstream::pack;

    fn two_symbol_container() -> Container {
        let table = CodeTable::from_codes([
            (b'a', Code::from_bits_str("0").unwrap()),
            (b'b', Code::from_bits_str("1").unwrap()),
        ])
        .unwrap();
        // "abba"
        let packed = pack(&[false, true, true, false]);
        Container::from_parts(4, table, packed).unwrap()
    }

    #[test]
    fn test_empty_layout() {
        let bytes = Container::empty().to_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Container::from_bytes(&bytes).unwrap(), Container::empty());
    }

    #[test]
    fn test_layout() {
        let container = two_symbol_container();
        let bytes = container.to_bytes();
        assert_eq!(
            bytes,
            vec![
                4, 0, 0, 0, // original symbol count
                2, 0, 0, 0, // entry count
                b'a', 1, 0, 0, 0, 0x00, //
                b'b', 1, 0, 0, 0, 0x80, //
                4,    // usable bits
                1, 0, 0, 0, // payload length
                0b0110_0000,
            ]
        );
        assert_eq!(bytes.len(), container.encoded_len());
        assert_eq!(container.payload_offset(), 25);
        assert_eq!(Container::from_bytes(&bytes).unwrap(), container);
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = two_symbol_container().to_bytes();
        let err = Container::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, OxiHuffError::MalformedContainer { offset: 25, .. }));
    }

    #[test]
    fn test_every_truncation_is_malformed() {
        let bytes = two_symbol_container().to_bytes();
        for len in 0..bytes.len() {
            assert!(
                matches!(
                    Container::from_bytes(&bytes[..len]),
                    Err(OxiHuffError::MalformedContainer { .. })
                ),
                "prefix of {len} bytes"
            );
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = two_symbol_container().to_bytes();
        bytes.push(0);
        let err = Container::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_bad_usable_bits() {
        let mut bytes = two_symbol_container().to_bytes();
        bytes[20] = 0;
        assert!(Container::from_bytes(&bytes).is_err());
        bytes[20] = 9;
        assert!(Container::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_symbol_count_must_fit_payload() {
        let mut bytes = two_symbol_container().to_bytes();
        // 4 payload bits cannot hold 5 one-bit symbols.
        bytes[0] = 5;
        assert!(Container::from_bytes(&bytes).is_err());
        // Nor can they be only 3 one-bit symbols.
        bytes[0] = 3;
        assert!(Container::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_symbol_count_without_table() {
        let mut bytes = Container::empty().to_bytes();
        bytes[0] = 1;
        assert!(Container::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_huge_payload_length_is_rejected() {
        let mut bytes = Container::empty().to_bytes();
        bytes[9..13].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = Container::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, OxiHuffError::MalformedContainer { offset: 13, .. }));
    }

    #[test]
    fn test_stats() {
        let stats = two_symbol_container().stats();
        assert_eq!(stats.original_size, 4);
        assert_eq!(stats.compressed_size, 26);
        assert_eq!(stats.payload_bits, 4);
        assert_eq!(stats.distinct_symbols, 2);
        assert_eq!(stats.max_code_length, 1);
        assert!((stats.bits_per_symbol() - 1.0).abs() < f64::EPSILON);
        assert!(stats.space_savings() < 0.0);

        let empty = Container::empty().stats();
        assert_eq!(empty.compression_ratio(), 1.0);
        assert_eq!(empty.space_savings(), 0.0);
    }
}
