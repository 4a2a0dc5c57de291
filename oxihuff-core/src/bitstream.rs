//! MSB-first bit packing for Huffman payloads.
//!
//! Bits are packed from the most significant bit of each byte downwards. The
//! final byte may be only partially used; its low-order bits are zero padding
//! and the number of meaningful bits in it (the "usable" count) travels with
//! the bytes so the reader knows exactly where the data ends.
//!
//! | Payload          | usable bits in last byte |
//! |------------------|--------------------------|
//! | empty            | 0                        |
//! | ends mid-byte    | 1-7                      |
//! | ends on boundary | 8                        |
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.usable_bits, 7);
//!
//! let mut reader = MsbBitReader::new(&packed.bytes, packed.usable_bits).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert!(reader.is_exhausted());
//! ```

use crate::error::{OxiHuffError, Result};

/// Widest value accepted by [`MsbBitWriter::write_bits`] and
/// [`MsbBitReader::read_bits`].
pub const MAX_BITS_PER_CALL: u8 = 32;

/// Packed bytes plus the count of meaningful bits in the last byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes, MSB-first.
    pub bytes: Vec<u8>,
    /// Meaningful bits in the last byte: 0 for an empty payload, else 1-8.
    pub usable_bits: u8,
}

impl PackedBits {
    /// Total number of meaningful bits.
    pub fn bit_len(&self) -> u64 {
        usable_bit_len(self.bytes.len(), self.usable_bits)
    }

    /// Whether no bits were packed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn usable_bit_len(byte_len: usize, usable_bits: u8) -> u64 {
    if byte_len == 0 {
        0
    } else {
        (byte_len as u64 - 1) * 8 + usable_bits as u64
    }
}

/// Check that a usable-bit count is consistent with the payload length.
pub fn validate_usable_bits(byte_len: usize, usable_bits: u8) -> Result<()> {
    let valid = if byte_len == 0 {
        usable_bits == 0
    } else {
        (1..=8).contains(&usable_bits)
    };
    if valid {
        Ok(())
    } else {
        Err(OxiHuffError::InvalidBitCount(usable_bits))
    }
}

/// MSB-first bit writer accumulating into an in-memory buffer.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Pending bits, right-aligned.
    buffer: u64,
    /// Number of pending bits (always below 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl MsbBitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits.
    pub fn with_capacity(bits: u64) -> Self {
        Self {
            output: Vec::with_capacity(bits.div_ceil(8) as usize),
            ..Self::default()
        }
    }

    /// Total bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    #[inline]
    fn flush_bytes(&mut self) {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer = (self.buffer << 1) | bit as u64;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;
        if self.bits_in_buffer == 8 {
            self.flush_bytes();
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count > MAX_BITS_PER_CALL {
            return Err(OxiHuffError::InvalidBitCount(count));
        }
        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;
        self.flush_bytes();

        Ok(())
    }

    /// Pad the final byte with zeros and return the packed result.
    pub fn finish(mut self) -> PackedBits {
        let usable_bits = if self.bits_in_buffer > 0 {
            let used = self.bits_in_buffer;
            let byte = (self.buffer << (8 - used)) as u8;
            self.output.push(byte);
            used
        } else if self.output.is_empty() {
            0
        } else {
            8
        };

        PackedBits {
            bytes: self.output,
            usable_bits,
        }
    }
}

/// MSB-first bit reader that stops at the last usable bit.
#[derive(Debug, Clone)]
pub struct MsbBitReader<'a> {
    /// Packed input.
    data: &'a [u8],
    /// Number of meaningful bits in `data`.
    total_bits: u64,
    /// Next bit to read.
    position: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader over `data`, of which only the top `usable_bits` bits
    /// of the final byte are meaningful.
    pub fn new(data: &'a [u8], usable_bits: u8) -> Result<Self> {
        validate_usable_bits(data.len(), usable_bits)?;
        Ok(Self {
            data,
            total_bits: usable_bit_len(data.len(), usable_bits),
            position: 0,
        })
    }

    /// Current bit position.
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Number of meaningful bits in the stream.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// Bits left before the end of the meaningful data.
    pub fn remaining(&self) -> u64 {
        self.total_bits - self.position
    }

    /// Whether every meaningful bit has been read.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.total_bits
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.total_bits {
            return Err(OxiHuffError::unexpected_eof(self.position));
        }
        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8) as u8;
        self.position += 1;
        Ok((byte >> shift) & 1 == 1)
    }

    /// Read `count` bits (0-32), first bit read ending up most significant.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        if count > MAX_BITS_PER_CALL {
            return Err(OxiHuffError::InvalidBitCount(count));
        }
        if (count as u64) > self.remaining() {
            return Err(OxiHuffError::unexpected_eof(self.total_bits));
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }
}

/// Pack a bit sequence MSB-first.
pub fn pack(bits: &[bool]) -> PackedBits {
    let mut writer = MsbBitWriter::with_capacity(bits.len() as u64);
    for &bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Unpack bytes produced by [`pack`] back into the original bit sequence.
pub fn unpack(bytes: &[u8], usable_bits: u8) -> Result<Vec<bool>> {
    let mut reader = MsbBitReader::new(bytes, usable_bits)?;
    let mut bits = Vec::with_capacity(reader.total_bits() as usize);
    while !reader.is_exhausted() {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}
