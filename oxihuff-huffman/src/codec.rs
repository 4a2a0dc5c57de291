//! Huffman encoder and decoder.

use crate::code_table::CodeTable;
use crate::config::HuffConfig;
use crate::container::Container;
use crate::decoder::for_strategy;
use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::tree::HuffmanTree;
use oxihuff_core::bitstream::{MsbBitReader, MsbBitWriter, PackedBits};
use oxihuff_core::error::{OxiHuffError, Result};
use tracing::debug;

/// Largest input the 32-bit symbol count can describe.
pub const MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// Builds an optimal prefix code for an input and encodes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanEncoder;

impl HuffmanEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode `data` into a container.
    ///
    /// Empty input yields [`Container::empty`]. Fails with
    /// [`OxiHuffError::InputTooLarge`] if the input or its payload exceeds
    /// what the 32-bit length fields can hold, and with
    /// [`OxiHuffError::UnrepresentableCodeLength`] if the optimal code for
    /// some symbol is longer than 32 bits.
    pub fn encode(&self, data: &[u8]) -> Result<Container> {
        let original_len = u32::try_from(data.len())
            .map_err(|_| OxiHuffError::input_too_large(data.len() as u64, MAX_INPUT_SIZE))?;

        let freq = FrequencyTable::count(data);
        let Some(tree) = HuffmanTree::build(&freq)? else {
            debug!("empty input, writing empty container");
            return Ok(Container::empty());
        };
        let table = tree.codes()?;

        let payload_bits = table.encoded_bits(&freq).ok_or_else(|| {
            OxiHuffError::malformed(0, "payload length cannot be computed from the code table")
        })?;
        let payload_bytes = payload_bits.div_ceil(8);
        if payload_bytes > MAX_INPUT_SIZE {
            return Err(OxiHuffError::input_too_large(payload_bytes, MAX_INPUT_SIZE));
        }

        let packed = write_payload(data, &table, payload_bits)?;
        debug!(
            input = data.len(),
            symbols = table.len(),
            max_code_length = table.max_code_length(),
            payload_bits,
            "encoded input"
        );
        Container::from_parts(original_len, table, packed)
    }
}

fn write_payload(
    data: &[u8],
    table: &CodeTable,
    payload_bits: u64,
) -> Result<PackedBits> {
    // Flat (bits, len) lookup keeps the hot loop free of map access.
    let mut lookup = [(0u32, 0u8); ALPHABET_SIZE];
    for (symbol, code) in table.iter() {
        lookup[symbol as usize] = (code.bits(), code.len());
    }

    let mut writer = MsbBitWriter::with_capacity(payload_bits);
    for &byte in data {
        let (bits, len) = lookup[byte as usize];
        writer.write_bits(bits, len)?;
    }
    Ok(writer.finish())
}

/// Reconstructs the original bytes from a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecoder {
    config: HuffConfig,
}

impl HuffmanDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self { config }
    }

    /// Decoder configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Decode exactly `original_len` symbols from the container's payload.
    ///
    /// Bits left over after the last symbol mean the container is corrupt.
    pub fn decode(&self, container: &Container) -> Result<Vec<u8>> {
        let count = container.original_len() as u64;
        if let Some(limit) = self.config.max_output_size {
            if count > limit as u64 {
                return Err(OxiHuffError::output_limit(count, limit as u64));
            }
        }

        let mut reader = MsbBitReader::new(container.payload(), container.usable_bits())?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let decoder = for_strategy(self.config.decode_strategy, container.table())?;
        let mut output = Vec::with_capacity(count as usize);
        for _ in 0..count {
            output.push(decoder.decode_symbol(&mut reader)?);
        }

        if !reader.is_exhausted() {
            return Err(OxiHuffError::malformed(
                container.payload_offset() as u64 + reader.bit_position() / 8,
                format!(
                    "{} payload bits left after the last symbol",
                    reader.remaining()
                ),
            ));
        }

        debug!(
            output = output.len(),
            strategy = %self.config.decode_strategy,
            "decoded container"
        );
        Ok(output)
    }

    /// Parse and decode a serialized container.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let container = Container::from_bytes(data)?;
        self.decode(&container)
    }
}
