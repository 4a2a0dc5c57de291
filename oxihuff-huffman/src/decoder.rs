//! Symbol decoders built from a [`CodeTable`].
//!
//! Both decoders consume exactly one code per call and fail on a bit pattern
//! that matches no code. They differ only in lookup structure.

use crate::code_table::{CodeTable, MAX_CODE_LENGTH};
use crate::config::DecodeStrategy;
use oxihuff_core::bitstream::MsbBitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::HashMap;

/// Decodes one symbol at a time from a bit reader.
pub(crate) trait SymbolDecoder {
    fn decode_symbol(&self, reader: &mut MsbBitReader<'_>) -> Result<u8>;
}

/// Build the decoder selected by `strategy`.
pub(crate) fn for_strategy(
    strategy: DecodeStrategy,
    table: &CodeTable,
) -> Result<Box<dyn SymbolDecoder>> {
    Ok(match strategy {
        DecodeStrategy::Table => Box::new(TableDecoder::new(table)),
        DecodeStrategy::Tree => Box::new(TreeDecoder::new(table)?),
    })
}

/// Per-length hash lookup of code values.
#[derive(Debug)]
pub(crate) struct TableDecoder {
    /// `by_length[len]` maps right-aligned code bits to the symbol.
    by_length: Vec<HashMap<u32, u8>>,
    min_len: u8,
    max_len: u8,
}

impl TableDecoder {
    pub(crate) fn new(table: &CodeTable) -> Self {
        let mut by_length = vec![HashMap::new(); MAX_CODE_LENGTH as usize + 1];
        for (symbol, code) in table.iter() {
            by_length[code.len() as usize].insert(code.bits(), symbol);
        }
        Self {
            by_length,
            min_len: table.min_code_length(),
            max_len: table.max_code_length(),
        }
    }
}

impl SymbolDecoder for TableDecoder {
    fn decode_symbol(&self, reader: &mut MsbBitReader<'_>) -> Result<u8> {
        let start = reader.bit_position();
        let mut code = 0u32;
        for len in 1..=self.max_len {
            code = (code << 1) | reader.read_bit()? as u32;
            if len < self.min_len {
                continue;
            }
            if let Some(&symbol) = self.by_length[len as usize].get(&code) {
                return Ok(symbol);
            }
        }
        Err(OxiHuffError::invalid_huffman(start))
    }
}

/// Child index 0 doubles as "no child": the root is never anyone's child.
const NO_CHILD: u32 = 0;

#[derive(Debug, Clone, Default)]
struct DecodeNode {
    children: [u32; 2],
    symbol: Option<u8>,
}

impl DecodeNode {
    fn has_children(&self) -> bool {
        self.children != [NO_CHILD; 2]
    }
}

/// Decode tree rebuilt from the codes, stored as an index arena.
#[derive(Debug)]
pub(crate) struct TreeDecoder {
    nodes: Vec<DecodeNode>,
}

impl TreeDecoder {
    pub(crate) fn new(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![DecodeNode::default()];

        for (symbol, code) in table.iter() {
            let mut current = 0usize;
            for bit in code.iter_bits() {
                if nodes[current].symbol.is_some() {
                    return Err(prefix_conflict(symbol));
                }
                let next = nodes[current].children[bit as usize];
                current = if next == NO_CHILD {
                    let index = nodes.len();
                    nodes.push(DecodeNode::default());
                    nodes[current].children[bit as usize] = index as u32;
                    index
                } else {
                    next as usize
                };
            }
            let leaf = &mut nodes[current];
            if leaf.symbol.is_some() || leaf.has_children() {
                return Err(prefix_conflict(symbol));
            }
            leaf.symbol = Some(symbol);
        }

        Ok(Self { nodes })
    }

    /// Number of arena nodes, root included.
    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn prefix_conflict(symbol: u8) -> OxiHuffError {
    OxiHuffError::malformed(
        0,
        format!("code for symbol {symbol:#04x} conflicts with another code"),
    )
}

impl SymbolDecoder for TreeDecoder {
    fn decode_symbol(&self, reader: &mut MsbBitReader<'_>) -> Result<u8> {
        let start = reader.bit_position();
        let mut current = 0usize;
        loop {
            let bit = reader.read_bit()?;
            let next = self.nodes[current].children[bit as usize];
            if next == NO_CHILD {
                return Err(OxiHuffError::invalid_huffman(start));
            }
            current = next as usize;
            if let Some(symbol) = self.nodes[current].symbol {
                return Ok(symbol);
            }
        }
    }
}
