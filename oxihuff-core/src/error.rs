//! Error types for OxiHuff operations.
//!
//! Every encode or decode call either succeeds completely or returns one of
//! these errors. Nothing is retried and no partial output is handed back.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container bytes do not describe a valid container.
    #[error("Malformed container at offset {offset}: {message}")]
    MalformedContainer {
        /// Byte offset where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },

    /// A generated code does not fit the fixed-width code field.
    #[error("Code for symbol {symbol:#04x} needs {length} bits, maximum is {max}")]
    UnrepresentableCodeLength {
        /// Symbol whose code is too long.
        symbol: u8,
        /// Length the code would need.
        length: usize,
        /// Maximum representable length.
        max: u8,
    },

    /// Input or payload length does not fit the container's 32-bit fields.
    #[error("Input too large: {len} exceeds the limit of {max}")]
    InputTooLarge {
        /// Actual length.
        len: u64,
        /// Largest supported length.
        max: u64,
    },

    /// Symbol weights are too large to sum while building the tree.
    #[error("Combined symbol weight overflows: {left} + {right}")]
    WeightOverflow {
        /// Weight of the first subtree.
        left: u64,
        /// Weight of the second subtree.
        right: u64,
    },

    /// The bit sequence does not match any code in the table.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// The bit reader ran out of usable bits.
    #[error("Unexpected end of bitstream at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// A bit count outside the supported range.
    #[error("Invalid bit count: {0}")]
    InvalidBitCount(u8),

    /// Decompressed output would exceed the configured limit.
    #[error("Output size {size} exceeds limit of {limit} bytes")]
    OutputLimitExceeded {
        /// Size the output would reach.
        size: u64,
        /// Configured limit.
        limit: u64,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a malformed container error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            offset,
            message: message.into(),
        }
    }

    /// Create an unrepresentable code length error.
    pub fn unrepresentable_code(symbol: u8, length: usize, max: u8) -> Self {
        Self::UnrepresentableCodeLength {
            symbol,
            length,
            max,
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(len: u64, max: u64) -> Self {
        Self::InputTooLarge { len, max }
    }

    /// Create a weight overflow error.
    pub fn weight_overflow(left: u64, right: u64) -> Self {
        Self::WeightOverflow { left, right }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Create an output limit error.
    pub fn output_limit(size: u64, limit: u64) -> Self {
        Self::OutputLimitExceeded { size, limit }
    }

    /// Whether the error means the container itself is corrupt, as opposed to
    /// an I/O failure or a limit imposed by the caller.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedContainer { .. }
                | Self::InvalidHuffmanCode { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
