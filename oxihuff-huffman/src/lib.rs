//! # OxiHuff-Huffman: Pure Rust Huffman Compression
//!
//! Byte-oriented Huffman coding with a self-describing, binary-safe
//! container.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Binary-safe**: every byte value 0x00-0xFF round-trips, the code table
//!   is a fixed-record binary layout rather than delimited text
//! - **Exact length**: the container carries the original symbol count, so
//!   single-symbol inputs decode correctly and padding is never misread
//! - **Strict parsing**: truncated, inconsistent or trailing data is
//!   rejected as [`OxiHuffError::MalformedContainer`]
//!
//! ## Pipeline
//!
//! ```text
//! encode: bytes -> FrequencyTable -> HuffmanTree -> CodeTable -> MsbBitWriter -> Container
//! decode: Container -> CodeTable -> SymbolDecoder (table or tree) -> bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! Working with the container directly:
//!
//! ```rust
//! use oxihuff_huffman::{decode, encode};
//!
//! let container = encode(b"aaaaa").unwrap();
//! assert_eq!(container.original_len(), 5);
//! assert_eq!(container.table().get(b'a').unwrap().to_string(), "0");
//! assert_eq!(decode(&container).unwrap(), b"aaaaa");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code_table;
pub mod codec;
pub mod config;
pub mod container;
mod decoder;
pub mod frequency;
pub mod tree;
mod wire;

pub use code_table::{Code, CodeTable, MAX_CODE_LENGTH};
pub use codec::{HuffmanDecoder, HuffmanEncoder, MAX_INPUT_SIZE};
pub use config::{DecodeStrategy, HuffConfig};
pub use container::{CompressionStats, Container};
pub use frequency::FrequencyTable;
pub use oxihuff_core::error::{OxiHuffError, Result};
pub use tree::{HuffmanNode, HuffmanTree};

/// Encode data into a [`Container`].
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::encode;
///
/// let container = encode(b"abracadabra").unwrap();
/// assert_eq!(container.table().len(), 5);
/// assert_eq!(container.payload_bits(), 23);
/// ```
pub fn encode(data: &[u8]) -> Result<Container> {
    HuffmanEncoder::new().encode(data)
}

/// Decode a [`Container`] with the default configuration.
pub fn decode(container: &Container) -> Result<Vec<u8>> {
    HuffmanDecoder::default().decode(container)
}

/// Compress data into serialized container bytes.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::compress;
///
/// let compressed = compress(b"").unwrap();
/// assert_eq!(compressed, vec![0u8; 13]);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.to_bytes())
}

/// Decompress serialized container bytes with the default configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, HuffConfig::DEFAULT)
}

/// Decompress serialized container bytes with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::{compress, decompress_with, DecodeStrategy, HuffConfig};
///
/// let compressed = compress(b"hello, huffman").unwrap();
/// let config = HuffConfig::new().with_decode_strategy(DecodeStrategy::Tree);
/// assert_eq!(decompress_with(&compressed, config).unwrap(), b"hello, huffman");
///
/// let limited = HuffConfig::new().with_max_output_size(4);
/// assert!(decompress_with(&compressed, limited).is_err());
/// ```
pub fn decompress_with(data: &[u8], config: HuffConfig) -> Result<Vec<u8>> {
    HuffmanDecoder::new(config).decode_bytes(data)
}
