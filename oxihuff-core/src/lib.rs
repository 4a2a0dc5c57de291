//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman compressor.
//!
//! - [`bitstream`]: MSB-first bit packing with exact tracking of the final
//!   partial byte
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     compress / decompress / info / test                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (oxihuff-huffman)                             │
//! │     FrequencyTable, HuffmanTree, CodeTable, Container  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     MsbBitWriter/MsbBitReader, pack/unpack, errors     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{pack, unpack};
//!
//! let bits = [true, false, true, true];
//! let packed = pack(&bits);
//! assert_eq!(packed.bytes, vec![0b1011_0000]);
//! assert_eq!(packed.usable_bits, 4);
//! assert_eq!(unpack(&packed.bytes, packed.usable_bits).unwrap(), bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{MsbBitReader, MsbBitWriter, PackedBits, pack, unpack};
pub use error::{OxiHuffError, Result};
