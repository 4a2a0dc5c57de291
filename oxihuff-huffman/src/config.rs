//! Decoder configuration.

use std::fmt;

/// How the decoder maps bits back to symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Match the growing bit prefix against the code table, one lookup per
    /// code length.
    #[default]
    Table,
    /// Rebuild a decode tree from the codes and walk it bit by bit.
    Tree,
}

impl DecodeStrategy {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffConfig {
    /// Strategy used to decode the payload.
    pub decode_strategy: DecodeStrategy,
    /// Refuse containers that would decode to more than this many bytes.
    /// `None` means unlimited.
    pub max_output_size: Option<usize>,
}

impl HuffConfig {
    /// Table decoding, no output limit.
    pub const DEFAULT: Self = Self {
        decode_strategy: DecodeStrategy::Table,
        max_output_size: None,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the decode strategy.
    pub fn with_decode_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.decode_strategy = strategy;
        self
    }

    /// Set the output size limit.
    pub fn with_max_output_size(mut self, limit: usize) -> Self {
        self.max_output_size = Some(limit);
        self
    }
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
