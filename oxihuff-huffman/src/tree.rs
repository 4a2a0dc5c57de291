//! Huffman tree construction and code generation.
//!
//! The tree is built bottom-up with a min-priority queue. Nodes of equal
//! weight are ordered by insertion sequence: leaves are queued in ascending
//! symbol order, then every merged node takes the next sequence number. The
//! first node extracted becomes the left child (bit 0), the second the right
//! child (bit 1).

use crate::code_table::{Code, CodeTable, MAX_CODE_LENGTH};
use crate::frequency::FrequencyTable;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// A node of the Huffman tree. Internal nodes always have two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its occurrence count.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Two subtrees; weight is the sum of their weights.
    Internal {
        /// Sum of descendant leaf weights.
        weight: u64,
        /// Subtree reached with bit 0.
        left: Box<HuffmanNode>,
        /// Subtree reached with bit 1.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Depth of the deepest leaf below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Result<Self> {
        let weight = left
            .weight()
            .checked_add(right.weight())
            .ok_or_else(|| OxiHuffError::weight_overflow(left.weight(), right.weight()))?;
        Ok(Self::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Priority queue entry; `BinaryHeap` is a max-heap, so the ordering is
/// reversed to pop the lightest, earliest node first.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    sequence: usize,
    node: HuffmanNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A Huffman tree built from a non-empty frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// Returns `None` for an empty table. A table with a single symbol yields
    /// a tree whose root is that symbol's leaf. Fails with
    /// [`OxiHuffError::WeightOverflow`] if two subtree weights sum past
    /// `u64::MAX`, which only hand-built tables can reach.
    pub fn build(freq: &FrequencyTable) -> Result<Option<Self>> {
        let mut heap: BinaryHeap<QueueEntry> = freq
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| QueueEntry {
                weight,
                sequence,
                node: HuffmanNode::Leaf { symbol, weight },
            })
            .collect();
        let mut sequence = heap.len();

        loop {
            let Some(first) = heap.pop() else {
                return Ok(None);
            };
            let Some(second) = heap.pop() else {
                trace!(
                    leaves = first.node.leaf_count(),
                    weight = first.weight,
                    "huffman tree complete"
                );
                return Ok(Some(Self { root: first.node }));
            };

            let node = HuffmanNode::merge(first.node, second.node)?;
            trace!(
                left = first.weight,
                right = second.weight,
                sequence,
                "merged nodes"
            );
            heap.push(QueueEntry {
                weight: node.weight(),
                sequence,
                node,
            });
            sequence += 1;
        }
    }

    /// Root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Depth of the deepest leaf.
    pub fn max_depth(&self) -> usize {
        self.root.depth()
    }

    /// Derive the code table: `0` for each left edge, `1` for each right
    /// edge. A lone leaf root gets the one-bit code `0`.
    ///
    /// Fails with [`OxiHuffError::UnrepresentableCodeLength`] if any leaf is
    /// deeper than [`MAX_CODE_LENGTH`].
    pub fn codes(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        match &self.root {
            HuffmanNode::Leaf { symbol, .. } => {
                if let Some(code) = Code::new(0, 1) {
                    table.insert(*symbol, code);
                }
            }
            root => assign_codes(root, 0, 0, &mut table)?,
        }
        Ok(table)
    }
}

fn assign_codes(node: &HuffmanNode, prefix: u64, depth: usize, table: &mut CodeTable) -> Result<()> {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            let len = u8::try_from(depth)
                .ok()
                .filter(|&len| len <= MAX_CODE_LENGTH)
                .ok_or_else(|| OxiHuffError::unrepresentable_code(*symbol, depth, MAX_CODE_LENGTH))?;
            let code = Code::new(prefix as u32, len)
                .ok_or_else(|| OxiHuffError::unrepresentable_code(*symbol, depth, MAX_CODE_LENGTH))?;
            table.insert(*symbol, code);
            Ok(())
        }
        HuffmanNode::Internal { left, right, .. } => {
            assign_codes(left, prefix << 1, depth + 1, table)?;
            assign_codes(right, (prefix << 1) | 1, depth + 1, table)
        }
    }
}
