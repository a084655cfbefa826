use log::{debug, trace};

use crate::tools::error::CodecError;
use crate::tools::freq_count::FreqTable;

/// What a node holds: a byte value, or the arena indices of its two children.
/// The left child was labelled bit 0 at merge time, the right child bit 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Node {
    /// Sum of the counts of every leaf below (or at) this node.
    pub freq: u64,
    /// Arena index of the parent. Only the root has none.
    pub parent: Option<usize>,
    /// Edge label assigned by the parent (0 or 1). Meaningless on the root.
    pub code: u8,
    pub node_data: NodeData,
}

impl Node {
    fn leaf(symbol: u8, freq: u64) -> Self {
        Node {
            freq,
            parent: None,
            code: 0,
            node_data: NodeData::Leaf(symbol),
        }
    }
}

/// Huffman tree stored in a single arena of `2K-1` nodes.
/// Indices `0..K` are the leaves in frequency table order, `K..2K-1` are the internal
/// nodes in creation order, and the last node is the root.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    leaves: usize,
}

impl HuffmanTree {
    /// Build the tree for a table with at least two distinct symbols.
    ///
    /// Each new internal node takes the two parentless nodes with the smallest frequency,
    /// found by a linear scan over all earlier nodes. Ties go to the lowest index, and the
    /// first minimum becomes the 0 child. The output bit pattern depends on this exact order,
    /// so a heap is not a drop-in replacement here.
    pub fn build(table: &FreqTable) -> Result<Self, CodecError> {
        let leaves = table.kinds();
        if leaves < 2 {
            return Err(CodecError::TooFewSymbols(leaves));
        }
        let node_count = 2 * leaves - 1;
        let mut nodes: Vec<Node> = Vec::with_capacity(node_count);
        nodes.extend(
            table
                .entries()
                .iter()
                .map(|e| Node::leaf(e.symbol, e.count as u64)),
        );

        for i in leaves..node_count {
            // (index, freq) of the smallest and second smallest parentless nodes. min_1 <= min_2.
            let mut min_1: Option<(usize, u64)> = None;
            let mut min_2: Option<(usize, u64)> = None;
            for (j, node) in nodes.iter().enumerate() {
                if node.parent.is_some() {
                    continue;
                }
                if matches!(min_2, Some((_, f)) if node.freq >= f) {
                    continue;
                }
                match min_1 {
                    Some((_, f)) if node.freq >= f => min_2 = Some((j, node.freq)),
                    _ => {
                        min_2 = min_1;
                        min_1 = Some((j, node.freq));
                    }
                }
            }
            // 2 * leaves - i >= 2 nodes are still parentless here, so both are always found.
            let (Some((left, f_left)), Some((right, f_right))) = (min_1, min_2) else {
                return Err(CodecError::TooFewSymbols(leaves));
            };

            nodes[left].parent = Some(i);
            nodes[left].code = 0;
            nodes[right].parent = Some(i);
            nodes[right].code = 1;
            nodes.push(Node {
                freq: f_left + f_right,
                parent: None,
                code: 0,
                node_data: NodeData::Kids(left, right),
            });
            trace!(
                "Node {}: kids {} ({}) and {} ({}), freq {}",
                i,
                left,
                f_left,
                right,
                f_right,
                f_left + f_right
            );
        }

        debug!(
            "Built huffman tree of {} nodes over {} symbols, root freq {}.",
            nodes.len(),
            leaves,
            nodes[node_count - 1].freq
        );
        Ok(Self { nodes, leaves })
    }

    /// Wrap an arena built by hand. Used to test trees `build` can't produce.
    #[cfg(test)]
    pub(crate) fn from_nodes(nodes: Vec<Node>, leaves: usize) -> Self {
        Self { nodes, leaves }
    }

    /// Arena index of the root.
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of leaves (K). A node index below this is a leaf.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Decoder state transition: follow the edge labelled `bit` out of `idx`.
    /// Stepping out of a leaf stays on the leaf.
    #[inline]
    pub fn step(&self, idx: usize, bit: u8) -> usize {
        match self.nodes[idx].node_data {
            NodeData::Kids(left, right) => {
                if bit == 0 {
                    left
                } else {
                    right
                }
            }
            NodeData::Leaf(_) => idx,
        }
    }

    /// Byte value held by a leaf, None for internal nodes.
    #[inline]
    pub fn symbol(&self, idx: usize) -> Option<u8> {
        match self.nodes[idx].node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }
}
