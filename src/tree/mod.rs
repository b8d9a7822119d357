use std::{collections::BinaryHeap, cmp::{Ordering, Reverse}};

use crate::{error::{Error, Result}, frequency::FrequencyTable, Symbol};

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TreeNode {
    Leaf {
        symbol: Symbol,
        frequency: usize,
    },
    /// `right` is only absent under a root holding a single symbol.
    Internal {
        frequency: usize,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl TreeNode {
    #[inline(always)]
    pub fn frequency(&self) -> usize {
        match self {
            TreeNode::Leaf { frequency, .. } => *frequency,
            TreeNode::Internal { frequency, .. } => *frequency,
        }
    }
}

/// A Huffman tree stored as an arena.
///
/// Leaves occupy the first slots in ascending symbol order, internal nodes follow
/// in creation order and the root is always the last node. Every node but the root
/// has exactly one parent.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl HuffmanTree {
    #[inline(always)]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total frequency, equal to the length of the input the tree was built for.
    pub fn frequency(&self) -> usize {
        self.node(self.root).frequency()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, TreeNode::Leaf { .. })).count()
    }
}

/// A candidate root in the merge queue.
///
/// Nodes are ordered by frequency; equal frequencies fall back to the arena index,
/// which is the creation sequence: leaves by symbol, then internal nodes in merge order.
#[derive(Clone, Copy, Debug)]
struct HeapNode {
    frequency: usize,
    node: NodeId,
}

impl HeapNode {
    fn new(node: NodeId, frequency: usize) -> Self {
        Self { frequency, node }
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency.cmp(&other.frequency).then(self.node.cmp(&other.node))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapNode {}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

pub struct TreeBuilder;

impl TreeBuilder {
    /// Builds the Huffman tree with a binary min-heap, in O(k log k) for k distinct symbols.
    ///
    /// The smaller of the two extracted nodes becomes the left child.
    pub fn build(table: &FrequencyTable) -> Result<HuffmanTree> {
        let mut nodes = TreeBuilder::leaves(table)?;

        if nodes.len() == 1 {
            return Ok(TreeBuilder::single_leaf(nodes));
        }

        let mut freq_tree: BinaryHeap<Reverse<HeapNode>> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| Reverse(HeapNode::new(NodeId(i), n.frequency())))
            .collect();

        while freq_tree.len() > 1 {
            let (Some(Reverse(node1)), Some(Reverse(node2))) = (freq_tree.pop(), freq_tree.pop()) else {
                break;
            };

            let id = NodeId(nodes.len());
            let frequency = node1.frequency + node2.frequency;
            nodes.push(TreeNode::Internal { frequency, left: node1.node, right: Some(node2.node) });

            freq_tree.push(Reverse(HeapNode::new(id, frequency)));
        }

        let root = NodeId(nodes.len() - 1);
        Ok(HuffmanTree { nodes, root })
    }

    /// Builds the same tree as [`TreeBuilder::build`] by scanning every remaining
    /// candidate for the two minima, in O(k²).
    pub fn build_naive(table: &FrequencyTable) -> Result<HuffmanTree> {
        let mut nodes = TreeBuilder::leaves(table)?;

        if nodes.len() == 1 {
            return Ok(TreeBuilder::single_leaf(nodes));
        }

        let mut candidates: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();

        while candidates.len() > 1 {
            let left = TreeBuilder::take_min(&mut candidates, &nodes);
            let right = TreeBuilder::take_min(&mut candidates, &nodes);

            let id = NodeId(nodes.len());
            let frequency = nodes[left.0].frequency() + nodes[right.0].frequency();
            nodes.push(TreeNode::Internal { frequency, left, right: Some(right) });

            candidates.push(id);
        }

        let root = NodeId(nodes.len() - 1);
        Ok(HuffmanTree { nodes, root })
    }

    fn leaves(table: &FrequencyTable) -> Result<Vec<TreeNode>> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(2 * table.len());
        for (symbol, frequency) in table.iter() {
            nodes.push(TreeNode::Leaf { symbol, frequency });
        }

        Ok(nodes)
    }

    /// A lone leaf still hangs below an internal root so that its code is "0".
    fn single_leaf(mut nodes: Vec<TreeNode>) -> HuffmanTree {
        let frequency = nodes[0].frequency();
        nodes.push(TreeNode::Internal { frequency, left: NodeId(0), right: None });

        HuffmanTree { nodes, root: NodeId(1) }
    }

    fn take_min(candidates: &mut Vec<NodeId>, nodes: &[TreeNode]) -> NodeId {
        let key = |id: NodeId| HeapNode::new(id, nodes[id.0].frequency());

        let mut best = 0;
        for (i, &id) in candidates.iter().enumerate().skip(1) {
            if key(id) < key(candidates[best]) {
                best = i;
            }
        }

        candidates.swap_remove(best)
    }
}

#[cfg(test)]
mod tests;
