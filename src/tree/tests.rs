use crate::{error::Error, frequency::FrequencyTable};

use super::{HuffmanTree, NodeId, TreeBuilder, TreeNode};

fn check_frequencies(tree: &HuffmanTree, id: NodeId) -> usize {
    match *tree.node(id) {
        TreeNode::Leaf { frequency, .. } => frequency,
        TreeNode::Internal { frequency, left, right } => {
            let sum = check_frequencies(tree, left) + right.map_or(0, |r| check_frequencies(tree, r));
            assert_eq!(frequency, sum, "Internal node {:?} does not sum its children", id);
            frequency
        }
    }
}

#[test]
fn test_empty_table() {
    let table = FrequencyTable::new();

    assert!(matches!(TreeBuilder::build(&table), Err(Error::EmptyInput)));
    assert!(matches!(TreeBuilder::build_naive(&table), Err(Error::EmptyInput)));
}

#[test]
fn test_single_symbol() {
    let tree = TreeBuilder::build(&FrequencyTable::count(b"aaaa")).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.frequency(), 4);

    match *tree.node(tree.root()) {
        TreeNode::Internal { frequency, left, right } => {
            assert_eq!(frequency, 4);
            assert_eq!(*tree.node(left), TreeNode::Leaf { symbol: b'a', frequency: 4 });
            assert_eq!(right, None);
        }
        _ => panic!("The root of a single-symbol tree must be internal"),
    }
}

#[test]
fn test_two_symbols() {
    let tree = TreeBuilder::build(&FrequencyTable::count(b"abb")).unwrap();

    match *tree.node(tree.root()) {
        TreeNode::Internal { frequency, left, right } => {
            assert_eq!(frequency, 3);
            assert_eq!(*tree.node(left), TreeNode::Leaf { symbol: b'a', frequency: 1 });
            assert_eq!(*tree.node(right.unwrap()), TreeNode::Leaf { symbol: b'b', frequency: 2 });
        }
        _ => panic!("The root must be internal"),
    }
}

#[test]
fn test_internal_frequencies_are_sums() {
    let input = b"this is an example of a huffman tree";
    let tree = TreeBuilder::build(&FrequencyTable::count(input)).unwrap();

    assert_eq!(check_frequencies(&tree, tree.root()), input.len());
    // k leaves and k - 1 merges
    assert_eq!(tree.len(), 2 * tree.leaf_count() - 1);
}

#[test]
fn test_tie_break_is_by_creation_order() {
    // All frequencies tie: leaves merge pairwise in symbol order
    let tree = TreeBuilder::build(&FrequencyTable::count(b"abcd")).unwrap();

    assert_eq!(*tree.node(NodeId(4)), TreeNode::Internal { frequency: 2, left: NodeId(0), right: Some(NodeId(1)) });
    assert_eq!(*tree.node(NodeId(5)), TreeNode::Internal { frequency: 2, left: NodeId(2), right: Some(NodeId(3)) });
    assert_eq!(*tree.node(NodeId(6)), TreeNode::Internal { frequency: 4, left: NodeId(4), right: Some(NodeId(5)) });
    assert_eq!(tree.root(), NodeId(6));
}

#[test]
fn test_naive_builder_is_equivalent() {
    let inputs: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"abb".to_vec(),
        b"abcd".to_vec(),
        b"abbcccddddd".to_vec(),
        b"mississippi river".to_vec(),
        b"The quick brown fox jumps over the lazy dog".to_vec(),
        (0..=255).collect(),
        (0..4000u32).map(|x| (x * x % 251) as u8).collect(),
    ];

    for input in inputs {
        let table = FrequencyTable::count(&input);
        assert_eq!(TreeBuilder::build(&table).unwrap(), TreeBuilder::build_naive(&table).unwrap());
    }
}

#[test]
fn test_deterministic() {
    let table = FrequencyTable::count(b"determinism under many ties: aabbccddeeff");

    assert_eq!(TreeBuilder::build(&table).unwrap(), TreeBuilder::build(&table).unwrap());
}
