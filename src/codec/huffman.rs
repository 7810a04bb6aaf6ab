//! Huffman coding with a self-describing tree.
//!
//! Each entry is coded with its own tree, built from the byte frequencies of
//! that entry alone. The tree is stored next to the bitstream as text, so the
//! decoder needs nothing but the entry record.
//!
//! # Tree text
//!
//! The tree is written in pre-order (node, left subtree, right subtree) as
//! tokens joined by `,`:
//!
//! | Node          | Token                        |
//! |---------------|------------------------------|
//! | internal      | `<freq>`                     |
//! | leaf          | `<byte>sep<freq>` (decimal)  |
//! | leaf for `,`  | `commasep<freq>`             |
//! | absent child  | `None`                       |
//!
//! Leaves have no children, so every leaf token is followed by `None,None`.
//! The tree for `b"aab"` serializes as `3,98sep1,None,None,97sep2,None,None`.
//!
//! # Tie-breaking
//!
//! Nodes are merged lowest frequency first. Equal frequencies are ordered by
//! a sequence number: leaves are numbered in ascending byte order, and each
//! merged node takes the next number. The first node popped becomes the left
//! child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::CodecError;
use super::bits::{BitWriter, PackedBits};

const FIELD_SEPARATOR: char = ',';
const LEAF_SEPARATOR: &str = "sep";
const ABSENT: &str = "None";
const COMMA_ESCAPE: &str = "comma";

/// Deepest tree a 256-symbol alphabet can produce.
const MAX_DEPTH: usize = 256;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A byte value and its number of occurrences.
    Leaf {
        /// The byte value.
        byte: u8,
        /// Occurrences of `byte` in the coded data.
        freq: u64,
    },
    /// Two merged subtrees.
    Internal {
        /// Sum of the children's frequencies.
        freq: u64,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Returns the frequency carried by this node.
    pub fn freq(&self) -> u64 {
        match self {
            Self::Leaf { freq, .. } | Self::Internal { freq, .. } => *freq,
        }
    }

    /// Returns true for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

struct QueuedNode {
    seq: u64,
    node: Node,
}

impl QueuedNode {
    fn key(&self) -> (u64, u64) {
        (self.node.freq(), self.seq)
    }
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    // Reversed so the max-heap pops the lowest (freq, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Per-byte code table derived from a tree.
pub type CodeTable = Vec<Option<Vec<bool>>>;

/// A Huffman tree. The tree of an empty input has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<Node>,
}

impl HuffmanTree {
    /// Builds the tree for `data`.
    pub fn from_data(data: &[u8]) -> Self {
        let mut frequencies = [0u64; 256];
        for &byte in data {
            frequencies[byte as usize] += 1;
        }
        Self::from_frequencies(&frequencies)
    }

    /// Builds a tree from a byte frequency table.
    pub fn from_frequencies(frequencies: &[u64; 256]) -> Self {
        let mut queue: BinaryHeap<QueuedNode> = frequencies
            .iter()
            .enumerate()
            .filter(|&(_, &freq)| freq > 0)
            .map(|(byte, &freq)| QueuedNode {
                seq: byte as u64,
                node: Node::Leaf {
                    byte: byte as u8,
                    freq,
                },
            })
            .collect();

        let mut next_seq = 256;
        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                break;
            };
            queue.push(QueuedNode {
                seq: next_seq,
                node: Node::Internal {
                    freq: left.node.freq() + right.node.freq(),
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            next_seq += 1;
        }

        Self {
            root: queue.pop().map(|queued| queued.node),
        }
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Derives the code of every byte present in the tree.
    ///
    /// A root that is itself a leaf gets the one-bit code `0`.
    pub fn codes(&self) -> CodeTable {
        let mut table: CodeTable = vec![None; 256];
        match &self.root {
            None => {}
            Some(Node::Leaf { byte, .. }) => table[*byte as usize] = Some(vec![false]),
            Some(root) => {
                let mut path = Vec::new();
                collect_codes(root, &mut path, &mut table);
            }
        }
        table
    }

    /// Writes the tree in its pre-order text form.
    pub fn serialize(&self) -> String {
        let mut tokens = Vec::new();
        if let Some(root) = &self.root {
            push_tokens(root, &mut tokens);
        }
        tokens.join(&FIELD_SEPARATOR.to_string())
    }

    /// Parses a tree written by [`HuffmanTree::serialize`].
    ///
    /// An empty string yields the empty tree.
    pub fn deserialize(text: &str) -> Result<Self, CodecError> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        let mut tokens = text.split(FIELD_SEPARATOR);
        let root = parse_node(&mut tokens, 0)?
            .ok_or_else(|| CodecError::MalformedTree("tree has no root".into()))?;
        if tokens.next().is_some() {
            return Err(CodecError::MalformedTree(
                "trailing tokens after tree".into(),
            ));
        }
        Ok(Self { root: Some(root) })
    }

    /// Serializes the tree to the bytes stored in an entry record.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize().into_bytes()
    }

    /// Parses the tree bytes of an entry record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CodecError::MalformedTree("tree text is not UTF-8".into()))?;
        Self::deserialize(text)
    }
}

fn collect_codes(node: &Node, path: &mut Vec<bool>, table: &mut CodeTable) {
    match node {
        Node::Leaf { byte, .. } => table[*byte as usize] = Some(path.clone()),
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, table);
            path.pop();
            path.push(true);
            collect_codes(right, path, table);
            path.pop();
        }
    }
}

fn push_tokens(node: &Node, tokens: &mut Vec<String>) {
    match node {
        Node::Leaf { byte, freq } => {
            if *byte == FIELD_SEPARATOR as u8 {
                tokens.push(format!("{COMMA_ESCAPE}{LEAF_SEPARATOR}{freq}"));
            } else {
                tokens.push(format!("{byte}{LEAF_SEPARATOR}{freq}"));
            }
            tokens.push(ABSENT.to_string());
            tokens.push(ABSENT.to_string());
        }
        Node::Internal { freq, left, right } => {
            tokens.push(freq.to_string());
            push_tokens(left, tokens);
            push_tokens(right, tokens);
        }
    }
}

fn parse_node<'a, I>(tokens: &mut I, depth: usize) -> Result<Option<Node>, CodecError>
where
    I: Iterator<Item = &'a str>,
{
    if depth > MAX_DEPTH {
        return Err(CodecError::MalformedTree("tree is too deep".into()));
    }
    let token = tokens
        .next()
        .ok_or_else(|| CodecError::MalformedTree("unexpected end of tree".into()))?;
    if token == ABSENT {
        return Ok(None);
    }

    if let Some((value, freq)) = token.split_once(LEAF_SEPARATOR) {
        let byte = if value == COMMA_ESCAPE {
            FIELD_SEPARATOR as u8
        } else {
            value
                .parse::<u8>()
                .map_err(|_| CodecError::MalformedTree(format!("bad leaf value '{value}'")))?
        };
        let freq = parse_freq(freq)?;
        for _ in 0..2 {
            if parse_node(tokens, depth + 1)?.is_some() {
                return Err(CodecError::MalformedTree(format!(
                    "leaf '{token}' has children"
                )));
            }
        }
        return Ok(Some(Node::Leaf { byte, freq }));
    }

    let freq = parse_freq(token)?;
    let mut child = |side: &str| {
        parse_node(tokens, depth + 1)?.ok_or_else(|| {
            CodecError::MalformedTree(format!("internal node is missing its {side} child"))
        })
    };
    let left = child("left")?;
    let right = child("right")?;
    Ok(Some(Node::Internal {
        freq,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

fn parse_freq(token: &str) -> Result<u64, CodecError> {
    token
        .parse()
        .map_err(|_| CodecError::MalformedTree(format!("bad frequency '{token}'")))
}

/// Encodes `data` and returns the packed bitstream with the tree that decodes it.
pub fn encode(data: &[u8]) -> (PackedBits, HuffmanTree) {
    let tree = HuffmanTree::from_data(data);
    let codes = tree.codes();
    let mut writer = BitWriter::new();
    for &byte in data {
        if let Some(code) = &codes[byte as usize] {
            writer.push_all(code);
        }
    }
    (writer.finish(), tree)
}

/// Decodes a bitstream with the tree it was encoded with.
///
/// A tree whose root is a leaf repeats that byte `freq` times, whatever the
/// bitstream holds.
pub fn decode(bits: &PackedBits, tree: &HuffmanTree) -> Result<Vec<u8>, CodecError> {
    let root = match tree.root() {
        None => return Ok(Vec::new()),
        Some(Node::Leaf { byte, freq }) => {
            let len = usize::try_from(*freq).map_err(|_| {
                CodecError::MalformedTree(format!("leaf frequency {freq} is too large"))
            })?;
            return Ok(vec![*byte; len]);
        }
        Some(root) => root,
    };

    let mut output = Vec::with_capacity(root.freq().min(bits.bit_len()) as usize);
    let mut node = root;
    for bit in bits.iter() {
        if let Node::Internal { left, right, .. } = node {
            node = if bit { right } else { left };
        }
        if let Node::Leaf { byte, .. } = node {
            output.push(*byte);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(CodecError::TruncatedBitstream);
    }
    Ok(output)
}
