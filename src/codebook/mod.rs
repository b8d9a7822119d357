use std::{collections::BTreeMap, fmt::{self, Display}, str::FromStr};

use serde::{Serialize, Deserialize};

use crate::{error::CorruptDataError, frequency::FrequencyTable, tree::{HuffmanTree, TreeNode}, Symbol};

/// A variable-length bit-string, stored MSB-first.
///
/// Bits beyond `length` in the last byte are always zero.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Code {
    length: usize,
    bits: Vec<u8>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push(&mut self, bit: bool) {
        if self.length & 7 == 0 {
            self.bits.push(0);
        }
        if bit {
            self.bits[self.length >> 3] |= 0x80 >> (self.length & 7);
        }
        self.length += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline(always)]
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.length, "Bit {} out of a code of length {}", i, self.length);
        self.bits[i >> 3] & (0x80 >> (i & 7)) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length).map(|i| self.bit(i))
    }

    /// The packed bits, MSB-first, `ceil(len / 8)` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    fn from_packed(length: usize, bits: Vec<u8>) -> Result<Self, CorruptDataError> {
        if bits.len() != (length + 7) >> 3 {
            return Err(CorruptDataError::InvalidCodebook(format!("{} bytes cannot hold a {}-bit code", bits.len(), length)));
        }
        if length & 7 != 0 && bits[bits.len() - 1] & (0xFF >> (length & 7)) != 0 {
            return Err(CorruptDataError::InvalidCodebook("code has bits set past its length".to_string()));
        }

        Ok(Self { length, bits })
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CorruptDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut code = Code::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return Err(CorruptDataError::InvalidCodebook(format!("unexpected character {:?} in code", c))),
            }
        }
        Ok(code)
    }
}

/// One serialized codebook entry: the symbol, its code length and the code bits
/// packed MSB-first.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct CodebookEntry {
    pub symbol: Symbol,
    pub length: u16,
    pub bits: Vec<u8>,
}

/// Maps every symbol of the input to its prefix-free code.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize, Debug)]
#[serde(into = "Vec<CodebookEntry>", try_from = "Vec<CodebookEntry>")]
pub struct Codebook {
    codes: BTreeMap<Symbol, Code>,
}

impl Codebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns to every leaf its root path, left = 0 and right = 1.
    ///
    /// The walk uses an explicit stack, so very unbalanced trees cannot exhaust the call stack.
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                TreeNode::Leaf { symbol, .. } => {
                    debug_assert!(!code.is_empty(), "Leaf {} reached with an empty code", symbol);
                    codes.insert(symbol, code);
                }
                TreeNode::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_code = code.clone();
                        right_code.push(true);
                        stack.push((right, right_code));
                    }

                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((left, left_code));
                }
            }
        }

        Self { codes }
    }

    /// Builds a codebook from explicit entries, rejecting empty codes, repeated
    /// symbols and sets that are not prefix-free.
    pub fn from_entries(entries: Vec<CodebookEntry>) -> Result<Self, CorruptDataError> {
        let mut codes = BTreeMap::new();
        // k symbols sit at most k - 1 levels deep, a lone symbol at depth 1
        let max_length = entries.len().saturating_sub(1).max(1);

        for entry in entries {
            if entry.length as usize > max_length {
                return Err(CorruptDataError::InvalidCodebook(format!(
                    "symbol {} has a {}-bit code, longer than {} bits",
                    entry.symbol, entry.length, max_length
                )));
            }
            if entry.length == 0 {
                return Err(CorruptDataError::InvalidCodebook(format!("symbol {} has an empty code", entry.symbol)));
            }

            let code = Code::from_packed(entry.length as usize, entry.bits)?;

            if codes.insert(entry.symbol, code).is_some() {
                return Err(CorruptDataError::InvalidCodebook(format!("symbol {} appears twice", entry.symbol)));
            }
        }

        let codebook = Self { codes };
        if !codebook.is_prefix_free() {
            return Err(CorruptDataError::InvalidCodebook("codes are not prefix-free".to_string()));
        }

        Ok(codebook)
    }

    pub fn entries(&self) -> Vec<CodebookEntry> {
        self.codes
            .iter()
            .map(|(&symbol, code)| CodebookEntry { symbol, length: code.len() as u16, bits: code.as_bytes().to_vec() })
            .collect()
    }

    #[inline(always)]
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&s, code)| (s, code))
    }

    /// No code is a prefix of (or equal to) another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<Vec<bool>> = self.codes.values().map(|code| code.iter().collect()).collect();
        // Lexicographic order puts every extension of a code right after it
        sorted.sort();

        sorted.windows(2).all(|w| !w[1].starts_with(&w[0]))
    }

    /// Number of bits needed to encode an input with the given frequencies.
    ///
    /// Symbols missing from the codebook contribute nothing.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> usize {
        table
            .iter()
            .map(|(s, freq)| self.get(s).map_or(0, |code| code.len() * freq))
            .sum()
    }
}

impl FromIterator<(Symbol, Code)> for Codebook {
    fn from_iter<I: IntoIterator<Item = (Symbol, Code)>>(iter: I) -> Self {
        Self { codes: iter.into_iter().collect() }
    }
}

impl TryFrom<Vec<CodebookEntry>> for Codebook {
    type Error = CorruptDataError;

    fn try_from(entries: Vec<CodebookEntry>) -> Result<Self, Self::Error> {
        Codebook::from_entries(entries)
    }
}

impl From<Codebook> for Vec<CodebookEntry> {
    fn from(codebook: Codebook) -> Self {
        codebook.entries()
    }
}

#[cfg(test)]
mod tests;
