use log::warn;

use crate::{bitstreams::BinaryReader, codebook::Codebook, error::{CorruptDataError, Result}, result::CompressionResult, Symbol};

#[derive(Clone, Copy, Default, Debug)]
struct DecodeNode {
    children: [Option<usize>; 2],
    symbol: Option<Symbol>,
}

/// The binary trie spelled by a codebook: every code is a root-to-leaf path.
#[derive(Clone, Debug)]
pub struct Decoder {
    nodes: Vec<DecodeNode>,
}

impl Decoder {
    /// Inverts `codebook` into a decode trie.
    ///
    /// Fails if a code is empty or a prefix of another, since such a codebook
    /// cannot be decoded unambiguously.
    pub fn new(codebook: &Codebook) -> std::result::Result<Self, CorruptDataError> {
        let mut decoder = Self { nodes: vec![DecodeNode::default()] };

        for (symbol, code) in codebook.iter() {
            if code.is_empty() {
                return Err(CorruptDataError::InvalidCodebook(format!("symbol {} has an empty code", symbol)));
            }

            let mut curr_node = 0;
            for bit in code.iter() {
                if decoder.nodes[curr_node].symbol.is_some() {
                    return Err(CorruptDataError::InvalidCodebook(format!("a code is a prefix of the code of symbol {}", symbol)));
                }

                curr_node = match decoder.nodes[curr_node].children[bit as usize] {
                    Some(next) => next,
                    None => {
                        let next = decoder.nodes.len();
                        decoder.nodes.push(DecodeNode::default());
                        decoder.nodes[curr_node].children[bit as usize] = Some(next);
                        next
                    }
                };
            }

            let leaf = &mut decoder.nodes[curr_node];
            if leaf.symbol.is_some() || leaf.children.iter().any(Option::is_some) {
                return Err(CorruptDataError::InvalidCodebook(format!("the code of symbol {} is a prefix of another code", symbol)));
            }
            leaf.symbol = Some(symbol);
        }

        Ok(decoder)
    }

    /// Walks the trie from the root until a leaf, consuming one bit per level.
    #[inline(always)]
    pub fn read_next(&self, reader: &mut BinaryReader) -> std::result::Result<Option<Symbol>, CorruptDataError> {
        let mut curr_node = 0;

        loop {
            let Some(bit) = reader.read_int(1) else {
                return Ok(None);
            };

            curr_node = self.nodes[curr_node].children[bit as usize]
                .ok_or(CorruptDataError::InvalidCode { position: reader.read_bits - 1 })?;

            if let Some(symbol) = self.nodes[curr_node].symbol {
                return Ok(Some(symbol));
            }
        }
    }

    /// Decodes exactly `count` symbols; the reader must be empty afterwards.
    pub fn decode(&self, reader: &mut BinaryReader, count: usize) -> std::result::Result<Vec<Symbol>, CorruptDataError> {
        let mut output_vec = Vec::with_capacity(count.min(reader.remaining()));

        while output_vec.len() < count {
            match self.read_next(reader)? {
                Some(symbol) => output_vec.push(symbol),
                None => return Err(CorruptDataError::Truncated { decoded: output_vec.len(), expected: count }),
            }
        }

        if reader.remaining() != 0 {
            return Err(CorruptDataError::TrailingBits { count: reader.remaining() });
        }

        Ok(output_vec)
    }
}

fn check_layout(result: &CompressionResult) -> std::result::Result<(), CorruptDataError> {
    if result.padding_bits > 7 || (result.packed_bytes.is_empty() && result.padding_bits != 0) {
        return Err(CorruptDataError::InvalidPadding(result.padding_bits));
    }

    if result.packed_bytes.len() != result.compressed_size {
        return Err(CorruptDataError::SizeMismatch { expected: result.compressed_size, actual: result.packed_bytes.len() });
    }

    if let Some(&last) = result.packed_bytes.last() {
        let padding_mask = ((1u16 << result.padding_bits) - 1) as u8;
        if last & padding_mask != 0 {
            return Err(CorruptDataError::NonZeroPadding);
        }
    }

    if result.original_size > 0 && result.codebook.is_empty() {
        return Err(CorruptDataError::InvalidCodebook(format!("no codes for {} symbols", result.original_size)));
    }

    Ok(())
}

fn decode_result(result: &CompressionResult) -> std::result::Result<Vec<u8>, CorruptDataError> {
    check_layout(result)?;

    let mut reader = BinaryReader::new(result.packed_bytes.clone().into_boxed_slice(), result.padding_bits);

    if result.original_size == 0 {
        if reader.remaining() != 0 {
            return Err(CorruptDataError::TrailingBits { count: reader.remaining() });
        }
        return Ok(Vec::new());
    }

    Decoder::new(&result.codebook)?.decode(&mut reader, result.original_size)
}

/// Recovers the original bytes from a [`CompressionResult`].
///
/// Fails with [`crate::Error::CorruptData`] unless the unpadded bits resolve into
/// exactly `original_size` codebook symbols.
pub fn decompress(result: &CompressionResult) -> Result<Vec<u8>> {
    decode_result(result).map_err(|e| {
        warn!("Failed decompressing {} packed bytes: {}", result.packed_bytes.len(), e);
        e.into()
    })
}
