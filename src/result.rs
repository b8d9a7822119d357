use std::{fs, fmt::Write};

use serde::{Serialize, Deserialize};

use crate::{codebook::Codebook, decoder, error::Result, properties::Properties};

/// Everything needed to reconstruct a compressed input: the packed bits, how
/// many of their trailing bits are padding, the codebook and the original length.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct CompressionResult {
    /// Number of input bytes
    pub original_size: usize,
    /// `ceil(encoded bits / 8)`, the length of `packed_bytes`
    pub compressed_size: usize,
    /// Zero filler bits at the low end of the last packed byte, 0 to 7
    pub padding_bits: u8,
    pub packed_bytes: Vec<u8>,
    pub codebook: Codebook,
}

impl CompressionResult {
    /// The result of compressing an empty input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of meaningful bits in `packed_bytes`.
    pub fn encoded_bits(&self) -> usize {
        (self.packed_bytes.len() * 8).saturating_sub(self.padding_bits as usize)
    }

    /// Compressed size over original size, 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    /// The encoded bits as a string of '0' and '1', padding excluded.
    pub fn bit_string(&self) -> String {
        let mut s = String::with_capacity(self.encoded_bits());

        for i in 0..self.encoded_bits() {
            let bit = self.packed_bytes[i >> 3] & (0x80 >> (i & 7)) != 0;
            s.push(if bit { '1' } else { '0' });
        }

        s
    }

    /// The codebook as `symbol: code` lines.
    pub fn codebook_listing(&self) -> String {
        let mut s = String::new();

        for (symbol, code) in self.codebook.iter() {
            if symbol.is_ascii() {
                let _ = writeln!(s, "{:?}: {}", symbol as char, code);
            } else {
                let _ = writeln!(s, "{:#04x}: {}", symbol, code);
            }
        }

        s
    }

    pub fn decompress(&self) -> Result<Vec<u8>> {
        decoder::decompress(self)
    }

    /// Serializes the self-contained artifact with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes `basename.huff` and its `basename.properties` sidecar.
    pub fn store(&self, basename: &str) -> Result<()> {
        fs::write(format!("{}.huff", basename), self.to_bytes()?)?;
        fs::write(format!("{}.properties", basename), String::from(Properties::from(self)))?;

        Ok(())
    }

    /// Reads an artifact written by [`CompressionResult::store`], checking it
    /// against its properties.
    pub fn load(basename: &str) -> Result<Self> {
        let result = Self::from_bytes(&fs::read(format!("{}.huff", basename))?)?;
        let props = Properties::read(&format!("{}.properties", basename))?;

        props.check(&result)?;

        Ok(result)
    }
}

#[test]
fn test_bit_string() {
    let result = crate::compress(b"aaaa");

    assert_eq!(result.bit_string(), "0000");
    assert_eq!(result.codebook_listing(), "'a': 0\n");
    assert_eq!(CompressionResult::empty().bit_string(), "");
}

#[test]
fn test_codebook_listing_shows_high_bytes_in_hex() {
    let result = crate::compress(&[0xFF, 0xFF, b'a']);

    assert_eq!(result.codebook_listing(), "'a': 0\n0xff: 1\n");
}

#[test]
fn test_ratio() {
    assert_eq!(CompressionResult::empty().ratio(), 0.0);
    assert_eq!(crate::compress(b"aaaaaaaa").ratio(), 0.125);
}

#[test]
fn test_bincode_artifact() {
    let result = crate::compress(b"The rain in Spain stays mainly in the plain");
    let bytes = result.to_bytes().unwrap();

    assert_eq!(CompressionResult::from_bytes(&bytes).unwrap(), result);
    assert!(CompressionResult::from_bytes(&bytes[..bytes.len() / 2]).is_err());
}

#[test]
fn test_json_export() {
    let result = crate::compress(b"abb");
    let json = result.to_json().unwrap();

    assert!(json.contains("\"original_size\": 3"));
    assert!(json.contains("\"padding_bits\": 5"));
    assert_eq!(serde_json::from_str::<CompressionResult>(&json).unwrap(), result);
}

#[test]
fn test_store_and_load() {
    let basename = std::env::temp_dir().join(format!("huffman_rust_store_{}", std::process::id()));
    let basename = basename.to_str().unwrap();

    let result = crate::compress(b"store me, load me, store me again");
    result.store(basename).unwrap();

    let loaded = CompressionResult::load(basename).unwrap();
    assert_eq!(loaded, result);
    assert_eq!(loaded.decompress().unwrap(), b"store me, load me, store me again");

    fs::remove_file(format!("{}.huff", basename)).unwrap();
    fs::remove_file(format!("{}.properties", basename)).unwrap();
}
