use std::{collections::HashMap, fs::File, io::BufReader, str::FromStr};

use log::warn;

use crate::{error::{Error, Result}, result::CompressionResult};

const FORMAT: &str = "huffman_rust.CompressionResult";

/// Human-readable metadata stored next to a `.huff` artifact.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Properties {
    pub version: u32,
    pub original_size: usize,
    pub compressed_size: usize,
    pub padding_bits: u8,
    pub symbols: usize,
    pub encoded_bits: usize,
}

impl Properties {
    pub fn read(filename: &str) -> Result<Self> {
        let file = File::open(filename)?;
        let p = java_properties::read(BufReader::new(file)).map_err(|e| Error::Properties(format!("Failed parsing {}: {}", filename, e)))?;

        Properties::try_from(p)
    }

    /// Fails if the artifact disagrees with these properties.
    pub fn check(&self, result: &CompressionResult) -> Result<()> {
        let actual = Properties::from(result);

        if *self != actual {
            warn!("Properties {:?} do not describe the artifact {:?}", self, actual);
            return Err(Error::Properties(format!(
                "expected {} bytes in {} packed bytes with {} padding bits, found {} bytes in {} packed bytes with {} padding bits",
                self.original_size, self.compressed_size, self.padding_bits,
                actual.original_size, actual.compressed_size, actual.padding_bits,
            )));
        }

        Ok(())
    }
}

impl From<&CompressionResult> for Properties {
    fn from(result: &CompressionResult) -> Self {
        Self {
            version: 0,
            original_size: result.original_size,
            compressed_size: result.compressed_size,
            padding_bits: result.padding_bits,
            symbols: result.codebook.len(),
            encoded_bits: result.encoded_bits(),
        }
    }
}

fn parse<T: FromStr>(value: &HashMap<String, String>, key: &str) -> Result<T> {
    let s = value.get(key).ok_or_else(|| Error::Properties(format!("Missing {} in properties", key)))?;

    s.trim().parse().map_err(|_| Error::Properties(format!("Malformed {} in properties: {:?}", key, s)))
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        if let Some(format) = value.get("format") {
            if format != FORMAT {
                return Err(Error::Properties(format!("Unknown artifact format {}", format)));
            }
        }

        Ok(Properties {
            version: parse(&value, "version")?,
            original_size: parse(&value, "originalsize")?,
            compressed_size: parse(&value, "compressedsize")?,
            padding_bits: parse(&value, "paddingbits")?,
            symbols: parse(&value, "symbols")?,
            encoded_bits: parse(&value, "encodedbits")?,
        })
    }
}

impl From<Properties> for String {
    fn from(val: Properties) -> Self {
        let mut s = String::new();

        s.push_str("#Huffman compression properties\n");
        s.push_str(&format!("version={}\n", val.version));
        s.push_str(&format!("format={}\n", FORMAT));
        s.push_str(&format!("originalsize={}\n", val.original_size));
        s.push_str(&format!("compressedsize={}\n", val.compressed_size));
        s.push_str(&format!("paddingbits={}\n", val.padding_bits));
        s.push_str(&format!("symbols={}\n", val.symbols));
        s.push_str(&format!("encodedbits={}\n", val.encoded_bits));

        s
    }
}

#[test]
fn test_properties_text_round_trip() {
    let props = Properties::from(&crate::compress(b"properties"));
    let text = String::from(props.clone());

    let parsed = java_properties::read(text.as_bytes()).unwrap();

    assert_eq!(parsed.get("originalsize").map(String::as_str), Some("10"));
    assert_eq!(Properties::try_from(parsed).unwrap(), props);
}

#[test]
fn test_properties_missing_key() {
    let mut p = HashMap::new();
    p.insert("version".to_string(), "0".to_string());

    assert!(matches!(Properties::try_from(p), Err(Error::Properties(_))));
}

#[test]
fn test_properties_check() {
    let result = crate::compress(b"check");
    let mut props = Properties::from(&result);

    assert!(props.check(&result).is_ok());

    props.padding_bits = (props.padding_bits + 1) % 8;
    assert!(props.check(&result).is_err());
}
