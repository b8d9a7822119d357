pub mod bitstreams;
pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod properties;
pub mod report;
pub mod result;
pub mod tree;

pub use codebook::{Code, Codebook};
pub use decoder::{decompress, Decoder};
pub use encoder::{compress, Encoder, EncoderConfig};
pub use error::{CorruptDataError, Error, Result};
pub use frequency::FrequencyTable;
pub use properties::Properties;
pub use result::CompressionResult;
pub use tree::{HuffmanTree, TreeBuilder};

/// The unit of input data. The coder is byte oriented so any binary input round-trips.
pub type Symbol = u8;
