use log::{debug, trace};

use crate::{bitstreams::BinaryWriterBuilder, codebook::Codebook, frequency::FrequencyTable, result::CompressionResult, tree::TreeBuilder};

/// Tuning knobs for [`Encoder`]. They change how the work is done, never the output.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EncoderConfig {
    /// Maximum number of threads used to count frequencies
    pub shards: usize,
    /// Inputs are split only into shards at least this long
    pub min_shard_len: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { shards: 1, min_shard_len: 1 << 20 }
    }
}

#[derive(Clone, Default, Debug)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Compresses `input` into packed bits plus the codebook needed to reverse them.
    ///
    /// The result only depends on `input`: equal inputs give equal results.
    pub fn compress(&self, input: &[u8]) -> CompressionResult {
        if input.is_empty() {
            return CompressionResult::empty();
        }

        let table = self.count(input);
        trace!("Frequencies: {:?}", table);

        let tree = match TreeBuilder::build(&table) {
            Ok(tree) => tree,
            Err(e) => unreachable!("Non-empty input produced no tree: {}", e),
        };

        let codebook = Codebook::generate(&tree);
        debug_assert!(codebook.is_prefix_free());
        trace!("Codebook: {:?}", codebook.iter().map(|(s, c)| (s, c.to_string())).collect::<Vec<_>>());

        let encoded_bits = codebook.encoded_bits(&table);
        let mut writer = BinaryWriterBuilder::with_capacity(encoded_bits);

        for &x in input.iter() {
            match codebook.get(x) {
                Some(code) => writer.push_code(code),
                None => unreachable!("Symbol {} was counted but has no code", x),
            };
        }

        debug_assert_eq!(writer.written_bits, encoded_bits);
        let packed = writer.build();

        debug!(
            "Compressed {} bytes ({} distinct symbols) into {} bits, {} bytes",
            input.len(), codebook.len(), encoded_bits, packed.os.len()
        );

        CompressionResult {
            original_size: input.len(),
            compressed_size: packed.os.len(),
            padding_bits: packed.padding_bits,
            packed_bytes: packed.os.into_vec(),
            codebook,
        }
    }

    fn count(&self, input: &[u8]) -> FrequencyTable {
        let shards = self.config.shards.min(input.len() / self.config.min_shard_len.max(1));

        if shards > 1 {
            debug!("Counting {} bytes on {} shards", input.len(), shards);
            FrequencyTable::count_sharded(input, shards)
        } else {
            FrequencyTable::count(input)
        }
    }
}

/// Compresses `input` with the default configuration.
pub fn compress(input: &[u8]) -> CompressionResult {
    Encoder::default().compress(input)
}
