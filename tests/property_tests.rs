use huffman_rust::{compress, decompress, CompressionResult, Encoder, EncoderConfig, FrequencyTable};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_round_trip(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        let result = compress(&input);

        prop_assert_eq!(decompress(&result).unwrap(), input);
    }

    #[test]
    fn test_round_trip_small_alphabet(input in prop::collection::vec(0..3u8, 0..2000)) {
        prop_assert_eq!(decompress(&compress(&input)).unwrap(), input);
    }

    #[test]
    fn test_codebook_is_prefix_free(input in prop::collection::vec(any::<u8>(), 1..2000)) {
        let result = compress(&input);

        prop_assert!(result.codebook.is_prefix_free());
        prop_assert_eq!(result.codebook.len(), FrequencyTable::count(&input).len());
    }

    #[test]
    fn test_size_accounting(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        let result = compress(&input);
        let bits: usize = input.iter().map(|&s| result.codebook.get(s).unwrap().len()).sum();

        prop_assert_eq!(result.original_size, input.len());
        prop_assert_eq!(result.compressed_size, (bits + 7) / 8);
        prop_assert_eq!(result.encoded_bits(), bits);
        prop_assert!(result.padding_bits < 8);
    }

    #[test]
    fn test_deterministic(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        prop_assert_eq!(compress(&input), compress(&input));
    }

    #[test]
    fn test_skewed_input_does_not_expand(
        len in 1..5000usize,
        rare in 0..100usize,
        a in any::<u8>(),
        b in any::<u8>(),
    ) {
        let input: Vec<u8> = (0..len).map(|i| if rare > 0 && i % rare == 0 { b } else { a }).collect();
        let result = compress(&input);

        prop_assert!(result.compressed_size <= result.original_size);
    }

    #[test]
    fn test_sharded_counting(input in prop::collection::vec(any::<u8>(), 0..5000), shards in 1..16usize) {
        prop_assert_eq!(FrequencyTable::count_sharded(&input, shards), FrequencyTable::count(&input));

        let encoder = Encoder::new(EncoderConfig { shards, min_shard_len: 16 });
        prop_assert_eq!(encoder.compress(&input), compress(&input));
    }

    #[test]
    fn test_artifact_round_trip(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        let bytes = compress(&input).to_bytes().unwrap();
        let result = CompressionResult::from_bytes(&bytes).unwrap();

        prop_assert_eq!(result.decompress().unwrap(), input);
    }

    #[test]
    fn test_bit_flips_never_panic(input in prop::collection::vec(any::<u8>(), 1..500), flip in any::<usize>()) {
        let mut result = compress(&input);
        let bit = flip % (result.packed_bytes.len() * 8);
        result.packed_bytes[bit >> 3] ^= 0x80 >> (bit & 7);

        // A flip either fails cleanly or still decodes to the right number of symbols
        if let Ok(output) = decompress(&result) {
            prop_assert_eq!(output.len(), input.len());
        }
    }
}
