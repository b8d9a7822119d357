use std::time::Instant;

use clap::Parser;
use rand::{distributions::{Distribution, WeightedIndex}, rngs::StdRng, Rng, SeedableRng};
use huffman_rust::{decompress, Encoder, EncoderConfig};

#[derive(Parser, Debug)]
#[command(about = "Time Huffman compression and decompression of random inputs")]
struct Args {
    /// Length of every generated input
    #[arg(short, long, default_value_t = 1 << 20)]
    len: usize,
    /// Number of inputs
    #[arg(short, long, default_value_t = 10)]
    runs: usize,
    /// Number of distinct symbols in the inputs
    #[arg(short, long, default_value_t = 64)]
    alphabet: usize,
    /// Maximum number of threads counting symbol frequencies
    #[arg(long, default_value_t = 4)]
    shards: usize,
    /// Seed of the input generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Draws symbols with a skewed (Zipf-like) distribution so the codes have different lengths.
fn gen_input<R: Rng>(rng: &mut R, len: usize, alphabet: usize) -> Vec<u8> {
    let weights: Vec<f64> = (1..=alphabet).map(|rank| 1.0 / rank as f64).collect();
    let dist = WeightedIndex::new(&weights).expect("Alphabet must not be empty");

    (0..len).map(|_| dist.sample(rng) as u8).collect()
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    assert!((1..=256).contains(&args.alphabet), "The alphabet must have between 1 and 256 symbols");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let encoder = Encoder::new(EncoderConfig { shards: args.shards, min_shard_len: 1 << 16 });

    let mut comp_total = 0;
    let mut decomp_total = 0;
    let mut compressed_total = 0;

    for _ in 0..args.runs {
        let input = gen_input(&mut rng, args.len, args.alphabet);

        let comp_time = Instant::now();
        let result = encoder.compress(&input);
        comp_total += comp_time.elapsed().as_nanos();

        let decomp_time = Instant::now();
        let output = decompress(&result).expect("Failed decompressing a generated input");
        decomp_total += decomp_time.elapsed().as_nanos();

        assert_eq!(output, input, "Round trip mismatch");
        compressed_total += result.compressed_size;
    }

    let mut out_stats = String::new();

    out_stats.push_str("################### Huffman round-trip stats ###################\n");
    out_stats.push_str(&format!("inputs {} x {} bytes, {} symbols\n", args.runs, args.len, args.alphabet));
    out_stats.push_str(&format!("ratio {:.4}\n", compressed_total as f64 / (args.runs * args.len).max(1) as f64));
    out_stats.push_str(&format!("time compression {} ns\n", comp_total));
    out_stats.push_str(&format!("time decompression {} ns\n", decomp_total));

    print!("{}", out_stats);
}
