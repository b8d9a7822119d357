use std::{fs, time::Instant};

use clap::Parser;
use huffman_rust::{Encoder, EncoderConfig};

#[derive(Parser, Debug)]
#[command(about = "Huffman-compress a file into <dest>.huff and <dest>.properties")]
struct Args {
    /// The file to compress
    source_name: String,
    /// The destination basename of the compressed artifact
    dest_name: String,
    /// Maximum number of threads counting symbol frequencies
    #[arg(short, long, default_value_t = 1)]
    shards: usize,
    /// Also write the artifact as <dest>.json
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let input = fs::read(&args.source_name).unwrap_or_else(|e| panic!("Could not read {}: {}", args.source_name, e));

    let encoder = Encoder::new(EncoderConfig { shards: args.shards, ..Default::default() });

    let comp_time = Instant::now();
    let result = encoder.compress(&input);
    let comp_time = comp_time.elapsed().as_nanos() as f64;

    result.store(&args.dest_name).expect("Failed storing the compressed file");

    if args.json {
        let json = result.to_json().expect("Failed serializing the compressed file");
        fs::write(format!("{}.json", args.dest_name), json).expect("Failed writing the json file");
    }

    println!(
        "compressed {} bytes into {} bytes ({:.3}) in {}ns",
        result.original_size, result.compressed_size, result.ratio(), comp_time
    );
}
