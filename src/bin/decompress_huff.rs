use std::{fs, time::Instant};

use clap::Parser;
use huffman_rust::CompressionResult;

#[derive(Parser, Debug)]
#[command(about = "Restore a file from a <source>.huff artifact")]
struct Args {
    /// The basename of the compressed artifact
    source_name: String,
    /// The destination file
    dest_name: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let result = CompressionResult::load(&args.source_name)
        .unwrap_or_else(|e| panic!("Could not load {}.huff: {}", args.source_name, e));

    let decomp_time = Instant::now();
    let output = result.decompress().unwrap_or_else(|e| panic!("Failed decompressing {}: {}", args.source_name, e));
    let decomp_time = decomp_time.elapsed().as_nanos() as f64;

    fs::write(&args.dest_name, output).expect("Failed writing the decompressed file");

    println!("decompressed {} bytes in {}ns", result.original_size, decomp_time);
}
