use std::{fs, time::Instant};

use huffman_rust::{report::{export_name, Report}, Encoder, EncoderConfig};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Compress a file with Huffman coding and show the result")]
struct Args {
    /// The file to compress
    source_name: String,
    /// Show every packed byte instead of the first encoded bits
    #[arg(short, long, default_value_t = false)]
    expanded: bool,
    /// Store the artifact as <stem>_compressed.huff next to the source
    #[arg(long, default_value_t = false)]
    export: bool,
    /// Maximum number of threads counting symbol frequencies
    #[arg(long, default_value_t = 1)]
    shards: usize,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let input = fs::read(&args.source_name).unwrap_or_else(|e| panic!("Could not read {}: {}", args.source_name, e));

    let encoder = Encoder::new(EncoderConfig { shards: args.shards, ..Default::default() });

    let comp_time = Instant::now();
    let result = encoder.compress(&input);
    let comp_time = comp_time.elapsed().as_nanos();

    print!("{}", Report::new(&result, args.expanded));
    println!("compressed the file in {}ns", comp_time);

    if args.export {
        let basename = export_name(&args.source_name);
        result.store(&basename).expect("Failed storing the compressed file");
        println!("stored {}.huff", basename);
    }
}
