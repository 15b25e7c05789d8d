//! oxibz CLI - block compression with a bijective BWT pipeline.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxibz")]
#[command(version, about = "Block compressor: bijective BWT + RLE + MTF + adaptive Huffman")]
#[command(long_about = "
oxibz compresses a file through four reversible transforms: a bijective
Burrows-Wheeler transform, run-length encoding, move-to-front, and an
adaptive Huffman coder.

Examples:
  oxibz -i notes.txt -o notes.txt.obz
  oxibz -d -i notes.txt.obz -o notes.txt

The whole input is processed as a single block (limit 1 GiB); inputs with
more than 255 distinct byte values after run-length encoding cannot be
framed by the container and are rejected.
")]
struct Cli {
    /// Input file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Compress the input (default)
    #[arg(short = 'c', long, conflicts_with = "decompress")]
    compress: bool,

    /// Decompress the input
    #[arg(short = 'd', long)]
    decompress: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(&cli.input)?;

    let compressing = cli.compress || !cli.decompress;
    let result = if compressing {
        oxibz_bwts::compress_to_vec(&data)?
    } else {
        oxibz_bwts::decompress_to_vec(&data)?
    };

    std::fs::write(&cli.output, &result)?;

    println!(
        "{}: {} ({} bytes) -> {} ({} bytes)",
        if compressing {
            "Compressed"
        } else {
            "Decompressed"
        },
        cli.input.display(),
        data.len(),
        cli.output.display(),
        result.len()
    );

    Ok(())
}
