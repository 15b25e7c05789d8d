//! Block compression built on the bijective Burrows-Wheeler transform.
//!
//! This crate implements a reversible four-stage pipeline:
//!
//! 1. Bijective Burrows-Wheeler Transform (BWTS) - block sorting without a
//!    primary index
//! 2. Run-Length Encoding (RLE) - textual run counts with a trailer marker
//! 3. Move-to-Front Transform (MTF) - recency ranking over a per-block
//!    alphabet carried in a trailer
//! 4. Adaptive Huffman coding - entropy coding with escape and EOF
//!    sentinels over an MSB-first bit stream
//!
//! Decompression runs the inverse of each stage in reverse order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bwts;
pub mod huffman;
pub mod mtf;
pub mod rle;

mod decode;
mod encode;
mod sais;

pub use decode::{decompress, decompress_to_vec};
pub use encode::{compress, compress_to_vec};

/// Maximum supported BWTS block size (1 GiB).
pub const MAX_BLOCK_SIZE: usize = 1 << 30;
