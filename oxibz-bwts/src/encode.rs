//! Compression pipeline driver.

use crate::bwts::Bwts;
use crate::huffman::HuffmanWriter;
use crate::{mtf, rle};
use oxibz_core::Result;
use std::io::Write;

/// Compress `data` through the full pipeline into `writer`:
/// BWTS forward, RLE, MTF with its alphabet trailer, adaptive Huffman.
///
/// Returns the writer once the stream is finished and flushed. Empty
/// input compresses to an empty stream. Blocks larger than
/// [`MAX_BLOCK_SIZE`](crate::MAX_BLOCK_SIZE) and blocks with more than 255
/// distinct bytes after RLE are rejected.
pub fn compress<W: Write>(data: &[u8], writer: W) -> Result<W> {
    if data.is_empty() {
        return Ok(writer);
    }

    let mut transformed = vec![0u8; data.len()];
    Bwts::new().forward(data, &mut transformed)?;

    let rle_bytes = rle::encode(&transformed);

    let alphabet = mtf::alphabet(&rle_bytes);
    let mut payload = mtf::encode(&rle_bytes, &alphabet)?;
    mtf::append_trailer(&mut payload, &alphabet)?;

    let mut huffman = HuffmanWriter::new(writer);
    huffman.write(&payload)?;
    huffman.finish()
}

/// [`compress`] into a fresh byte vector.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, Vec::new())
}
