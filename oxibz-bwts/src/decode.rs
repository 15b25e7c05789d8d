//! Decompression pipeline driver.

use crate::bwts::Bwts;
use crate::huffman::HuffmanReader;
use crate::{mtf, rle};
use oxibz_core::Result;
use std::io::Read;

/// Decompress a stream produced by [`compress`](crate::compress),
/// undoing each stage in reverse order: adaptive Huffman, the MTF trailer
/// and transform, RLE, and one BWTS inversion.
pub fn decompress<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    // An empty stream decompresses to empty output. Sniff one byte so a
    // generic reader can report that case cleanly instead of failing in
    // the middle of the first Huffman code.
    let mut first = [0u8; 1];
    if let Err(e) = reader.read_exact(&mut first) {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            return Ok(Vec::new());
        }
        return Err(e.into());
    }

    let mut huffman = HuffmanReader::new(first.as_slice().chain(reader));
    let payload = huffman.read_to_end()?;

    let (mtf_bytes, alphabet) = mtf::split_trailer(&payload)?;
    let rle_bytes = mtf::decode(mtf_bytes, alphabet)?;

    let bwt_bytes = rle::decode(&rle_bytes)?;

    let mut out = vec![0u8; bwt_bytes.len()];
    Bwts::new().inverse(&bwt_bytes, &mut out)?;
    Ok(out)
}

/// [`decompress`] from an in-memory byte slice.
pub fn decompress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data)
}
