//! Adaptive Huffman encoder.

use super::symbols::Symbols;
use super::{Options, Value, EOF_SYMBOL, NEW_SYMBOL};
use oxibz_core::{BitWriter, Result};
use std::io::Write;

/// Compressing writer.
///
/// Must be [`finish`](HuffmanWriter::finish)ed so the `EOF` code and the
/// final partial byte reach the output; a dropped writer leaves a
/// truncated stream behind.
pub struct HuffmanWriter<W: Write> {
    symbols: Symbols,
    bw: BitWriter<W>,
}

impl<W: Write> HuffmanWriter<W> {
    /// Create a writer with default options.
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, Options::default())
    }

    /// Create a writer with the given options. A reader can only decode
    /// the stream when configured with the same options.
    pub fn with_options(inner: W, options: Options) -> Self {
        Self {
            symbols: Symbols::new(options),
            bw: BitWriter::new(inner),
        }
    }

    /// Compress all of `data` into the underlying writer.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        for &b in data {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Compress a single byte.
    ///
    /// A value seen before emits its current code and bumps its count; a
    /// new value emits the escape code followed by the raw byte and joins
    /// the table with count 1. Either way the tree the next byte sees is
    /// already updated, which is exactly what the decoder will have done
    /// on its side.
    pub fn write_byte(&mut self, b: u8) -> Result<()> {
        let value = b as Value;
        match self.symbols.leaf_index(value) {
            None => {
                let escape = self
                    .symbols
                    .leaf_index(NEW_SYMBOL)
                    .expect("escape leaf is pinned");
                let (code, bits) = self.symbols.code_of(escape);
                self.bw.write_bits(code, bits)?;
                self.bw.write_byte(b)?;
                self.symbols.insert(value);
            }
            Some(idx) => {
                let (code, bits) = self.symbols.code_of(idx);
                self.bw.write_bits(code, bits)?;
                self.symbols.update(value);
            }
        }
        Ok(())
    }

    /// Emit the `EOF` code (only if any data was written), align the bit
    /// stream, and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        if self.symbols.has_data() {
            let eof = self
                .symbols
                .leaf_index(EOF_SYMBOL)
                .expect("eof leaf is pinned");
            let (code, bits) = self.symbols.code_of(eof);
            self.bw.write_bits(code, bits)?;
        }
        self.bw.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut writer = HuffmanWriter::new(Vec::new());
        writer.write(data).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_empty_stream_stays_empty() {
        // No data leaves, so not even the EOF code is emitted.
        assert_eq!(compress(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_aaab_bit_exact() {
        // "AAAB": escape + raw 'A', then the one-bit code of 'A' twice
        // (0 while its count ties the sentinels, 1 once it dominates),
        // escape + raw 'B', and the three-bit EOF code:
        //   1 01000001 0 1 01 01000010 010
        assert_eq!(compress(b"AAAB"), vec![0xA0, 0xAA, 0x12]);
    }

    #[test]
    fn test_repetition_compresses() {
        let data = vec![b'x'; 4096];
        let compressed = compress(&data);
        // One escape plus ~1 bit per repeat.
        assert!(compressed.len() < data.len() / 4);
    }
}
