//! Adaptive Huffman decoder.

use super::symbols::Symbols;
use super::{NodeKind, Options, Value, EOF_SYMBOL, NEW_SYMBOL};
use oxibz_core::{BitReader, Result};
use std::io::Read;

/// Decompressing reader.
///
/// Mirrors [`HuffmanWriter`](super::HuffmanWriter): after every decoded
/// symbol it performs the same table mutation the writer performed after
/// encoding it, so both sides walk identical trees.
pub struct HuffmanReader<R: Read> {
    symbols: Symbols,
    br: BitReader<R>,
}

impl<R: Read> HuffmanReader<R> {
    /// Create a reader with default options.
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, Options::default())
    }

    /// Create a reader with the given options; they must match the
    /// writer's.
    pub fn with_options(inner: R, options: Options) -> Self {
        Self {
            symbols: Symbols::new(options),
            br: BitReader::new(inner),
        }
    }

    /// Decode the next byte, or `None` at the end-of-stream code.
    ///
    /// The substrate running dry before the `EOF` code is a truncated
    /// stream and surfaces as `UnexpectedEof`.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut idx = self.symbols.root();
        loop {
            match self.symbols.kind(idx) {
                NodeKind::Internal { left, right } => {
                    idx = if self.br.read_bit()? { right } else { left };
                }
                NodeKind::Leaf(value) => {
                    return match value {
                        NEW_SYMBOL => {
                            let b = self.br.read_byte()?;
                            self.symbols.insert(b as Value);
                            Ok(Some(b))
                        }
                        EOF_SYMBOL => Ok(None),
                        value => {
                            self.symbols.update(value);
                            Ok(Some(value as u8))
                        }
                    };
                }
            }
        }
    }

    /// Decode everything up to the end-of-stream code.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.read_byte()? {
            out.push(b);
        }
        Ok(out)
    }
}
