//! # oxibz Core
//!
//! Core components for the oxibz block compressor.
//!
//! This crate provides the substrate the transform pipeline is built on:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! oxibz is a layered stack:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ L3: CLI (oxibz-cli)                            │
//! ├────────────────────────────────────────────────┤
//! │ L2: Transforms (oxibz-bwts)                    │
//! │     BWTS, RLE, MTF, adaptive Huffman           │
//! ├────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                     │
//! │     BitReader/BitWriter, error types           │
//! └────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxibzError, Result};
