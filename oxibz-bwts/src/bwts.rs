//! Bijective Burrows-Wheeler transform (BWTS).
//!
//! Unlike the classic BWT, the bijective variant needs no primary index:
//! every block of every length has exactly one preimage. The construction
//! follows the Lyndon factorization of the input. Computing one suffix
//! array per Lyndon word would be wasteful, so the forward transform
//! computes a single suffix array of the whole block and then corrects the
//! ranks at each Lyndon word head so the permutation respects the
//! Gessel-Reutenauer order over Lyndon rotations. The transform is roughly
//! 10% slower than a classic BWT on the same sorter.

use crate::sais::suffix_array;
use crate::MAX_BLOCK_SIZE;
use oxibz_core::{OxibzError, Result};

/// Bijective BWT transformer.
///
/// The suffix array and its inverse are scratch buffers, grown lazily to
/// the largest block seen and reused across calls.
#[derive(Debug, Default)]
pub struct Bwts {
    buffer1: Vec<i32>,
    buffer2: Vec<i32>,
}

impl Bwts {
    /// Create a new transformer with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_block(src: &[u8], dst: &[u8]) -> Result<()> {
        if src.len() > MAX_BLOCK_SIZE {
            return Err(OxibzError::BlockTooLarge {
                size: src.len(),
                max: MAX_BLOCK_SIZE,
            });
        }
        if dst.len() < src.len() {
            return Err(OxibzError::buffer_too_small(src.len(), dst.len()));
        }
        Ok(())
    }

    /// Apply the forward transform to `src`, writing into `dst`.
    ///
    /// Returns the number of bytes read and written (always equal).
    /// `dst` must be at least as long as `src`; blocks above
    /// [`MAX_BLOCK_SIZE`] are rejected.
    pub fn forward(&mut self, src: &[u8], dst: &mut [u8]) -> Result<(usize, usize)> {
        if src.is_empty() {
            return Ok((0, 0));
        }
        Self::check_block(src, dst)?;
        let count = src.len();
        if count < 2 {
            dst[0] = src[0];
            return Ok((count, count));
        }

        if self.buffer1.len() < count {
            self.buffer1.resize(count, 0);
        }
        if self.buffer2.len() < count {
            self.buffer2.resize(count, 0);
        }
        let sa = &mut self.buffer1[..count];
        let isa = &mut self.buffer2[..count];

        suffix_array(src, sa);
        for (i, &p) in sa.iter().enumerate() {
            isa[p as usize] = i as i32;
        }

        let count32 = count as i32;

        // Scan for Lyndon word heads: a new running minimum of ISA marks
        // the start of the next factor. Relocate each head to its Lyndon
        // rank, then repair the interior positions from right to left.
        let mut min = isa[0];
        let mut idx_min: i32 = 0;
        let mut i: i32 = 1;
        while i < count32 && min > 0 {
            if isa[i as usize] >= min {
                i += 1;
                continue;
            }

            let mut ref_rank = move_lyndon_word_head(sa, isa, src, count32, idx_min, i - idx_min, min);

            let mut j = i - 1;
            while j > idx_min {
                // Walk the new Lyndon word from its end toward its start.
                let mut test_rank = isa[j as usize];
                let start_rank = test_rank;
                while test_rank < count32 - 1 {
                    let next_rank_start = sa[(test_rank + 1) as usize];
                    if j > next_rank_start
                        || src[j as usize] != src[next_rank_start as usize]
                        || ref_rank < isa[(next_rank_start + 1) as usize]
                    {
                        break;
                    }
                    sa[test_rank as usize] = next_rank_start;
                    isa[next_rank_start as usize] = test_rank;
                    test_rank += 1;
                }
                sa[test_rank as usize] = j;
                isa[j as usize] = test_rank;
                ref_rank = test_rank;
                if start_rank == test_rank {
                    break;
                }
                j -= 1;
            }

            min = isa[i as usize];
            idx_min = i;
            i += 1;
        }

        // Emit the last column. Positions whose rank stays above the
        // running minimum map straight through; a new minimum means the
        // previous factor wraps onto its own head.
        let mut min = count32;
        for i in 0..count {
            let rank = isa[i];
            if rank >= min {
                dst[rank as usize] = src[i - 1];
                continue;
            }
            if min < count32 {
                dst[min as usize] = src[i - 1];
            }
            min = rank;
        }
        dst[0] = src[count - 1];

        Ok((count, count))
    }

    /// Apply the inverse transform to `src`, writing into `dst`.
    ///
    /// Standard LF-mapping reconstruction, with one chain walked per
    /// Lyndon factor: consumed positions are marked with a -1 sentinel so
    /// the outer scan can pick up the next cycle.
    pub fn inverse(&mut self, src: &[u8], dst: &mut [u8]) -> Result<(usize, usize)> {
        if src.is_empty() {
            return Ok((0, 0));
        }
        Self::check_block(src, dst)?;
        let count = src.len();
        if count < 2 {
            dst[0] = src[0];
            return Ok((count, count));
        }

        if self.buffer1.len() < count {
            self.buffer1.resize(count, 0);
        }
        let lf = &mut self.buffer1[..count];

        let mut buckets = [0i32; 256];
        for &b in src {
            buckets[b as usize] += 1;
        }
        let mut sum = 0i32;
        for b in buckets.iter_mut() {
            sum += *b;
            *b = sum - *b;
        }
        for (i, &b) in src.iter().enumerate() {
            lf[i] = buckets[b as usize];
            buckets[b as usize] += 1;
        }

        let mut j = count as i32 - 1;
        let mut i = 0usize;
        while j >= 0 {
            if lf[i] < 0 {
                i += 1;
                continue;
            }
            let mut p = i as i32;
            loop {
                dst[j as usize] = src[p as usize];
                j -= 1;
                let next = lf[p as usize];
                lf[p as usize] = -1;
                p = next;
                if lf[p as usize] < 0 {
                    break;
                }
            }
        }

        Ok((count, count))
    }
}

/// Advance `rank` past every suffix that still belongs inside the current
/// Lyndon word or compares smaller than its rotation, then drop the word
/// head at the rank where the walk stopped.
fn move_lyndon_word_head(
    sa: &mut [i32],
    isa: &mut [i32],
    data: &[u8],
    count: i32,
    start: i32,
    size: i32,
    mut rank: i32,
) -> i32 {
    let end = start + size;
    while rank + 1 < count {
        let next_start0 = sa[(rank + 1) as usize];
        if next_start0 <= end {
            break;
        }
        let mut next_start = next_start0;
        let mut k: i32 = 0;
        while k < size && next_start < count && data[(start + k) as usize] == data[next_start as usize]
        {
            k += 1;
            next_start += 1;
        }
        if k == size && rank < isa[next_start as usize] {
            break;
        }
        if k < size && next_start < count && data[(start + k) as usize] < data[next_start as usize] {
            break;
        }
        sa[rank as usize] = next_start0;
        isa[next_start0 as usize] = rank;
        rank += 1;
    }
    sa[rank as usize] = start;
    isa[start as usize] = rank;
    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; data.len()];
        Bwts::new().forward(data, &mut out).unwrap();
        out
    }

    fn roundtrip(data: &[u8]) {
        let mut bwts = Bwts::new();
        let mut transformed = vec![0u8; data.len()];
        bwts.forward(data, &mut transformed).unwrap();
        let mut recovered = vec![0u8; data.len()];
        bwts.inverse(&transformed, &mut recovered).unwrap();
        assert_eq!(recovered, data, "roundtrip failed for {:?}", data);
    }

    #[test]
    fn test_empty() {
        let mut bwts = Bwts::new();
        let mut out = [0u8; 0];
        assert_eq!(bwts.forward(&[], &mut out).unwrap(), (0, 0));
        assert_eq!(bwts.inverse(&[], &mut out).unwrap(), (0, 0));
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(forward(b"A"), b"A");
        roundtrip(b"A");
    }

    #[test]
    fn test_banana() {
        // Lyndon factors b | an | an | a; sorting the factor rotations in
        // omega-order (a^w, (an)^w x2, b^w, (na)^w x2) and taking last
        // characters gives "annbaa". The classic BWT of "banana" is the
        // different string "nnbaaa" because it sorts whole-block rotations.
        assert_eq!(forward(b"banana"), b"annbaa");
        roundtrip(b"banana");
    }

    #[test]
    fn test_is_permutation() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let transformed = forward(data);
        assert_eq!(transformed.len(), data.len());

        let histogram = |bytes: &[u8]| {
            let mut counts = [0usize; 256];
            for &b in bytes {
                counts[b as usize] += 1;
            }
            counts
        };
        assert_eq!(histogram(data), histogram(&transformed));
    }

    #[test]
    fn test_roundtrip_cases() {
        let cases: &[&[u8]] = &[
            b"ab",
            b"ba",
            b"aaaa",
            b"abab",
            b"banana",
            b"mississippi",
            b"abracadabra",
            b"zyxwvutsrqponmlkjihgfedcba",
            b"the quick brown fox jumps over the lazy dog",
            b"%#%%#%",
            b"\x00\x00\xff\xff\x00",
        ];
        for &data in cases {
            roundtrip(data);
        }
    }

    #[test]
    fn test_roundtrip_pseudorandom() {
        let mut seed = 0xBADC_0FEEu32;
        for len in [7usize, 64, 257, 1024, 4096] {
            let mut data = Vec::with_capacity(len);
            for _ in 0..len {
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                data.push((seed >> 16) as u8);
            }
            roundtrip(&data);
        }
    }

    #[test]
    fn test_roundtrip_repetitive() {
        let mut data = Vec::new();
        while data.len() < 8192 {
            data.extend_from_slice(b"abcabcabd");
        }
        roundtrip(&data);
    }

    #[test]
    fn test_scratch_reuse() {
        let mut bwts = Bwts::new();
        for data in [&b"first block first block"[..], b"xy", b"another one"] {
            let mut transformed = vec![0u8; data.len()];
            bwts.forward(data, &mut transformed).unwrap();
            let mut recovered = vec![0u8; data.len()];
            bwts.inverse(&transformed, &mut recovered).unwrap();
            assert_eq!(recovered, data);
        }
    }

    #[test]
    fn test_dst_too_small() {
        let mut bwts = Bwts::new();
        let mut out = [0u8; 2];
        let err = bwts.forward(b"banana", &mut out).unwrap_err();
        assert!(matches!(err, OxibzError::BufferTooSmall { needed: 6, available: 2 }));
        let err = bwts.inverse(b"nnbaaa", &mut out).unwrap_err();
        assert!(matches!(err, OxibzError::BufferTooSmall { .. }));
    }
}
