//! Move-to-front transform over a per-block alphabet.
//!
//! Unlike the bzip2 flavour, which always works over the full 0-255 list,
//! this MTF runs over exactly the distinct bytes of the block in
//! first-occurrence order. The alphabet travels with the payload as a
//! trailer: `[payload][alphabet][alphabet_len_byte]`, which caps the
//! alphabet at 255 entries.

use oxibz_core::{OxibzError, Result};

/// Largest alphabet the one-byte trailer length can frame.
pub const MAX_ALPHABET: usize = 255;

/// Distinct bytes of `data` in first-occurrence order.
pub fn alphabet(data: &[u8]) -> Vec<u8> {
    let mut seen = [false; 256];
    let mut out = Vec::new();
    for &b in data {
        if !seen[b as usize] {
            seen[b as usize] = true;
            out.push(b);
        }
    }
    out
}

/// Replace each byte of `data` with its index in the recency stack seeded
/// from `alphabet`.
pub fn encode(data: &[u8], alphabet: &[u8]) -> Result<Vec<u8>> {
    let mut pad = alphabet.to_vec();
    let mut seq = Vec::with_capacity(data.len());
    for &c in data {
        let x = pad
            .iter()
            .position(|&b| b == c)
            .ok_or_else(|| OxibzError::corrupted("byte missing from MTF alphabet"))?;
        seq.push(x as u8);
        pad.copy_within(..x, 1);
        pad[0] = c;
    }
    Ok(seq)
}

/// Undo [`encode`] given the same alphabet.
pub fn decode(seq: &[u8], alphabet: &[u8]) -> Result<Vec<u8>> {
    let mut pad = alphabet.to_vec();
    let mut out = Vec::with_capacity(seq.len());
    for &x in seq {
        let x = x as usize;
        if x >= pad.len() {
            return Err(OxibzError::corrupted("MTF index beyond alphabet"));
        }
        let c = pad[x];
        out.push(c);
        pad.copy_within(..x, 1);
        pad[0] = c;
    }
    Ok(out)
}

/// Append the alphabet trailer to an encoded payload.
pub fn append_trailer(payload: &mut Vec<u8>, alphabet: &[u8]) -> Result<()> {
    if alphabet.is_empty() {
        return Err(OxibzError::malformed_trailer("alphabet is empty"));
    }
    if alphabet.len() > MAX_ALPHABET {
        return Err(OxibzError::AlphabetTooLarge {
            count: alphabet.len(),
        });
    }
    payload.extend_from_slice(alphabet);
    payload.push(alphabet.len() as u8);
    Ok(())
}

/// Split a framed payload into the MTF bytes and the alphabet.
pub fn split_trailer(input: &[u8]) -> Result<(&[u8], &[u8])> {
    let Some((&len_byte, rest)) = input.split_last() else {
        return Err(OxibzError::malformed_trailer("payload is empty"));
    };
    let len = len_byte as usize;
    if len == 0 {
        return Err(OxibzError::malformed_trailer("alphabet length byte is 0"));
    }
    if len > rest.len() {
        return Err(OxibzError::malformed_trailer(
            "alphabet length exceeds payload",
        ));
    }
    let (payload, alphabet) = rest.split_at(rest.len() - len);
    Ok((payload, alphabet))
}
