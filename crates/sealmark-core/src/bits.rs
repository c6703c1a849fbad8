//! Byte <-> bit conversion for the pixel codec.
//!
//! Bits are LSB-first within each byte: bit index 0 is the least significant
//! bit of byte 0. The 32-bit length prefix uses the same ordering.

use crate::error::{CoreError, Result};

/// Number of bits in the length prefix.
pub const LENGTH_BITS: usize = 32;

/// An ordered, finite sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream(Vec<bool>);

impl BitStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the bits.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decompose a 32-bit length, LSB first.
pub fn encode_length(n: u32) -> [bool; LENGTH_BITS] {
    let mut bits = [false; LENGTH_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (n >> i) & 1 == 1;
    }
    bits
}

/// Inverse of [`encode_length`].
pub fn decode_length(bits: &[bool; LENGTH_BITS]) -> u32 {
    bits.iter()
        .enumerate()
        .fold(0u32, |acc, (i, &bit)| acc | (u32::from(bit) << i))
}

/// Decompose bytes, LSB first per byte, in byte order.
pub fn encode_bytes(bytes: &[u8]) -> BitStream {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// Reassemble `byte_count` bytes from the front of `bits`.
///
/// Extra trailing bits are ignored.
pub fn decode_bytes(bits: &[bool], byte_count: usize) -> Result<Vec<u8>> {
    let expected_bits = byte_count
        .checked_mul(8)
        .ok_or(CoreError::TruncatedData {
            expected_bits: usize::MAX,
            actual_bits: bits.len(),
        })?;
    if bits.len() < expected_bits {
        return Err(CoreError::TruncatedData {
            expected_bits,
            actual_bits: bits.len(),
        });
    }

    Ok(bits[..expected_bits]
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << i))
        })
        .collect())
}
