//! LSB embedding of bit streams into RGBA pixel data.
//!
//! Layout (pixel indices are row-major):
//! - Pixels `0..32`: one length bit each, in the red channel's bit 0
//! - Pixels `32..`: three data bits each, in red, green, blue bit 0 (in that order)
//! - Alpha is never touched, nor are bits 1-7 of any channel
//!
//! A grid of `n >= 32` pixels holds `floor(3 * (n - 32) / 8)` payload bytes.

use crate::bits::{self, BitStream, LENGTH_BITS};
use crate::error::{CoreError, Result};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Pixels consumed by the length prefix.
pub const LENGTH_PIXELS: usize = LENGTH_BITS;

/// Data bits stored per pixel after the length prefix.
pub const DATA_BITS_PER_PIXEL: usize = 3;

/// A width x height grid of 8-bit RGBA pixels, row-major.
///
/// The codec mutates pixel values in place but never resizes the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a fully transparent black grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Wrap a decoded RGBA buffer.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(CHANNELS))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(CoreError::InvalidPixelFormat {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Get a pixel's RGBA value.
    pub fn pixel(&self, index: usize) -> Option<[u8; 4]> {
        let start = index.checked_mul(CHANNELS)?;
        let end = start.checked_add(CHANNELS)?;
        let px = self.data.get(start..end)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite a pixel. Returns `false` if the index is out of range.
    pub fn set_pixel(&mut self, index: usize, rgba: [u8; 4]) -> bool {
        let Some(end) = index
            .checked_mul(CHANNELS)
            .and_then(|start| start.checked_add(CHANNELS))
        else {
            return false;
        };
        match self.data.get_mut(end - CHANNELS..end) {
            Some(px) => {
                px.copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    /// Borrow the raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw RGBA bytes (for an image encoder).
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn channel_lsb(&self, pixel: usize, channel: usize) -> bool {
        self.data[pixel * CHANNELS + channel] & 1 == 1
    }

    fn set_channel_lsb(&mut self, pixel: usize, channel: usize, bit: bool) {
        let byte = &mut self.data[pixel * CHANNELS + channel];
        *byte = (*byte & 0xFE) | u8::from(bit);
    }
}

/// Pixels needed to hold a payload of `byte_len` bytes plus the length prefix.
pub fn required_pixels(byte_len: usize) -> u64 {
    LENGTH_PIXELS as u64 + data_pixels((byte_len as u64).saturating_mul(8))
}

/// Payload bytes a grid of `pixel_count` pixels can hold.
pub fn capacity_bytes(pixel_count: usize) -> u64 {
    let data_pixels = pixel_count.saturating_sub(LENGTH_PIXELS) as u64;
    data_pixels * DATA_BITS_PER_PIXEL as u64 / 8
}

fn data_pixels(bit_count: u64) -> u64 {
    bit_count.div_ceil(DATA_BITS_PER_PIXEL as u64)
}

/// Map a data bit index to its (pixel, channel) position.
fn data_position(bit_index: usize) -> (usize, usize) {
    (
        LENGTH_PIXELS + bit_index / DATA_BITS_PER_PIXEL,
        bit_index % DATA_BITS_PER_PIXEL,
    )
}

/// Embed a length prefix and data bits into the grid.
///
/// Fails with [`CoreError::Capacity`] before touching any pixel if the grid
/// is too small.
pub fn embed(
    grid: &mut PixelGrid,
    length_bits: &[bool; LENGTH_BITS],
    data_bits: &BitStream,
) -> Result<()> {
    let required = LENGTH_PIXELS as u64 + data_pixels(data_bits.len() as u64);
    let available = grid.pixel_count() as u64;
    if required > available {
        return Err(CoreError::Capacity {
            required_pixels: required,
            available_pixels: available,
        });
    }

    for (pixel, &bit) in length_bits.iter().enumerate() {
        grid.set_channel_lsb(pixel, 0, bit);
    }

    for (i, bit) in data_bits.iter().enumerate() {
        let (pixel, channel) = data_position(i);
        grid.set_channel_lsb(pixel, channel, bit);
    }

    Ok(())
}

/// Embed a byte sequence with its length prefix.
pub fn embed_bytes(grid: &mut PixelGrid, bytes: &[u8]) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| CoreError::Capacity {
        required_pixels: required_pixels(bytes.len()),
        available_pixels: grid.pixel_count() as u64,
    })?;
    embed(grid, &bits::encode_length(len), &bits::encode_bytes(bytes))
}

/// Read the 32-bit length prefix.
pub fn read_length(grid: &PixelGrid) -> Result<u32> {
    if grid.pixel_count() < LENGTH_PIXELS {
        return Err(CoreError::Capacity {
            required_pixels: LENGTH_PIXELS as u64,
            available_pixels: grid.pixel_count() as u64,
        });
    }

    let mut length_bits = [false; LENGTH_BITS];
    for (pixel, bit) in length_bits.iter_mut().enumerate() {
        *bit = grid.channel_lsb(pixel, 0);
    }
    Ok(bits::decode_length(&length_bits))
}

/// Extract the length-prefixed byte sequence.
///
/// The declared length is checked against the grid's capacity before any
/// output buffer is allocated.
pub fn extract(grid: &PixelGrid) -> Result<Vec<u8>> {
    let len = read_length(grid)? as usize;

    let required = required_pixels(len);
    let available = grid.pixel_count() as u64;
    if required > available {
        return Err(CoreError::Capacity {
            required_pixels: required,
            available_pixels: available,
        });
    }

    let data_bits: BitStream = (0..len * 8)
        .map(|i| {
            let (pixel, channel) = data_position(i);
            grid.channel_lsb(pixel, channel)
        })
        .collect();

    bits::decode_bytes(data_bits.as_slice(), len)
}
