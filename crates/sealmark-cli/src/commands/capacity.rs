//! Capacity command - report how much an image can carry

use sealmark::core::pixels;

/// Payload bytes a `width` x `height` image can hold.
pub fn capacity(width: u32, height: u32) -> u64 {
    pixels::capacity_bytes(width as usize * height as usize)
}

pub fn run(width: u32, height: u32) {
    println!(
        "{}x{}: {} bytes ({} pixels)",
        width,
        height,
        capacity(width, height),
        width as u64 * height as u64
    );
}
