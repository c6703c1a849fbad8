//! CLI command implementations

pub mod capacity;
pub mod embed;
pub mod keygen;
pub mod verify;

use std::path::Path;

use anyhow::{bail, Context, Result};
use sealmark::core::pixels::CHANNELS;
use sealmark::PixelGrid;

/// Read a raw RGBA file, deriving the height from its length.
pub fn read_grid(path: &Path, width: u32) -> Result<PixelGrid> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let row_len = width as usize * CHANNELS;
    if row_len == 0 {
        bail!("width must be positive");
    }
    if data.len() % row_len != 0 {
        bail!(
            "{} holds {} bytes, not a whole number of {}-pixel RGBA rows",
            path.display(),
            data.len(),
            width
        );
    }
    let height = u32::try_from(data.len() / row_len).context("image is too tall")?;

    Ok(PixelGrid::from_rgba(width, height, data)?)
}

/// Write a grid back out as raw RGBA.
pub fn write_grid(path: &Path, grid: &PixelGrid) -> Result<()> {
    std::fs::write(path, grid.as_raw()).with_context(|| format!("writing {}", path.display()))
}
