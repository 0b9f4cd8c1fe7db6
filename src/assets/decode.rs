use std::path::Path;

use anyhow::Context;

use crate::{assets::raster::Raster, foundation::error::WarpResult};

/// Decode encoded image bytes into a straight-alpha RGBA8 raster.
pub fn decode_image(bytes: &[u8]) -> WarpResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Raster::from_image(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> WarpResult<Raster> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Write a raster as PNG, creating parent directories as needed.
pub fn save_png(raster: &Raster, path: &Path) -> WarpResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        raster.as_bytes(),
        raster.width(),
        raster.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Write a single-channel 8-bit buffer as a grayscale PNG.
pub fn save_luma_png(width: u32, height: u32, luma: &[u8], path: &Path) -> WarpResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        luma,
        width,
        height,
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> WarpResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
