use crate::foundation::{
    core::Rgba8,
    error::{WarpError, WarpResult},
};

/// Straight-alpha RGBA8 raster, row-major and tightly packed.
///
/// Used both as the warp source and as every rendered output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an RGBA8 buffer, validating dimensions against its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> WarpResult<Self> {
        let expected_len = expected_len(width, height)?;
        if data.len() != expected_len {
            return Err(WarpError::validation(format!(
                "raster buffer has {} bytes, expected {expected_len} for {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent raster of the given size.
    pub fn transparent(width: u32, height: u32) -> WarpResult<Self> {
        let len = expected_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Rgba8,
    ) -> WarpResult<Self> {
        let mut out = Self::transparent(width, height)?;
        for y in 0..height {
            for x in 0..width {
                out.put_pixel(x, y, f(x, y));
            }
        }
        Ok(out)
    }

    /// Convert from an `image` RGBA buffer.
    pub fn from_image(img: image::RgbaImage) -> WarpResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert into an `image` RGBA buffer.
    pub fn to_image(&self) -> WarpResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| WarpError::validation("raster buffer does not match its dimensions"))
    }

    /// A transparent raster with the same dimensions.
    pub(crate) fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: vec![0; self.data.len()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`. Coordinates must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.index(x, y);
        Rgba8::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    /// Alpha channel at `(x, y)`. Coordinates must be in bounds.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y) + 3]
    }

    /// Overwrite the pixel at `(x, y)`. Coordinates must be in bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px.to_array());
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its RGBA8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterator over the alpha channel in row-major order.
    pub fn alpha_values(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|px| px[3])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn expected_len(width: u32, height: u32) -> WarpResult<usize> {
    if width == 0 || height == 0 {
        return Err(WarpError::validation("raster dimensions must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| WarpError::validation("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
