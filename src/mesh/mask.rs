use crate::{
    assets::raster::Raster,
    foundation::{
        core::Bounds,
        error::{WarpError, WarpResult},
    },
};

/// Boolean solid/empty classification of a raster's alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    solid: Vec<bool>,
}

/// Tight inclusive pixel bounds of the solid region.
///
/// Extents are measured as `max - min`, so a lone pixel or a one-pixel line has zero area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskBounds {
    /// Leftmost solid column.
    pub min_x: u32,
    /// Topmost solid row.
    pub min_y: u32,
    /// Rightmost solid column.
    pub max_x: u32,
    /// Bottommost solid row.
    pub max_y: u32,
}

impl MaskBounds {
    /// `max_x - min_x`.
    pub fn width(self) -> u32 {
        self.max_x - self.min_x
    }

    /// `max_y - min_y`.
    pub fn height(self) -> u32 {
        self.max_y - self.min_y
    }

    /// `width * height`.
    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// As floating point `{x, y, w, h}` bounds.
    pub fn to_bounds(self) -> Bounds {
        Bounds::new(
            f64::from(self.min_x),
            f64::from(self.min_y),
            f64::from(self.width()),
            f64::from(self.height()),
        )
    }
}

impl AlphaMask {
    /// A pixel is solid iff its alpha is `>= threshold`.
    pub fn from_raster(raster: &Raster, threshold: u8) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            solid: raster.alpha_values().map(|a| a >= threshold).collect(),
        }
    }

    /// Build from a normalized `0..=1` alpha plane, compared against `threshold / 255`.
    pub fn from_alpha_f32(
        width: u32,
        height: u32,
        alpha: &[f32],
        threshold: u8,
    ) -> WarpResult<Self> {
        if width == 0 || height == 0 {
            return Err(WarpError::validation("alpha plane dimensions must be non-zero"));
        }
        if alpha.len() != (width as usize) * (height as usize) {
            return Err(WarpError::validation(
                "alpha plane length must equal width*height",
            ));
        }
        let t = f32::from(threshold);
        Ok(Self {
            width,
            height,
            solid: alpha
                .iter()
                .map(|&a| a.is_finite() && a.clamp(0.0, 1.0) * 255.0 >= t)
                .collect(),
        })
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Solid test with out-of-raster coordinates reported as empty.
    pub fn is_solid(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        self.solid[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Number of solid pixels.
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Tight bounds of all solid pixels, or `None` when nothing is solid.
    pub fn bounds(&self) -> Option<MaskBounds> {
        let w = self.width as usize;
        let mut out: Option<MaskBounds> = None;
        for (i, _) in self.solid.iter().enumerate().filter(|(_, s)| **s) {
            let (x, y) = ((i % w) as u32, (i / w) as u32);
            out = Some(match out {
                None => MaskBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => MaskBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/mask.rs"]
mod tests;
