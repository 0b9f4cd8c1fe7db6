use crate::foundation::core::Point;

/// Below this magnitude a barycentric or circumcircle denominator marks the
/// triangle as degenerate.
pub(crate) const DEGENERATE_EPS: f64 = 1e-4;

/// SplitMix64 generator for seedable, platform-stable jitter.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform sample in `[-1, 1)`.
    pub(crate) fn next_signed(&mut self) -> f64 {
        self.next_f64_01() * 2.0 - 1.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Twice the signed area of `abc`; positive when counter-clockwise in a y-up frame.
pub(crate) fn signed_area2(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Shared denominator of [`barycentric`] (twice the signed area, sign depends on winding).
pub(crate) fn barycentric_denominator(a: Point, b: Point, c: Point) -> f64 {
    (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y)
}

/// Barycentric weights of `p` relative to `abc`.
///
/// Returns `None` for degenerate triangles instead of letting a near-zero
/// denominator push NaN or infinity into pixel or vertex buffers.
pub(crate) fn barycentric(p: Point, a: Point, b: Point, c: Point) -> Option<[f64; 3]> {
    let denom = barycentric_denominator(a, b, c);
    if denom.abs() < DEGENERATE_EPS {
        return None;
    }
    let w1 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let w2 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    Some([w1, w2, 1.0 - w1 - w2])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
