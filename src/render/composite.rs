use crate::foundation::math::mul_div255_u8;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8Px = [u8; 4];

/// Composite `src` onto `dst`: color blends by `src` alpha, alpha keeps the max of both.
///
/// Color is normalized by the combined coverage so the result stays straight alpha;
/// a fully transparent `dst` contributes no color.
pub fn blend_max_alpha(dst: Rgba8Px, src: Rgba8Px) -> Rgba8Px {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let src_w = u32::from(sa);
    let dst_w = u32::from(mul_div255_u8(u16::from(dst[3]), 255 - sa));
    let total = src_w + dst_w;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
        out[i] = ((c + total / 2) / total).min(255) as u8;
    }
    out[3] = dst[3].max(src[3]);
    out
}

/// Alpha-weighted bilinear blend of four straight-alpha texels.
///
/// `weights` are the bilinear factors for `[top_left, top_right, bottom_left, bottom_right]`.
/// Color is interpolated premultiplied and converted back so transparent texels add no tint.
pub fn bilinear_mix(texels: [Rgba8Px; 4], weights: [f64; 4]) -> Rgba8Px {
    let mut alpha = 0.0;
    let mut color = [0.0f64; 3];
    for (px, w) in texels.iter().zip(weights) {
        let a = f64::from(px[3]) * w;
        alpha += a;
        for (c, &v) in color.iter_mut().zip(&px[..3]) {
            *c += f64::from(v) * a;
        }
    }
    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    [
        to_u8(color[0] / alpha),
        to_u8(color[1] / alpha),
        to_u8(color[2] / alpha),
        to_u8(alpha),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
