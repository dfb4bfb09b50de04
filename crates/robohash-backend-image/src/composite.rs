//! Layer compositing.
//!
//! Layers are drawn in order at the origin. The first layer is the canvas;
//! every later layer is blended onto it with source-over alpha and clipped
//! to the canvas bounds. There is no scaling or alignment.

use crate::error::RenderError;
use crate::layer::RgbaLayer;

/// Blends `src` over `dst` (straight alpha, integer math).
#[inline]
pub fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst[3] as u32;
    let inv = 255 - sa;

    // alpha scaled by 255
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = src[c] as u32 * sa * 255 + dst[c] as u32 * da * inv;
        out[c] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

/// Draws `layer` onto `canvas` at (0, 0).
pub fn paste_over(canvas: &mut RgbaLayer, layer: &RgbaLayer) {
    let width = canvas.width.min(layer.width);
    let height = canvas.height.min(layer.height);
    for y in 0..height {
        for x in 0..width {
            let blended = blend_over(canvas.get(x, y), layer.get(x, y));
            canvas.set(x, y, blended);
        }
    }
}

/// Composites `layers` in order; later layers paint over earlier ones.
pub fn composite<I>(layers: I) -> Result<RgbaLayer, RenderError>
where
    I: IntoIterator<Item = RgbaLayer>,
{
    let mut layers = layers.into_iter();
    let mut canvas = layers.next().ok_or(RenderError::EmptySelection)?;
    for layer in layers {
        paste_over(&mut canvas, &layer);
    }
    Ok(canvas)
}
