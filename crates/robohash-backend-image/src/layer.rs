//! RGBA8 pixel layers and PNG decoding.

use crate::error::RenderError;

/// An 8-bit RGBA image, row-major, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaLayer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl RgbaLayer {
    /// Creates a layer filled with one RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fully transparent layer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Wraps raw RGBA bytes, checking the length.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::InvalidDimensions(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// RGBA value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Sets the RGBA value at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Decodes a PNG of any color type into RGBA8.
    ///
    /// `label` names the asset in error messages.
    pub fn decode_png(bytes: &[u8], label: &str) -> Result<Self, RenderError> {
        let decode_err = |source| RenderError::PngDecode {
            token: label.to_string(),
            source,
        };

        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(decode_err)?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(decode_err)?;
        buf.truncate(info.buffer_size());

        let count = info.width as usize * info.height as usize;
        let pixels = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => expand(&buf, 3, count, |p| [p[0], p[1], p[2], 255]),
            png::ColorType::GrayscaleAlpha => expand(&buf, 2, count, |p| [p[0], p[0], p[0], p[1]]),
            png::ColorType::Grayscale => expand(&buf, 1, count, |p| [p[0], p[0], p[0], 255]),
            png::ColorType::Indexed => {
                return Err(RenderError::InvalidDimensions(format!(
                    "'{}': indexed PNG was not expanded",
                    label
                )))
            }
        };

        Self::from_raw(info.width, info.height, pixels)
    }
}

fn expand(buf: &[u8], channels: usize, count: usize, f: impl Fn(&[u8]) -> [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(count * 4);
    for px in buf.chunks_exact(channels).take(count) {
        out.extend_from_slice(&f(px));
    }
    out
}
