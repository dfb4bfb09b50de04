//! Output sizing.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use robohash_core::config::{MAX_SIDE, MIN_SIDE};

use crate::error::RenderError;
use crate::layer::RgbaLayer;

/// Output width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses `WxH` where each side is 2 or 3 digits.
    pub fn parse(s: &str) -> Result<Self, RenderError> {
        let invalid = || RenderError::InvalidDimensions(format!("'{}' is not WxH", s));
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let side = |part: &str| -> Result<u32, RenderError> {
            if !(2..=3).contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        Self::checked(side(w)?, side(h)?)
    }

    /// Builds a size, checking both sides are within the supported range.
    pub fn checked(width: u32, height: u32) -> Result<Self, RenderError> {
        for side in [width, height] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(RenderError::InvalidDimensions(format!(
                    "side {} outside {}..={}",
                    side, MIN_SIDE, MAX_SIDE
                )));
            }
        }
        Ok(Self { width, height })
    }
}

impl FromStr for Size {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resamples a layer to `size` with a Lanczos3 filter.
///
/// Returns a copy unchanged when the size already matches.
pub fn resize(layer: &RgbaLayer, size: Size) -> Result<RgbaLayer, RenderError> {
    if layer.width == size.width && layer.height == size.height {
        return Ok(layer.clone());
    }

    let src = RgbaImage::from_raw(layer.width, layer.height, layer.pixels.clone()).ok_or_else(
        || {
            RenderError::InvalidDimensions(format!(
                "buffer does not match {}x{}",
                layer.width, layer.height
            ))
        },
    )?;
    let out = imageops::resize(&src, size.width, size.height, FilterType::Lanczos3);
    RgbaLayer::from_raw(size.width, size.height, out.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sizes() {
        assert_eq!(Size::parse("200x200").unwrap(), Size::new(200, 200));
        assert_eq!(Size::parse("50x300").unwrap(), Size::new(50, 300));
        assert_eq!("64x64".parse::<Size>().unwrap().to_string(), "64x64");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["200", "x200", "1x10", "1000x10", "20x2000", "abxcd", "20 x20", "-20x20"] {
            assert!(Size::parse(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_resize_changes_dimensions() {
        let layer = RgbaLayer::filled(40, 40, [10, 20, 30, 255]);
        let out = resize(&layer, Size::new(20, 10)).unwrap();
        assert_eq!((out.width, out.height), (20, 10));
        assert_eq!(out.pixels.len(), 20 * 10 * 4);
        // Uniform input stays uniform.
        assert_eq!(out.get(5, 5), [10, 20, 30, 255]);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let mut layer = RgbaLayer::transparent(12, 12);
        layer.set(1, 1, [1, 2, 3, 4]);
        assert_eq!(resize(&layer, Size::new(12, 12)).unwrap(), layer);
    }
}
