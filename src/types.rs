// Core types shared by the view, the layer canvas and the demo window.

use crate::error::{Error, Result};

/// What the window shows: one `0x00RRGGBB` entry per pixel (minifb layout).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame filled with one color.
    pub fn filled(width: usize, height: usize, rgb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb & 0x00FF_FFFF; width * height],
        }
    }

    /// Fails with `SizeMismatch` unless both buffers share dimensions, or
    /// `PixelCount` when `pixels` does not hold exactly `width * height` entries.
    pub fn ensure_same_size(&self, width: usize, height: usize) -> Result<()> {
        if self.pixels.len() != self.width * self.height {
            return Err(Error::PixelCount {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            });
        }
        if self.width != width || self.height != height {
            return Err(Error::SizeMismatch {
                expected: (width, height),
                actual: (self.width, self.height),
            });
        }
        Ok(())
    }
}

/// Anchor coordinate in view pixels. Pixel centers sit at `x + 0.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/* ---------- 0xAARRGGBB helpers ---------- */

#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub const fn alpha_of(c: u32) -> u8 {
    (c >> 24) as u8
}

/// Split into (a, r, g, b).
#[inline]
pub const fn channels(c: u32) -> (u8, u8, u8, u8) {
    ((c >> 24) as u8, (c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB`. The leading `#` is optional.
pub fn parse_color(text: &str) -> Result<u32> {
    let hex = text.trim().trim_start_matches('#');
    let bad = || Error::InvalidColor(text.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | value),
        8 => Ok(value),
        _ => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_as_opaque() {
        assert_eq!(parse_color("#102030").unwrap(), 0xFF10_2030);
        assert_eq!(parse_color("cc000000").unwrap(), 0xCC00_0000);
    }

    #[test]
    fn rejects_garbage_colors() {
        assert!(matches!(parse_color("#12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("#GG0000"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("#+1234567"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn channel_split_matches_pack() {
        let c = argb(0x80, 1, 2, 3);
        assert_eq!(channels(c), (0x80, 1, 2, 3));
        assert_eq!(alpha_of(c), 0x80);
    }

    #[test]
    fn size_check_reports_both_sides() {
        let fb = FrameBuffer::filled(4, 3, 0);
        assert!(fb.ensure_same_size(4, 3).is_ok());
        match fb.ensure_same_size(5, 3) {
            Err(Error::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, (5, 3));
                assert_eq!(actual, (4, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn size_check_rejects_short_pixel_vec() {
        let mut fb = FrameBuffer::filled(4, 3, 0);
        fb.pixels.truncate(10);
        match fb.ensure_same_size(4, 3) {
            Err(Error::PixelCount { width, height, len }) => {
                assert_eq!((width, height, len), (4, 3, 10));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
