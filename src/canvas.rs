// Off-screen drawing layer for the overlay.
//
// The scrim and the punch-out are drawn into a `Canvas` that belongs to the
// view alone. `BlendMode::Clear` only lowers alpha inside this layer; the
// screen underneath is touched later, by `Canvas::composite_onto`, so an
// erase can never reach pixels outside the overlay.
//
// Pixels are straight-alpha `0xAARRGGBB`. Edge pixels get fractional
// coverage, so the spotlight rim is anti-aliased.

use crate::error::{Error, Result};
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Point, channels};

/// How a fill combines with what is already in the layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint the color over existing pixels.
    #[default]
    SrcOver,
    /// Erase existing pixels toward full transparency; the paint color is ignored.
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub color: u32,
    pub blend: BlendMode,
}

impl Paint {
    pub const fn fill(color: u32) -> Self {
        Self { color, blend: BlendMode::SrcOver }
    }

    /// Paint used for punching holes into the scrim.
    pub const fn eraser() -> Self {
        Self { color: 0, blend: BlendMode::Clear }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(0xFF00_0000)
    }
}

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptySurface { width, height });
        }
        Ok(Self { width, height, pixels: vec![0; width * height] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the layer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Fill `[left, right) x [top, bottom)`; partially covered pixels get area coverage.
    pub fn fill_rect(&mut self, left: f32, top: f32, right: f32, bottom: f32, paint: &Paint) {
        if right <= left || bottom <= top {
            return;
        }
        self.for_each_in_bounds(left, top, right, bottom, paint, |px, py| {
            let cover_x = (right.min(px + 1.0) - left.max(px)).clamp(0.0, 1.0);
            let cover_y = (bottom.min(py + 1.0) - top.max(py)).clamp(0.0, 1.0);
            cover_x * cover_y
        });
    }

    /// Fill a disc. A non-positive radius draws nothing.
    pub fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = (center.x, center.y);
        self.for_each_in_bounds(cx - radius, cy - radius, cx + radius, cy + radius, paint, |px, py| {
            let dx = px + 0.5 - cx;
            let dy = py + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            (radius - d + 0.5).clamp(0.0, 1.0)
        });
    }

    /// Fill a rounded rectangle centered on `center`. The corner radius is
    /// clamped to the smaller half-extent; empty extents draw nothing.
    pub fn fill_round_rect(
        &mut self,
        center: Point,
        half_width: f32,
        half_height: f32,
        corner_radius: f32,
        paint: &Paint,
    ) {
        if half_width <= 0.0 || half_height <= 0.0 {
            return;
        }
        let r = corner_radius.clamp(0.0, half_width.min(half_height));
        let (cx, cy) = (center.x, center.y);
        self.for_each_in_bounds(
            cx - half_width,
            cy - half_height,
            cx + half_width,
            cy + half_height,
            paint,
            |px, py| {
                // signed distance to a rounded box
                let qx = (px + 0.5 - cx).abs() - half_width + r;
                let qy = (py + 0.5 - cy).abs() - half_height + r;
                let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
                let inside = qx.max(qy).min(0.0);
                (0.5 - (outside + inside - r)).clamp(0.0, 1.0)
            },
        );
    }

    /// Blend this layer over `screen` with an extra `opacity`, writing `out`.
    /// Both buffers must match the layer size.
    pub fn composite_onto(
        &self,
        screen: &FrameBuffer,
        out: &mut FrameBuffer,
        opacity: f32,
        lut: &GammaLut,
    ) -> Result<()> {
        screen.ensure_same_size(self.width, self.height)?;
        out.ensure_same_size(self.width, self.height)?;
        let opacity = opacity.clamp(0.0, 1.0);

        for ((dst, &under), &over) in out.pixels.iter_mut().zip(&screen.pixels).zip(&self.pixels) {
            let (a, r, g, b) = channels(over);
            let t = a as f32 / 255.0 * opacity;
            let (_, ur, ug, ub) = channels(under);
            let nr = lut.mix_u8(ur, r, t) as u32;
            let ng = lut.mix_u8(ug, g, t) as u32;
            let nb = lut.mix_u8(ub, b, t) as u32;
            *dst = (nr << 16) | (ng << 8) | nb;
        }
        Ok(())
    }

    /// Visit every pixel whose square touches the bounding box, apply the paint
    /// with the coverage returned by `coverage(px, py)` (pixel corner coords).
    fn for_each_in_bounds(
        &mut self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        paint: &Paint,
        coverage: impl Fn(f32, f32) -> f32,
    ) {
        let x0 = left.floor().max(0.0) as usize;
        let y0 = top.floor().max(0.0) as usize;
        let x1 = (right.ceil().max(0.0) as usize).min(self.width);
        let y1 = (bottom.ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage(x as f32, y as f32);
                if c <= 0.0 {
                    continue;
                }
                let idx = y * self.width + x;
                self.pixels[idx] = blend_pixel(self.pixels[idx], paint, c);
            }
        }
    }
}

/// Apply `paint` to one straight-alpha pixel at coverage `c` in (0, 1].
#[inline]
fn blend_pixel(dst: u32, paint: &Paint, c: f32) -> u32 {
    let (da, dr, dg, db) = channels(dst);
    match paint.blend {
        BlendMode::Clear => {
            let na = (da as f32 * (1.0 - c)).round() as u32;
            if na == 0 {
                0
            } else {
                (na << 24) | (dst & 0x00FF_FFFF)
            }
        }
        BlendMode::SrcOver => {
            let (sa, sr, sg, sb) = channels(paint.color);
            let sa = sa as f32 / 255.0 * c;
            let da = da as f32 / 255.0;
            let oa = sa + da * (1.0 - sa);
            if oa <= 0.0 {
                return 0;
            }
            let mix = |s: u8, d: u8| {
                ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa).round().clamp(0.0, 255.0) as u32
            };
            let a = (oa * 255.0).round().clamp(0.0, 255.0) as u32;
            (a << 24) | (mix(sr, dr) << 16) | (mix(sg, dg) << 8) | mix(sb, db)
        }
    }
}
