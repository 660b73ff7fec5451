// Spotlight hole geometry.
//
// A `Shape` draws itself with the paint it is given; the view hands it the
// eraser paint, so whatever the shape fills becomes the hole. `progress` is
// the reveal fraction, and each shape decides how it maps to size.

use std::fmt::Debug;

use crate::canvas::{Canvas, Paint};
use crate::types::Point;

pub trait Shape: Debug {
    fn draw(&self, canvas: &mut Canvas, point: Point, progress: f32, paint: &Paint);
}

/// Disc whose radius grows linearly with progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Shape for Circle {
    fn draw(&self, canvas: &mut Canvas, point: Point, progress: f32, paint: &Paint) {
        canvas.fill_circle(point, self.radius * progress, paint);
    }
}

/// Rounded rectangle centered on the anchor. Width and height scale with
/// progress; the corner radius does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRectangle {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl RoundedRectangle {
    pub const fn new(width: f32, height: f32, radius: f32) -> Self {
        Self { width, height, radius }
    }
}

impl Shape for RoundedRectangle {
    fn draw(&self, canvas: &mut Canvas, point: Point, progress: f32, paint: &Paint) {
        let half_w = self.width / 2.0 * progress;
        let half_h = self.height / 2.0 * progress;
        canvas.fill_round_rect(point, half_w, half_h, self.radius, paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holes(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&p| p == 0).count()
    }

    fn scrim(w: usize, h: usize) -> Canvas {
        let mut c = Canvas::new(w, h).unwrap();
        c.fill_rect(0.0, 0.0, w as f32, h as f32, &Paint::fill(0xFF00_0000));
        c
    }

    #[test]
    fn circle_hole_grows_with_progress() {
        let shape = Circle::new(12.0);
        let mut sizes = Vec::new();
        for p in [0.0, 0.25, 0.5, 1.0] {
            let mut c = scrim(40, 40);
            shape.draw(&mut c, Point::new(20.0, 20.0), p, &Paint::eraser());
            sizes.push(holes(&c));
        }
        assert_eq!(sizes[0], 0);
        assert!(sizes.windows(2).all(|w| w[0] < w[1]), "{sizes:?}");
    }

    #[test]
    fn rounded_rectangle_full_size_matches_extent() {
        let shape = RoundedRectangle::new(20.0, 10.0, 2.0);
        let mut c = scrim(40, 40);
        shape.draw(&mut c, Point::new(20.0, 20.0), 1.0, &Paint::eraser());
        assert_eq!(c.pixel(10, 20), Some(0));
        assert_eq!(c.pixel(29, 20), Some(0));
        assert_eq!(c.pixel(20, 15), Some(0));
        assert_eq!(c.pixel(9, 20), Some(0xFF00_0000));
        assert_eq!(c.pixel(20, 25), Some(0xFF00_0000));
    }
}
