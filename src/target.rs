// A spot to highlight: where the hole goes, what it looks like, and how long
// the reveal takes. The view only reads targets; callers share them as Rc.

use std::rc::Rc;
use std::time::Duration;

use crate::easing::{self, Interpolator};
use crate::shape::{Circle, Shape};
use crate::types::Point;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_RADIUS: f32 = 100.0;

#[derive(Debug)]
pub struct Target {
    point: Point,
    shape: Box<dyn Shape>,
    interpolator: Interpolator,
    duration: Duration,
}

impl Target {
    pub fn builder() -> TargetBuilder {
        TargetBuilder::default()
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Builder with defaults: anchor at the origin, a 100px circle, 1s decelerate.
pub struct TargetBuilder {
    point: Point,
    shape: Box<dyn Shape>,
    interpolator: Interpolator,
    duration: Duration,
}

impl Default for TargetBuilder {
    fn default() -> Self {
        Self {
            point: Point::default(),
            shape: Box::new(Circle::new(DEFAULT_RADIUS)),
            interpolator: easing::decelerate,
            duration: DEFAULT_DURATION,
        }
    }
}

impl TargetBuilder {
    #[must_use]
    pub fn anchor(mut self, point: Point) -> Self {
        self.point = point;
        self
    }

    /// Anchor on the center of a `width x height` box whose top-left is (`x`, `y`).
    #[must_use]
    pub fn anchor_on_rect(self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.anchor(Point::new(x + width / 2.0, y + height / 2.0))
    }

    #[must_use]
    pub fn shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shape = Box::new(shape);
        self
    }

    #[must_use]
    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn build(self) -> Rc<Target> {
        Rc::new(Target {
            point: self.point,
            shape: self.shape,
            interpolator: self.interpolator,
            duration: self.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::RoundedRectangle;

    #[test]
    fn defaults_are_a_decelerating_circle() {
        let t = Target::builder().build();
        assert_eq!(t.point(), Point::new(0.0, 0.0));
        assert_eq!(t.duration(), DEFAULT_DURATION);
        assert_eq!(t.interpolator()(0.5), easing::decelerate(0.5));
        assert!(format!("{:?}", t.shape()).contains("Circle"));
    }

    #[test]
    fn rect_anchor_uses_center() {
        let t = Target::builder()
            .anchor_on_rect(10.0, 20.0, 30.0, 40.0)
            .shape(RoundedRectangle::new(30.0, 40.0, 6.0))
            .duration(Duration::from_millis(250))
            .build();
        assert_eq!(t.point(), Point::new(25.0, 40.0));
        assert_eq!(t.duration(), Duration::from_millis(250));
    }
}
