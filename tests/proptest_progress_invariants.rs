// Property tests for progress-driven drawing and animator timing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use spotlight_overlay::easing::{self, Interpolator};
use spotlight_overlay::types::alpha_of;
use spotlight_overlay::{
    Canvas, Circle, OnSpotlightListener, Paint, Point, RoundedRectangle, Shape, SpotlightView,
    Target, ValueAnimator,
};

const SCRIM: u32 = 0xB020_2020;
const CURVES: [Interpolator; 4] = [
    easing::linear,
    easing::accelerate,
    easing::decelerate,
    easing::accelerate_decelerate,
];

fn erased(shape: &dyn Shape, point: Point, progress: f32) -> Canvas {
    let mut c = Canvas::new(64, 64).unwrap();
    c.fill_rect(0.0, 0.0, 64.0, 64.0, &Paint::fill(SCRIM));
    shape.draw(&mut c, point, progress, &Paint::eraser());
    c
}

fn total_alpha(c: &Canvas) -> u64 {
    c.pixels().iter().map(|&p| alpha_of(p) as u64).sum()
}

struct CountClicks(Rc<Cell<u32>>);

impl OnSpotlightListener for CountClicks {
    fn on_spotlight_view_clicked(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

proptest! {
    #[test]
    fn erasing_never_adds_coverage(
        progress in 0.0f32..=1.0,
        x in 0.0f32..64.0,
        y in 0.0f32..64.0,
        radius in 1.0f32..40.0,
    ) {
        let c = erased(&Circle::new(radius), Point::new(x, y), progress);
        for &p in c.pixels() {
            prop_assert!(alpha_of(p) <= alpha_of(SCRIM));
            // color channels are never rewritten by a clear
            prop_assert!(p == 0 || p & 0x00FF_FFFF == SCRIM & 0x00FF_FFFF);
        }
    }

    #[test]
    fn zero_progress_draws_no_hole(
        x in -10.0f32..74.0,
        y in -10.0f32..74.0,
        w in 1.0f32..80.0,
        h in 1.0f32..80.0,
    ) {
        let point = Point::new(x, y);
        let circle = erased(&Circle::new(w), point, 0.0);
        let rect = erased(&RoundedRectangle::new(w, h, 4.0), point, 0.0);
        prop_assert!(circle.pixels().iter().all(|&p| p == SCRIM));
        prop_assert!(rect.pixels().iter().all(|&p| p == SCRIM));
    }

    #[test]
    fn hole_grows_monotonically(
        a in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
        w in 4.0f32..60.0,
        h in 4.0f32..60.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let shape = RoundedRectangle::new(w, h, 6.0);
        let point = Point::new(32.0, 32.0);
        let small = total_alpha(&erased(&shape, point, lo));
        let large = total_alpha(&erased(&shape, point, hi));
        prop_assert!(large <= small, "lo={lo} hi={hi} small={small} large={large}");
    }

    #[test]
    fn animator_stays_in_range_and_lands_on_target(
        steps in prop::collection::vec(0u64..50, 1..40),
        duration_ms in 1u64..500,
        curve in 0usize..4,
    ) {
        let duration = Duration::from_millis(duration_ms);
        let mut a = ValueAnimator::of_float(0.0, 1.0)
            .with_duration(duration)
            .with_interpolator(CURVES[curve]);
        a.start();
        let mut elapsed = 0;
        for dt in steps {
            a.tick(Duration::from_millis(dt));
            elapsed += dt;
            let v = a.animated_value();
            prop_assert!((-1e-5..=1.0 + 1e-5).contains(&v), "value {v}");
            prop_assert_eq!(a.is_running(), elapsed < duration_ms);
        }
        if elapsed >= duration_ms {
            prop_assert_eq!(a.animated_value(), 1.0);
        }
    }

    #[test]
    fn click_forwarded_only_when_settled_open(
        reveal_ms in 0u64..200,
        retract in any::<bool>(),
    ) {
        let clicks = Rc::new(Cell::new(0));
        let mut view =
            SpotlightView::new(32, 32, SCRIM, Some(Box::new(CountClicks(clicks.clone())))).unwrap();
        let target = Target::builder()
            .anchor(Point::new(16.0, 16.0))
            .shape(Circle::new(8.0))
            .interpolator(easing::linear)
            .duration(Duration::from_millis(100))
            .build();
        view.turn_up(target, Box::new(()));
        view.advance(Duration::from_millis(reveal_ms));
        if retract && reveal_ms >= 100 {
            view.turn_down(Box::new(()));
            view.advance(Duration::from_millis(100));
        }
        let settled_open = reveal_ms >= 100 && !retract;
        prop_assert_eq!(view.on_click(), settled_open);
        prop_assert_eq!(clicks.get(), u32::from(settled_open));
    }
}
