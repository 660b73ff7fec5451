// Spotlight overlay: a dimmed scrim with an animated cut-out that highlights
// one target at a time, rendered into a software framebuffer.
//
// Usage:
// let mut view = SpotlightView::new(800, 600, 0xCC00_0000, None)?;
// view.start_spotlight(Duration::from_millis(300), easing::linear, Box::new(()));
// view.turn_up(Target::builder().anchor(Point::new(100.0, 80.0)).build(), Box::new(()));
// while view.advance(frame_dt) {
//     view.draw();
//     view.composite(&screen, &mut out)?;
// }

pub mod animator;
pub mod canvas;
pub mod config;
pub mod easing;
pub mod error;
pub mod gamma;
pub mod shape;
pub mod target;
pub mod types;
pub mod view;

pub use animator::{AnimatorListener, AnimatorState, ValueAnimator};
pub use canvas::{BlendMode, Canvas, Paint};
pub use config::SpotlightConfig;
pub use error::{Error, Result};
pub use shape::{Circle, RoundedRectangle, Shape};
pub use target::{Target, TargetBuilder};
pub use types::{FrameBuffer, Point};
pub use view::{OnSpotlightListener, SpotlightView};
