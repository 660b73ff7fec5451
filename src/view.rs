// The spotlight overlay view.
//
// `SpotlightView` owns a full-screen off-screen layer. Each draw paints the
// scrim into that layer and, if a target is being revealed, lets the target's
// shape erase a hole in it with the clear paint. The layer is then blended
// over the screen with the view opacity.
//
// Two single-slot animators drive it: the fade (view opacity, used by
// `start_spotlight`/`finish_spotlight`) and the progress animator (hole size,
// used by `turn_up`/`turn_down`). Putting a new animator in a slot cancels
// the old one first. Animators publish frame updates on a channel that
// `SpotlightView::advance` drains; updates whose generation no longer
// matches the slot are dropped.

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::animator::{AnimatorListener, Channel, FrameUpdate, ValueAnimator};
use crate::canvas::{Canvas, Paint};
use crate::config::SpotlightConfig;
use crate::easing::Interpolator;
use crate::error::Result;
use crate::gamma::GammaLut;
use crate::target::Target;
use crate::types::FrameBuffer;

/// Receives taps on a fully revealed, idle overlay.
pub trait OnSpotlightListener {
    fn on_spotlight_view_clicked(&mut self);
}

pub struct SpotlightView {
    width: usize,
    height: usize,
    paint: Paint,
    spot_paint: Paint,
    layer: Canvas,
    lut: GammaLut,
    opacity: f32,
    fade: Option<ValueAnimator>,
    animator: Option<ValueAnimator>,
    current_target: Option<Rc<Target>>,
    generation: u64,
    updates_tx: Sender<FrameUpdate>,
    updates_rx: Receiver<FrameUpdate>,
    needs_redraw: bool,
    listener: Option<Box<dyn OnSpotlightListener>>,
}

impl std::fmt::Debug for SpotlightView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotlightView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opacity", &self.opacity)
            .field("progress", &self.progress())
            .field("current_target", &self.current_target)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl SpotlightView {
    /// A `width x height` overlay painted with `overlay_color` (`0xAARRGGBB`).
    /// Starts hidden: opacity 0, no target.
    pub fn new(
        width: usize,
        height: usize,
        overlay_color: u32,
        listener: Option<Box<dyn OnSpotlightListener>>,
    ) -> Result<Self> {
        let layer = Canvas::new(width, height)?;
        let (updates_tx, updates_rx) = mpsc::channel();
        Ok(Self {
            width,
            height,
            paint: Paint::fill(overlay_color),
            spot_paint: Paint::eraser(),
            layer,
            lut: GammaLut::new(),
            opacity: 0.0,
            fade: None,
            animator: None,
            current_target: None,
            generation: 0,
            updates_tx,
            updates_rx,
            needs_redraw: true,
            listener,
        })
    }

    pub fn from_config(
        config: &SpotlightConfig,
        listener: Option<Box<dyn OnSpotlightListener>>,
    ) -> Result<Self> {
        Self::new(config.width, config.height, config.overlay_color, listener)
    }

    /* ---------- Draw ---------- */

    /// Repaint the layer: scrim everywhere, then the target's hole if a
    /// progress animator and a target are both present.
    pub fn draw(&mut self) -> &Canvas {
        self.layer.clear();
        self.layer
            .fill_rect(0.0, 0.0, self.width as f32, self.height as f32, &self.paint);
        if let (Some(animator), Some(target)) = (&self.animator, &self.current_target) {
            target.shape().draw(
                &mut self.layer,
                target.point(),
                animator.animated_value(),
                &self.spot_paint,
            );
        }
        self.needs_redraw = false;
        &self.layer
    }

    /// Blend the last drawn layer over `screen` at the current opacity.
    pub fn composite(&self, screen: &FrameBuffer, out: &mut FrameBuffer) -> Result<()> {
        self.layer.composite_onto(screen, out, self.opacity, &self.lut)
    }

    /* ---------- Fade in / out ---------- */

    /// Fade the whole overlay in (opacity 0 to 1).
    pub fn start_spotlight(
        &mut self,
        duration: Duration,
        interpolator: Interpolator,
        listener: Box<dyn AnimatorListener>,
    ) {
        tracing::debug!(?duration, "start_spotlight");
        self.start_fade(0.0, 1.0, duration, interpolator, listener);
    }

    /// Fade the whole overlay out (opacity 1 to 0).
    pub fn finish_spotlight(
        &mut self,
        duration: Duration,
        interpolator: Interpolator,
        listener: Box<dyn AnimatorListener>,
    ) {
        tracing::debug!(?duration, "finish_spotlight");
        self.start_fade(1.0, 0.0, duration, interpolator, listener);
    }

    fn start_fade(
        &mut self,
        from: f32,
        to: f32,
        duration: Duration,
        interpolator: Interpolator,
        listener: Box<dyn AnimatorListener>,
    ) {
        let generation = self.next_generation();
        let mut fade = ValueAnimator::of_float(from, to)
            .with_duration(duration)
            .with_interpolator(interpolator)
            .publish_to(Channel::Opacity, generation, self.updates_tx.clone());
        fade.add_listener(listener);

        if let Some(mut old) = self.fade.take() {
            old.cancel();
        }
        self.fade.insert(fade).start();
        self.drain_updates();
    }

    /* ---------- Target reveal / retract ---------- */

    /// Make `target` current and grow its hole from nothing, using the
    /// target's own duration and curve. A running reveal/retract is cancelled.
    pub fn turn_up(&mut self, target: Rc<Target>, listener: Box<dyn AnimatorListener>) {
        tracing::debug!(point = ?target.point(), duration = ?target.duration(), "turn_up");
        self.current_target = Some(Rc::clone(&target));
        self.start_progress(0.0, 1.0, &target, listener);
    }

    /// Shrink the current target's hole to nothing. Without a current target
    /// this does nothing and `listener` is never called.
    pub fn turn_down(&mut self, listener: Box<dyn AnimatorListener>) {
        let Some(target) = self.current_target.clone() else {
            tracing::debug!("turn_down without a current target, ignored");
            return;
        };
        tracing::debug!(point = ?target.point(), "turn_down");
        self.start_progress(1.0, 0.0, &target, listener);
    }

    fn start_progress(
        &mut self,
        from: f32,
        to: f32,
        target: &Target,
        listener: Box<dyn AnimatorListener>,
    ) {
        let generation = self.next_generation();
        let mut animator = ValueAnimator::of_float(from, to)
            .with_duration(target.duration())
            .with_interpolator(target.interpolator())
            .publish_to(Channel::Progress, generation, self.updates_tx.clone());
        animator.add_listener(listener);

        if let Some(mut old) = self.animator.take() {
            old.cancel();
        }
        self.animator.insert(animator).start();
        self.drain_updates();
    }

    /* ---------- Frame pump ---------- */

    /// Advance running animators by `dt` and apply their updates.
    /// Returns true when the view needs a redraw.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if let Some(fade) = &mut self.fade {
            fade.tick(dt);
        }
        if let Some(animator) = &mut self.animator {
            animator.tick(dt);
        }
        self.drain_updates();
        self.needs_redraw
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            let live = match update.channel {
                Channel::Opacity => self.fade.as_ref(),
                Channel::Progress => self.animator.as_ref(),
            }
            .is_some_and(|a| a.generation() == update.generation);
            if !live {
                tracing::trace!(?update, "dropping stale frame update");
                continue;
            }
            if update.channel == Channel::Opacity {
                self.opacity = update.value;
            }
            self.needs_redraw = true;
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /* ---------- Input ---------- */

    /// Forward a tap to the listener if the reveal is idle and open.
    /// Returns whether the tap was forwarded.
    pub fn on_click(&mut self) -> bool {
        let settled = self
            .animator
            .as_ref()
            .is_some_and(|a| !a.is_running() && a.animated_value() > 0.0);
        if !settled {
            tracing::trace!("click swallowed");
            return false;
        }
        match &mut self.listener {
            Some(listener) => {
                listener.on_spotlight_view_clicked();
                true
            }
            None => false,
        }
    }

    /* ---------- Introspection ---------- */

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current reveal fraction, `None` before the first `turn_up`.
    pub fn progress(&self) -> Option<f32> {
        self.animator.as_ref().map(ValueAnimator::animated_value)
    }

    pub fn current_target(&self) -> Option<&Rc<Target>> {
        self.current_target.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.fade.as_ref().is_some_and(ValueAnimator::is_running)
            || self.animator.as_ref().is_some_and(ValueAnimator::is_running)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// The layer as of the last [`draw`](Self::draw).
    pub fn layer(&self) -> &Canvas {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing;
    use crate::shape::Circle;
    use crate::types::Point;
    use std::cell::Cell;

    struct Clicks(Rc<Cell<u32>>);

    impl OnSpotlightListener for Clicks {
        fn on_spotlight_view_clicked(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn view_with_clicks() -> (SpotlightView, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let view = SpotlightView::new(64, 48, 0xCC00_0000, Some(Box::new(Clicks(clicks.clone()))))
            .unwrap();
        (view, clicks)
    }

    fn target() -> Rc<Target> {
        Target::builder()
            .anchor(Point::new(32.0, 24.0))
            .shape(Circle::new(10.0))
            .interpolator(easing::linear)
            .duration(Duration::from_millis(100))
            .build()
    }

    #[test]
    fn starts_hidden_and_empty() {
        let (view, _) = view_with_clicks();
        assert_eq!(view.opacity(), 0.0);
        assert_eq!(view.progress(), None);
        assert!(view.current_target().is_none());
        assert!(!view.is_animating());
        assert!(view.needs_redraw());
    }

    #[test]
    fn draw_clears_redraw_flag_and_updates_raise_it() {
        let (mut view, _) = view_with_clicks();
        view.draw();
        assert!(!view.needs_redraw());
        view.turn_up(target(), Box::new(()));
        assert!(view.needs_redraw());
        view.draw();
        assert!(view.advance(Duration::from_millis(16)));
    }

    #[test]
    fn stale_updates_are_dropped() {
        let (mut view, _) = view_with_clicks();
        view.start_spotlight(Duration::from_millis(100), easing::linear, Box::new(()));
        // a frame from an animator that no longer owns the slot
        view.updates_tx
            .send(FrameUpdate { channel: Channel::Opacity, generation: 0, value: 0.75 })
            .unwrap();
        view.advance(Duration::ZERO);
        assert_eq!(view.opacity(), 0.0);
    }

    #[test]
    fn click_without_listener_is_not_forwarded() {
        let mut view = SpotlightView::new(8, 8, 0xFF00_0000, None).unwrap();
        view.turn_up(target(), Box::new(()));
        view.advance(Duration::from_millis(100));
        assert!(!view.on_click());
    }

    #[test]
    fn click_after_full_reveal_is_forwarded() {
        let (mut view, clicks) = view_with_clicks();
        view.turn_up(target(), Box::new(()));
        view.advance(Duration::from_millis(100));
        assert!(view.on_click());
        assert_eq!(clicks.get(), 1);
    }
}
