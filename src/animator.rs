// Time-driven float animator.
//
// A `ValueAnimator` interpolates between two floats over a duration. It does
// not own a clock: the caller advances it with `ValueAnimator::tick`, which
// is how the view's frame pump drives it. Every value change is published on
// an update channel as a `FrameUpdate` tagged with the animator's
// generation, so the receiver can drop updates from animators it has already
// replaced.
//
// # Invariants
//
// - `animated_value()` stays between `from` and `to` for curves that map
//   [0, 1] into [0, 1].
// - An animator that ends reports exactly `to`, regardless of curve rounding.
// - `on_animation_end` and `on_animation_cancel` fire at most once, and never
//   both.
// - A cancelled or ended animator publishes nothing further.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::easing::{self, Interpolator};

/// Lifecycle callbacks. All methods default to no-ops.
pub trait AnimatorListener {
    fn on_animation_start(&mut self) {}
    fn on_animation_end(&mut self) {}
    fn on_animation_cancel(&mut self) {}
    /// Part of the listener contract; animators here never repeat.
    fn on_animation_repeat(&mut self) {}
}

/// Listener that ignores every callback.
impl AnimatorListener for () {}

/// Which view property an update is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Opacity,
    Progress,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub channel: Channel,
    pub generation: u64,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimatorState {
    #[default]
    Idle,
    Running,
    Ended,
    Cancelled,
}

struct UpdateSink {
    channel: Channel,
    tx: Sender<FrameUpdate>,
}

pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    interpolator: Interpolator,
    elapsed: Duration,
    value: f32,
    state: AnimatorState,
    generation: u64,
    sink: Option<UpdateSink>,
    listeners: Vec<Box<dyn AnimatorListener>>,
}

impl std::fmt::Debug for ValueAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueAnimator")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl ValueAnimator {
    /// Animator from `from` to `to`; 300 ms linear until configured.
    #[must_use]
    pub fn of_float(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            duration: Duration::from_millis(300),
            interpolator: easing::linear,
            elapsed: Duration::ZERO,
            value: from,
            state: AnimatorState::Idle,
            generation: 0,
            sink: None,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Publish every value change on `tx`, tagged with `channel` and `generation`.
    #[must_use]
    pub fn publish_to(mut self, channel: Channel, generation: u64, tx: Sender<FrameUpdate>) -> Self {
        self.generation = generation;
        self.sink = Some(UpdateSink { channel, tx });
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn AnimatorListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn animated_value(&self) -> f32 {
        self.value
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin running: fires `on_animation_start` and publishes the first value.
    /// Starting an animator that is not idle does nothing.
    pub fn start(&mut self) {
        if self.state != AnimatorState::Idle {
            return;
        }
        self.state = AnimatorState::Running;
        self.elapsed = Duration::ZERO;
        for l in &mut self.listeners {
            l.on_animation_start();
        }
        self.set_fraction(0.0);
    }

    /// Advance by `dt`. Returns true while the animator is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.value = self.to;
            self.publish();
            self.state = AnimatorState::Ended;
            tracing::trace!(generation = self.generation, "animator ended");
            for l in &mut self.listeners {
                l.on_animation_end();
            }
            return false;
        }
        let fraction = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.set_fraction(fraction);
        true
    }

    /// Stop where it is. Only a running animator reports the cancellation.
    pub fn cancel(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = AnimatorState::Cancelled;
        self.sink = None;
        tracing::trace!(generation = self.generation, value = self.value, "animator cancelled");
        for l in &mut self.listeners {
            l.on_animation_cancel();
        }
    }

    fn set_fraction(&mut self, fraction: f32) {
        let eased = (self.interpolator)(fraction.clamp(0.0, 1.0));
        self.value = self.from + (self.to - self.from) * eased;
        self.publish();
    }

    fn publish(&mut self) {
        let Some(sink) = &self.sink else { return };
        let update = FrameUpdate {
            channel: sink.channel,
            generation: self.generation,
            value: self.value,
        };
        if sink.tx.send(update).is_err() {
            // receiver is gone; nobody will redraw anymore
            self.sink = None;
        }
    }
}
