// Interpolation curves.
//
// An `Interpolator` maps elapsed fraction `t` in [0, 1] to an eased fraction.
// Every stock curve satisfies `f(0) == 0` and `f(1) == 1`.

/// Easing curve applied to the elapsed fraction of an animation.
pub type Interpolator = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

/// Starts slow, ends fast (`t²`).
pub fn accelerate(t: f32) -> f32 {
    t * t
}

/// Starts fast, ends slow (`1 - (1 - t)⁴`, a factor-2 deceleration).
pub fn decelerate(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Slow at both ends, cosine shaped.
pub fn accelerate_decelerate(t: f32) -> f32 {
    ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
}
