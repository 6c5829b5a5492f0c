/// Time-driven interpolation with explicit state.
///
/// A `Tween` moves from `from` to `to` as `advance(dt)` pushes its progress
/// `t` from 0 to 1 at `rate` per second.  Values follow a smooth-step curve.

use std::time::Duration;

/// Hermite smooth-step between `from` and `to`; `t` is clamped to `[0, 1]`.
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from + (to - from) * t
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    t: f32,
    rate: f32,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn at_rest(value: f32, rate: f32) -> Self {
        Self {
            from: value,
            to: value,
            t: 1.0,
            rate,
        }
    }

    pub fn value(&self) -> f32 {
        smooth_step(self.from, self.to, self.t)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.t >= 1.0
    }

    /// Start moving toward `to` from wherever the tween is right now.
    pub fn retarget(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.t = 0.0;
    }

    pub fn advance(&mut self, dt: Duration) -> f32 {
        if !self.is_done() {
            self.t = (self.t + dt.as_secs_f32() * self.rate).min(1.0);
        }
        self.value()
    }
}
