#![forbid(unsafe_code)]

//! Transition primitives for hosts.
//!
//! The core never drives time itself: it asks the host to animate a view
//! and waits for a completion notice. These types are what a host (or the
//! simulator) uses to honor such a request deterministically.
//!
//! # Invariants
//!
//! 1. Every easing function maps 0.0 → 0.0 and 1.0 → 1.0 and clamps its input.
//! 2. `Animation::value()` stays in [0.0, 1.0].
//! 3. `tick()` on a complete animation is a no-op apart from overshoot tracking.

mod tween;

pub use tween::{FrameTween, Tween};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A time-driven animation producing a normalized value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased value in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Rewind to the start.
    fn reset(&mut self);

    /// Time ticked past the end, if complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// An easing curve.
pub type EasingFn = fn(f32) -> f32;

/// No easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out, the default transition curve.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Named easing curves, as they appear in config files and transition requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// The function implementing this curve.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
        }
    }

    /// Evaluate the curve at `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}
