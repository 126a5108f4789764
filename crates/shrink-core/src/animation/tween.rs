#![forbid(unsafe_code)]

//! Fixed-duration tweens.
//!
//! [`Tween`] is a normalized 0→1 progress clock with an easing curve.
//! [`FrameTween`] layers a [`Frame`] interpolation on top of it, which is
//! exactly what a host needs to play a snap or restore transition.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns, so the first tick completes the tween.

use std::time::Duration;

use super::{Animation, Easing};
use crate::geometry::Frame;

/// A normalized progress clock over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween lasting `duration` with ease-in-out easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            easing: Easing::EaseInOut,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw linear progress in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        t.clamp(0.0, 1.0) as f32
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

/// Interpolates a view frame between two endpoints.
#[derive(Debug, Clone)]
pub struct FrameTween {
    from: Frame,
    to: Frame,
    clock: Tween,
}

impl FrameTween {
    /// Create a frame tween from `from` to `to`.
    #[must_use]
    pub fn new(from: Frame, to: Frame, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            clock: Tween::new(duration).easing(easing),
        }
    }

    /// The frame at the current point in time.
    ///
    /// Returns `to` exactly once complete, so hosts never land a hair away
    /// from the endpoint.
    #[must_use]
    pub fn frame(&self) -> Frame {
        if self.clock.is_complete() {
            self.to
        } else {
            self.from.lerp(&self.to, f64::from(self.clock.value()))
        }
    }
}

impl Animation for FrameTween {
    fn tick(&mut self, dt: Duration) {
        self.clock.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }

    fn value(&self) -> f32 {
        self.clock.value()
    }

    fn reset(&mut self) {
        self.clock.reset();
    }

    fn overshoot(&self) -> Duration {
        self.clock.overshoot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    const MS_100: Duration = Duration::from_millis(100);
    const MS_400: Duration = Duration::from_millis(400);

    #[test]
    fn tween_completes_after_duration() {
        let mut tween = Tween::new(MS_400);
        for _ in 0..3 {
            tween.tick(MS_100);
        }
        assert!(!tween.is_complete());
        tween.tick(MS_100);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn tween_tracks_overshoot() {
        let mut tween = Tween::new(MS_100);
        tween.tick(Duration::from_millis(130));
        assert_eq!(tween.overshoot(), Duration::from_millis(30));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut tween = Tween::new(Duration::ZERO);
        assert!(!tween.is_complete());
        tween.tick(Duration::from_nanos(1));
        assert!(tween.is_complete());
    }

    #[test]
    fn reset_rewinds() {
        let mut tween = Tween::new(MS_100).easing(Easing::Linear);
        tween.tick(Duration::from_millis(50));
        assert!((tween.value() - 0.5).abs() < 1e-6);
        tween.reset();
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn frame_tween_lands_exactly_on_target() {
        let from = Frame::from_center(Point::new(150.0, 84.375), Size::new(300.0, 168.75));
        let to = Frame::from_center(Point::new(225.0, 555.8125), Size::new(140.0, 78.75));
        let mut tween = FrameTween::new(from, to, MS_400, Easing::EaseInOut);
        assert_eq!(tween.frame(), from);

        tween.tick(Duration::from_millis(200));
        let mid = tween.frame();
        assert!(mid.width() < from.width() && mid.width() > to.width());

        tween.tick(Duration::from_millis(250));
        assert_eq!(tween.frame(), to);
    }
}
