//! In-memory platform stand-in.
//!
//! Holds one view's frame and interaction flag and plays requested
//! transitions with [`FrameTween`] on a manual clock.

use std::time::Duration;

use shrink_core::animation::{Animation, FrameTween};
use shrink_core::{Frame, ShrinkHost, TransitionId, TransitionRequest, ViewId};
use tracing::debug;

#[derive(Debug, Clone)]
struct Playing {
    request: TransitionRequest,
    tween: FrameTween,
}

#[derive(Debug, Clone)]
pub struct SimHost {
    view: ViewId,
    frame: Option<Frame>,
    interaction_enabled: bool,
    playing: Option<Playing>,
    started: u64,
}

impl SimHost {
    pub fn new(view: ViewId, frame: Frame) -> Self {
        Self {
            view,
            frame: Some(frame),
            interaction_enabled: true,
            playing: None,
            started: 0,
        }
    }

    pub fn current_frame(&self) -> Option<Frame> {
        self.frame
    }

    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Number of transitions the core has requested so far.
    pub fn animations_started(&self) -> u64 {
        self.started
    }

    /// Advance the playing animation by `dt`. Returns the id of a transition
    /// that finished during this tick.
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionId> {
        let mut playing = self.playing.take()?;
        playing.tween.tick(dt);
        self.frame = Some(playing.tween.frame());
        if playing.tween.is_complete() {
            debug!(id = playing.request.id.get(), "sim animation finished");
            Some(playing.request.id)
        } else {
            self.playing = Some(playing);
            None
        }
    }

    /// Drop the playing animation without reporting completion.
    pub fn abandon(&mut self) -> Option<TransitionId> {
        self.playing.take().map(|playing| playing.request.id)
    }
}

impl ShrinkHost for SimHost {
    fn frame(&self, view: ViewId) -> Option<Frame> {
        if view == self.view { self.frame } else { None }
    }

    fn set_frame(&mut self, view: ViewId, frame: Frame) {
        if view == self.view {
            self.frame = Some(frame);
        }
    }

    fn animate(&mut self, view: ViewId, request: TransitionRequest) {
        if view != self.view {
            return;
        }
        let from = self.frame.unwrap_or(request.to);
        self.started += 1;
        // A newer request replaces whatever was playing.
        self.playing = Some(Playing {
            request,
            tween: FrameTween::new(from, request.to, request.duration, request.easing),
        });
    }

    fn set_interaction_enabled(&mut self, view: ViewId, enabled: bool) {
        if view == self.view {
            self.interaction_enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shrink_core::animation::Easing;
    use shrink_core::{Endpoint, Frame, ShrinkHost, TransitionId, TransitionRequest, ViewId};

    use super::SimHost;

    const VIEW: ViewId = ViewId::new(3);

    fn request(id: u64) -> TransitionRequest {
        TransitionRequest {
            id: TransitionId::new(id),
            target: Endpoint::Docked,
            to: Frame::new(155.0, 516.5, 140.0, 78.75),
            duration: Duration::from_millis(100),
            easing: Easing::Linear,
        }
    }

    #[test]
    fn tick_plays_to_completion() {
        let mut host = SimHost::new(VIEW, Frame::from_size(300.0, 168.75));
        host.animate(VIEW, request(1));
        assert_eq!(host.tick(Duration::from_millis(50)), None);
        assert!(host.is_playing());
        assert_eq!(host.tick(Duration::from_millis(50)), Some(TransitionId::new(1)));
        assert!(!host.is_playing());
        assert_eq!(host.current_frame(), Some(request(1).to));
    }

    #[test]
    fn other_views_are_unknown() {
        let mut host = SimHost::new(VIEW, Frame::from_size(10.0, 10.0));
        assert_eq!(host.frame(ViewId::new(99)), None);
        host.set_interaction_enabled(ViewId::new(99), false);
        assert!(host.interaction_enabled());
    }

    #[test]
    fn abandon_returns_the_dropped_id() {
        let mut host = SimHost::new(VIEW, Frame::from_size(300.0, 168.75));
        host.animate(VIEW, request(4));
        assert_eq!(host.abandon(), Some(TransitionId::new(4)));
        assert_eq!(host.tick(Duration::from_millis(10)), None);
        assert_eq!(host.animations_started(), 1);
    }
}
