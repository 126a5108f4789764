//! Shared host for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use shrink_core::animation::{Animation, FrameTween};
use shrink_core::{
    Frame, ShrinkConfig, ShrinkHost, ShrinkTransition, SwipeShrink, TransitionRequest, ViewId,
};

pub const VIEW: ViewId = ViewId::new(1);

/// Host that records every request and can play animations with a fixed clock.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub frame: Option<Frame>,
    pub interaction: Vec<bool>,
    pub set_frames: Vec<Frame>,
    pub requests: Vec<TransitionRequest>,
    playing: Option<(TransitionRequest, FrameTween)>,
}

impl RecordingHost {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Some(frame),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Frame {
        self.frame.expect("host has a frame")
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Advance the playing animation by `dt`, reporting completion to `shrink`.
    pub fn advance(&mut self, shrink: &mut SwipeShrink, dt: Duration) -> Option<ShrinkTransition> {
        let (request, mut tween) = self.playing.take()?;
        tween.tick(dt);
        self.frame = Some(tween.frame());
        if tween.is_complete() {
            Some(shrink.on_transition_complete(self, request.id))
        } else {
            self.playing = Some((request, tween));
            None
        }
    }

    /// Play the current animation to the end.
    pub fn run_to_end(&mut self, shrink: &mut SwipeShrink) -> Option<ShrinkTransition> {
        let step = Duration::from_millis(16);
        for _ in 0..1_000 {
            if let Some(done) = self.advance(shrink, step) {
                return Some(done);
            }
            if !self.is_playing() {
                return None;
            }
        }
        None
    }
}

impl ShrinkHost for RecordingHost {
    fn frame(&self, _view: ViewId) -> Option<Frame> {
        self.frame
    }

    fn set_frame(&mut self, _view: ViewId, frame: Frame) {
        self.frame = Some(frame);
        self.set_frames.push(frame);
    }

    fn animate(&mut self, _view: ViewId, request: TransitionRequest) {
        let from = self.frame.unwrap_or(request.to);
        self.requests.push(request);
        self.playing = Some((
            request,
            FrameTween::new(from, request.to, request.duration, request.easing),
        ));
    }

    fn set_interaction_enabled(&mut self, _view: ViewId, enabled: bool) {
        self.interaction.push(enabled);
    }
}

/// 300x600 portrait container.
pub fn container() -> Frame {
    Frame::from_size(300.0, 600.0)
}

/// Full-width 16:9 view pinned to the top of [`container`].
pub fn tracked() -> Frame {
    Frame::from_size(300.0, 168.75)
}

pub fn configured() -> (SwipeShrink, RecordingHost) {
    let mut host = RecordingHost::new(tracked());
    let mut shrink = SwipeShrink::new(VIEW, ShrinkConfig::default());
    shrink
        .configure(&mut host, container())
        .expect("configure succeeds");
    (shrink, host)
}
