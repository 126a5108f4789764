#![forbid(unsafe_code)]

//! The boundary between the shrink core and the UI platform.
//!
//! The core never holds a reference to a platform view. It stores a
//! [`ViewId`] and asks the [`ShrinkHost`] to resolve it on every call, so a
//! view torn down by the platform simply stops producing input.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::geometry::Frame;
use crate::state::Endpoint;

/// Opaque handle to a platform view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(u64);

impl ViewId {
    /// Wrap a raw platform handle.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of one animated transition request.
///
/// Ids increase monotonically per [`crate::SwipeShrink`]; a completion
/// carrying anything but the in-flight id is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(u64);

impl TransitionId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// "Animate this view to `to` over `duration`, then tell me `id` finished."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub id: TransitionId,
    pub target: Endpoint,
    pub to: Frame,
    pub duration: Duration,
    pub easing: Easing,
}

/// Platform services the core relies on.
///
/// All calls happen on the UI thread. `animate` is fire-and-forget: the host
/// plays the transition and later reports it through
/// [`crate::SwipeShrink::on_transition_complete`].
pub trait ShrinkHost {
    /// Current frame of `view` in container coordinates, or `None` if the
    /// view no longer exists.
    fn frame(&self, view: ViewId) -> Option<Frame>;

    /// Apply `frame` immediately, without animation.
    fn set_frame(&mut self, view: ViewId, frame: Frame);

    /// Start an animated transition.
    fn animate(&mut self, view: ViewId, request: TransitionRequest);

    /// Toggle whether the view accepts touches.
    fn set_interaction_enabled(&mut self, view: ViewId, enabled: bool);
}
