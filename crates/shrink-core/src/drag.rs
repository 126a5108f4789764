#![forbid(unsafe_code)]

//! Drag controller: maps one-axis drag samples onto the geometry model.
//!
//! # State Machine
//!
//! ```text
//! Idle ──Began/Changed──▶ Dragging ──Ended / out of range──▶ Snapping(target) ──reset──▶ Idle
//!                            │
//!                            └──release already at target──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. Translations are incremental: each sample is applied to the view's
//!    current center and then consumed.
//! 2. The dragged center never leaves `[initial_center.y, final_center.y)`.
//!    A sample that would leave that band ends the gesture as a release at
//!    the out-of-range position instead of extrapolating.
//! 3. Size and center x are derived from the progress of the center *before*
//!    the sample is applied.
//! 4. A release picks the nearer endpoint; an exact tie picks the full state.
//!
//! The controller only decides. Applying frames, disabling interaction, and
//! requesting animations is the coordinator's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Frame, Point};
use crate::model::GeometryModel;
use crate::state::Endpoint;

/// Phase of a platform drag callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    /// The platform aborted the gesture. Handled like `Ended` so the view
    /// never rests between endpoints.
    Cancelled,
}

/// Bookkeeping for an open drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragSession {
    /// Samples applied so far.
    pub samples: u32,
    /// Net vertical distance applied so far.
    pub travel: f64,
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging { session: DragSession },
    Snapping { target: Endpoint },
}

/// What one drag sample asks the coordinator to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Apply `frame` immediately.
    Moved { frame: Frame, progress: f64 },
    /// The gesture ended at `release_y`; settle on `target`.
    Released {
        target: Endpoint,
        release_y: f64,
        /// The view already rests at the target center, no animation needed.
        at_target: bool,
    },
}

/// Interprets drag samples against a [`GeometryModel`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag session is open.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Process one drag callback.
    ///
    /// `translation` is the movement since the previous sample, in container
    /// coordinates; only its vertical component is used. `current` is the
    /// tracked view's frame as the host reports it right now.
    pub fn on_drag(
        &mut self,
        phase: DragPhase,
        translation: Point,
        model: &GeometryModel,
        current: Frame,
    ) -> DragOutcome {
        let center = current.center();
        let y_change = center.y + translation.y;

        match phase {
            DragPhase::Began | DragPhase::Changed if model.in_drag_range(y_change) => {
                let progress = model.progress_at(center.y);
                let frame = model.frame_at(progress, y_change);

                let mut session = match self.state {
                    DragState::Dragging { session } => session,
                    _ => DragSession::default(),
                };
                session.samples = session.samples.saturating_add(1);
                session.travel += translation.y;
                self.state = DragState::Dragging { session };

                debug!(
                    progress,
                    y = y_change,
                    width = frame.width(),
                    "drag sample applied"
                );
                DragOutcome::Moved { frame, progress }
            }
            DragPhase::Began | DragPhase::Changed => {
                debug!(y = y_change, "drag left the travel band; releasing");
                self.release(model, center, y_change)
            }
            DragPhase::Ended | DragPhase::Cancelled => self.release(model, center, y_change),
        }
    }

    /// Return to idle: the snap landed, or the open session is dropped
    /// without releasing.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    fn release(&mut self, model: &GeometryModel, center: Point, release_y: f64) -> DragOutcome {
        let target = model.nearest_endpoint(release_y);
        let at_target = center.approx_eq(model.endpoint_center(target));
        self.state = if at_target {
            DragState::Idle
        } else {
            DragState::Snapping { target }
        };
        debug!(?target, release_y, at_target, "drag released");
        DragOutcome::Released {
            target,
            release_y,
            at_target,
        }
    }
}
