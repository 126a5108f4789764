#![forbid(unsafe_code)]

//! Tap controller: restores a docked view to full size.
//!
//! A tap only means something while the view rests in the docked state.
//! Taps while full-size, mid-drag, or during a transition are ignored, which
//! is also how the platform's simultaneous drag/tap recognition stays safe.

use tracing::debug;

use crate::config::GestureArbitration;
use crate::state::{InteractionState, NoopReason};

/// Decision for one tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapDecision {
    /// Animate back to the full state.
    Restore,
    Ignore(NoopReason),
}

/// Decides whether a tap restores the view.
#[derive(Debug, Clone, Default)]
pub struct TapController {
    arbitration: GestureArbitration,
    restores: u64,
}

impl TapController {
    #[must_use]
    pub fn new(arbitration: GestureArbitration) -> Self {
        Self {
            arbitration,
            restores: 0,
        }
    }

    /// Recognizer settings the platform should use for the tap recognizer.
    #[inline]
    #[must_use]
    pub fn arbitration(&self) -> GestureArbitration {
        self.arbitration
    }

    /// Number of restores this controller has granted.
    #[inline]
    #[must_use]
    pub fn restores(&self) -> u64 {
        self.restores
    }

    /// Decide what a tap does in `state`.
    pub fn on_tap(&mut self, state: InteractionState, dragging: bool) -> TapDecision {
        let decision = match state {
            InteractionState::Transitioning { .. } => {
                TapDecision::Ignore(NoopReason::TransitionInFlight)
            }
            _ if dragging => TapDecision::Ignore(NoopReason::DragInProgress),
            InteractionState::Docked => TapDecision::Restore,
            InteractionState::Full => TapDecision::Ignore(NoopReason::NotDocked),
        };
        if decision == TapDecision::Restore {
            self.restores = self.restores.saturating_add(1);
        }
        debug!(?state, ?decision, "tap");
        decision
    }
}
