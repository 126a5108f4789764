#![forbid(unsafe_code)]

//! Interaction state and the transition records emitted for every input.
//!
//! ```text
//! Full ──drag release (lower half)──▶ Transitioning{Docked} ──complete──▶ Docked
//! Docked ──tap / drag release (upper half)──▶ Transitioning{Full} ──complete──▶ Full
//! ```
//!
//! The state is tracked explicitly and updated on every transition boundary;
//! it is never inferred by comparing view centers.

use serde::{Deserialize, Serialize};

use crate::geometry::Frame;
use crate::host::TransitionId;

/// One of the two stable configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Original, full-size configuration.
    Full,
    /// Shrunk and parked in the bottom-right corner.
    Docked,
}

/// Where the tracked view is, as far as the core knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    Full,
    Docked,
    /// An animated transition toward `target` is in flight.
    Transitioning { target: Endpoint },
}

impl InteractionState {
    /// The stable state for `endpoint`.
    #[must_use]
    pub const fn at(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Full => Self::Full,
            Endpoint::Docked => Self::Docked,
        }
    }

    /// The endpoint the view rests at, if not transitioning.
    #[must_use]
    pub const fn endpoint(self) -> Option<Endpoint> {
        match self {
            Self::Full => Some(Endpoint::Full),
            Self::Docked => Some(Endpoint::Docked),
            Self::Transitioning { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_transitioning(self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }
}

/// Why an input was accepted but did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// No geometry model yet, or the last configuration failed.
    NotConfigured,
    /// The host could not resolve the tracked view.
    ViewUnavailable,
    /// Interaction is disabled while a transition plays.
    TransitionInFlight,
    /// Tap while the view is not docked.
    NotDocked,
    /// Tap while a drag session is open.
    DragInProgress,
    /// Completion for a transition that is not in flight.
    StaleCompletion,
    /// Nothing to settle.
    NothingInFlight,
}

/// The observable effect of one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ShrinkEffect {
    /// Geometry model (re)computed.
    Configured,
    /// Immediate frame update during a drag.
    FrameUpdated { frame: Frame, progress: f64 },
    /// Release chose `target` and requested an animated snap.
    SnapRequested {
        target: Endpoint,
        id: TransitionId,
        to: Frame,
    },
    /// Release chose `target` but the view already rests there.
    SnapSkipped { target: Endpoint },
    /// Tap while docked requested an animated restore.
    RestoreRequested { id: TransitionId, to: Frame },
    /// The host reported the in-flight transition finished.
    TransitionCompleted { target: Endpoint, id: TransitionId },
    /// The in-flight transition was superseded by jumping to its target.
    Settled { target: Endpoint, id: TransitionId },
    /// Accepted but ignored.
    Noop { reason: NoopReason },
}

impl ShrinkEffect {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// One step of the interaction machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShrinkTransition {
    /// Sequence number of this record.
    pub transition_id: u64,
    pub from: InteractionState,
    pub to: InteractionState,
    pub effect: ShrinkEffect,
}
