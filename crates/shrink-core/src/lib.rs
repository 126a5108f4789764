// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: drag-to-dock geometry and the gesture state machines around it.
//!
//! # Role in swipe-shrink
//! `shrink-core` implements a picture-in-picture "shrink" interaction: the
//! tracked view is dragged downward to shrink into the bottom-right corner
//! of its container, and tapped to restore. One vertical drag axis drives a
//! two-dimensional size/position interpolation.
//!
//! # Primary responsibilities
//! - **GeometryModel**: full and docked reference frames plus interpolation ranges.
//! - **DragController**: incremental drag samples → immediate frames; release → snap.
//! - **TapController**: tap while docked → animated restore.
//! - **SwipeShrink**: the coordinator owning state, the interaction guard,
//!   and the single in-flight transition.
//!
//! # How it fits in the system
//! The platform implements [`ShrinkHost`] (frame reads, immediate frame
//! writes, animation requests, the interaction flag) and forwards drag/tap
//! callbacks into [`SwipeShrink`]. Animation playback stays on the platform
//! side; [`animation::FrameTween`] is provided for hosts without their own
//! animation system.

pub mod animation;
pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod model;
pub mod shrink;
pub mod state;
pub mod tap;

pub use config::{GestureArbitration, ShrinkConfig};
pub use drag::{DragController, DragPhase};
pub use error::{ConfigurationError, ShrinkError};
pub use geometry::{Frame, Point, Size};
pub use host::{ShrinkHost, TransitionId, TransitionRequest, ViewId};
pub use model::GeometryModel;
pub use shrink::SwipeShrink;
pub use state::{Endpoint, InteractionState, NoopReason, ShrinkEffect, ShrinkTransition};
pub use tap::TapController;

#[cfg(feature = "config-files")]
pub use config::ConfigError;
