#![forbid(unsafe_code)]

//! The coordinator the platform talks to.
//!
//! [`SwipeShrink`] owns the [`GeometryModel`], both controllers, the explicit
//! [`InteractionState`], and the single in-flight transition slot. Every
//! entry point returns a [`ShrinkTransition`] describing what happened.
//!
//! # Invariants
//!
//! 1. At most one transition is in flight.
//! 2. Interaction is disabled for exactly as long as a transition is in
//!    flight; drag and tap input arriving meanwhile is ignored.
//! 3. A completion whose id is not the in-flight id changes nothing.
//! 4. Without a valid geometry model all gesture input is ignored.
//!
//! # Failure Modes
//!
//! - Configuration failure leaves the coordinator unconfigured, resting on
//!   a stable endpoint with nothing in flight and interaction enabled. The
//!   full-size frame captured by the last successful
//!   [`SwipeShrink::configure`] survives, so a later
//!   [`SwipeShrink::relayout`] recovers.
//! - A view the host can no longer resolve turns input into no-ops.

use tracing::{debug, info, warn};

use crate::config::{GestureArbitration, ShrinkConfig};
use crate::drag::{DragController, DragOutcome, DragPhase};
use crate::error::{Result, ShrinkError};
use crate::geometry::{Frame, Point};
use crate::host::{ShrinkHost, TransitionId, TransitionRequest, ViewId};
use crate::model::GeometryModel;
use crate::state::{Endpoint, InteractionState, NoopReason, ShrinkEffect, ShrinkTransition};
use crate::tap::{TapController, TapDecision};

/// The transition currently playing on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub id: TransitionId,
    pub target: Endpoint,
}

/// Drag-to-dock / tap-to-restore interaction for one tracked view.
#[derive(Debug, Clone)]
pub struct SwipeShrink {
    view: ViewId,
    config: ShrinkConfig,
    model: Option<GeometryModel>,
    full_frame: Option<Frame>,
    drag: DragController,
    tap: TapController,
    state: InteractionState,
    interaction_enabled: bool,
    in_flight: Option<InFlight>,
    next_request: u64,
    transition_counter: u64,
}

impl SwipeShrink {
    /// Create an unconfigured coordinator for `view`.
    #[must_use]
    pub fn new(view: ViewId, config: ShrinkConfig) -> Self {
        let tap = TapController::new(config.arbitration());
        Self {
            view,
            config,
            model: None,
            full_frame: None,
            drag: DragController::new(),
            tap,
            state: InteractionState::Full,
            interaction_enabled: true,
            in_flight: None,
            next_request: 0,
            transition_counter: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    /// Current geometry model, if configured.
    #[inline]
    #[must_use]
    pub fn model(&self) -> Option<&GeometryModel> {
        self.model.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    #[inline]
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[inline]
    #[must_use]
    pub fn tap(&self) -> &TapController {
        &self.tap
    }

    /// Recognizer settings for the platform's drag and tap recognizers.
    #[must_use]
    pub fn arbitration(&self) -> GestureArbitration {
        self.tap.arbitration()
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Capture the tracked view's current frame as the full state and derive
    /// the docked geometry from `container`.
    ///
    /// Re-invocable. Any in-flight transition is superseded (its completion
    /// will be ignored), an open drag is dropped, the state resets to
    /// [`InteractionState::Full`], and interaction is re-enabled.
    pub fn configure<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        container: Frame,
    ) -> Result<ShrinkTransition> {
        let Some(tracked) = host.frame(self.view) else {
            warn!(view = self.view.get(), "configure: view unavailable");
            self.unconfigure(host);
            return Err(ShrinkError::ViewUnavailable { view: self.view });
        };
        let model = self.build_model(host, tracked, container)?;

        let from = self.state;
        self.full_frame = Some(tracked);
        self.install(host, model, InteractionState::Full);
        info!(
            view = self.view.get(),
            final_x = model.final_center().x,
            final_y = model.final_center().y,
            final_width = model.final_size().width,
            "shrink geometry configured"
        );
        Ok(self.record(from, ShrinkEffect::Configured))
    }

    /// Recompute the docked geometry for a new container frame while keeping
    /// the full-size frame captured by the last successful configure.
    ///
    /// An in-flight transition or open drag is settled onto its endpoint
    /// first; the view is then placed on that endpoint's frame in the new
    /// geometry immediately. Works after a failed configure or relayout as
    /// long as some earlier configure succeeded.
    pub fn relayout<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        container: Frame,
    ) -> Result<ShrinkTransition> {
        let Some(full) = self.full_frame else {
            return self.configure(host, container);
        };
        let endpoint = self.resting_endpoint(&*host, self.model.as_ref());
        let model = self.build_model(host, full, container)?;

        let from = self.state;
        self.install(host, model, InteractionState::at(endpoint));
        host.set_frame(self.view, model.endpoint_frame(endpoint));
        info!(
            view = self.view.get(),
            ?endpoint,
            container_width = container.width(),
            container_height = container.height(),
            "shrink geometry relaid out"
        );
        Ok(self.record(from, ShrinkEffect::Configured))
    }

    // -----------------------------------------------------------------------
    // Gesture input
    // -----------------------------------------------------------------------

    /// Handle one drag callback. `translation` is the movement since the
    /// previous sample in container coordinates.
    pub fn on_drag<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        phase: DragPhase,
        translation: Point,
    ) -> ShrinkTransition {
        let from = self.state;
        let Some(model) = self.model else {
            return self.noop(NoopReason::NotConfigured);
        };
        if let Some(reason) = self.input_guard() {
            debug!(?phase, ?reason, "drag rejected");
            return self.noop(reason);
        }
        let Some(current) = host.frame(self.view) else {
            warn!(view = self.view.get(), "drag: view unavailable");
            self.drag.reset();
            return self.noop(NoopReason::ViewUnavailable);
        };

        match self.drag.on_drag(phase, translation, &model, current) {
            DragOutcome::Moved { frame, progress } => {
                host.set_frame(self.view, frame);
                self.record(from, ShrinkEffect::FrameUpdated { frame, progress })
            }
            DragOutcome::Released {
                target,
                at_target: true,
                ..
            } => {
                self.state = InteractionState::at(target);
                self.set_interaction(host, true);
                self.record(from, ShrinkEffect::SnapSkipped { target })
            }
            DragOutcome::Released { target, .. } => {
                let request = self.begin_transition(host, &model, target);
                info!(?target, id = request.id.get(), "snap requested");
                self.record(
                    from,
                    ShrinkEffect::SnapRequested {
                        target,
                        id: request.id,
                        to: request.to,
                    },
                )
            }
        }
    }

    /// Handle a tap on the tracked view.
    pub fn on_tap<H: ShrinkHost>(&mut self, host: &mut H) -> ShrinkTransition {
        let Some(model) = self.model else {
            return self.noop(NoopReason::NotConfigured);
        };
        let from = self.state;
        match self.tap.on_tap(self.state, self.drag.is_dragging()) {
            TapDecision::Restore => {
                let request = self.begin_transition(host, &model, Endpoint::Full);
                info!(id = request.id.get(), "restore requested");
                self.record(
                    from,
                    ShrinkEffect::RestoreRequested {
                        id: request.id,
                        to: request.to,
                    },
                )
            }
            TapDecision::Ignore(reason) => self.noop(reason),
        }
    }

    // -----------------------------------------------------------------------
    // Transition lifecycle
    // -----------------------------------------------------------------------

    /// The host finished playing transition `id`.
    pub fn on_transition_complete<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        id: TransitionId,
    ) -> ShrinkTransition {
        match self.in_flight {
            Some(in_flight) if in_flight.id == id => {
                let from = self.state;
                self.land(host, in_flight.target);
                debug!(id = id.get(), target = ?in_flight.target, "transition complete");
                self.record(
                    from,
                    ShrinkEffect::TransitionCompleted {
                        target: in_flight.target,
                        id,
                    },
                )
            }
            _ => {
                debug!(id = id.get(), "stale transition completion ignored");
                self.noop(NoopReason::StaleCompletion)
            }
        }
    }

    /// Supersede the in-flight transition by jumping straight to its target.
    ///
    /// The host's own animation should be abandoned; its completion, if it
    /// still arrives, is ignored as stale.
    pub fn settle_now<H: ShrinkHost>(&mut self, host: &mut H) -> ShrinkTransition {
        let (Some(in_flight), Some(model)) = (self.in_flight, self.model) else {
            return self.noop(NoopReason::NothingInFlight);
        };
        let from = self.state;
        host.set_frame(self.view, model.endpoint_frame(in_flight.target));
        self.land(host, in_flight.target);
        info!(id = in_flight.id.get(), target = ?in_flight.target, "transition settled");
        self.record(
            from,
            ShrinkEffect::Settled {
                target: in_flight.target,
                id: in_flight.id,
            },
        )
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn build_model<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        tracked: Frame,
        container: Frame,
    ) -> Result<GeometryModel> {
        match GeometryModel::configure_with(tracked, container, &self.config) {
            Ok(model) => Ok(model),
            Err(err) => {
                warn!(view = self.view.get(), error = %err, "shrink configuration failed");
                self.unconfigure(host);
                Err(err.into())
            }
        }
    }

    /// Drop the model and come to rest without one: nothing in flight, no
    /// open drag, interaction enabled.
    fn unconfigure<H: ShrinkHost>(&mut self, host: &mut H) {
        let endpoint = self.resting_endpoint(&*host, self.model.as_ref());
        self.model = None;
        self.in_flight = None;
        self.drag.reset();
        self.state = InteractionState::at(endpoint);
        self.set_interaction(host, true);
    }

    fn install<H: ShrinkHost>(&mut self, host: &mut H, model: GeometryModel, state: InteractionState) {
        self.model = Some(model);
        self.in_flight = None;
        self.drag.reset();
        self.state = state;
        self.set_interaction(host, true);
    }

    /// Endpoint the view should rest at when the layout changes under it.
    fn resting_endpoint<H: ShrinkHost>(&self, host: &H, model: Option<&GeometryModel>) -> Endpoint {
        if let Some(in_flight) = self.in_flight {
            return in_flight.target;
        }
        if let Some(endpoint) = self.state.endpoint()
            && !self.drag.is_dragging()
        {
            return endpoint;
        }
        match (model, host.frame(self.view)) {
            (Some(model), Some(frame)) => model.nearest_endpoint(frame.center().y),
            _ => Endpoint::Full,
        }
    }

    fn input_guard(&self) -> Option<NoopReason> {
        self.in_flight.map(|_| NoopReason::TransitionInFlight)
    }

    fn begin_transition<H: ShrinkHost>(
        &mut self,
        host: &mut H,
        model: &GeometryModel,
        target: Endpoint,
    ) -> TransitionRequest {
        self.next_request = self.next_request.saturating_add(1);
        let request = TransitionRequest {
            id: TransitionId::new(self.next_request),
            target,
            to: model.endpoint_frame(target),
            duration: self.config.transition_duration(),
            easing: self.config.easing,
        };
        self.set_interaction(host, false);
        self.state = InteractionState::Transitioning { target };
        self.in_flight = Some(InFlight {
            id: request.id,
            target,
        });
        host.animate(self.view, request);
        request
    }

    fn land<H: ShrinkHost>(&mut self, host: &mut H, target: Endpoint) {
        self.in_flight = None;
        self.drag.reset();
        self.state = InteractionState::at(target);
        self.set_interaction(host, true);
    }

    fn set_interaction<H: ShrinkHost>(&mut self, host: &mut H, enabled: bool) {
        self.interaction_enabled = enabled;
        host.set_interaction_enabled(self.view, enabled);
    }

    fn noop(&mut self, reason: NoopReason) -> ShrinkTransition {
        let state = self.state;
        self.record(state, ShrinkEffect::Noop { reason })
    }

    fn record(&mut self, from: InteractionState, effect: ShrinkEffect) -> ShrinkTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        ShrinkTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}
