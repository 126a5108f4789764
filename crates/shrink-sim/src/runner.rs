//! Drives a [`SwipeShrink`] through a [`Script`] on a manual clock.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use shrink_core::{
    ConfigError, DragPhase, Endpoint, Frame, InteractionState, Point, ShrinkConfig, ShrinkEffect,
    ShrinkTransition, SwipeShrink, ViewId,
};
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::host::SimHost;
use crate::script::{Script, Step};

/// The single simulated view.
pub const SIM_VIEW: ViewId = ViewId::new(1);

/// One recorded transition with the host state right after it.
#[derive(Debug, Clone, Serialize)]
pub struct TraceLine {
    /// 1-based step index; 0 is the initial configuration, `steps + 1` the
    /// final drain of a still-playing animation.
    pub step: usize,
    pub at_ms: u64,
    pub input: String,
    pub transition: ShrinkTransition,
    pub frame: Option<Frame>,
    pub interaction_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub trace: Vec<TraceLine>,
    pub final_state: InteractionState,
    pub final_frame: Option<Frame>,
    pub elapsed_ms: u64,
    pub animations: u64,
}

impl Report {
    /// Effects in trace order, handy for assertions.
    pub fn effects(&self) -> impl Iterator<Item = &ShrinkEffect> {
        self.trace.iter().map(|line| &line.transition.effect)
    }
}

pub struct Simulation {
    shrink: SwipeShrink,
    host: SimHost,
    container: Frame,
    frame_step: Duration,
    clock: Duration,
    trace: Vec<TraceLine>,
}

impl Simulation {
    /// Build the host from the script and configure the interaction.
    pub fn new(script: &Script, config: ShrinkConfig, frame_step: Duration) -> Result<Self> {
        if frame_step.is_zero() {
            return Err(SimError::invalid("frame step must be positive"));
        }
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors).into());
        }

        let container = script.container_frame();
        let mut host = SimHost::new(SIM_VIEW, script.tracked_frame(&config));
        let mut shrink = SwipeShrink::new(SIM_VIEW, config);
        let configured = shrink.configure(&mut host, container)?;

        let mut sim = Self {
            shrink,
            host,
            container,
            frame_step,
            clock: Duration::ZERO,
            trace: Vec::new(),
        };
        sim.push(0, "configure".to_string(), configured);
        Ok(sim)
    }

    pub fn shrink(&self) -> &SwipeShrink {
        &self.shrink
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    /// Apply the step at `index` (0-based).
    pub fn apply(&mut self, index: usize, step: Step) -> Result<()> {
        let step_no = index + 1;
        debug!(step = step_no, input = %step.label(), "sim step");
        match step {
            Step::Drag { dy, dx } => {
                let phase = if self.shrink.is_dragging() {
                    DragPhase::Changed
                } else {
                    DragPhase::Began
                };
                let t = self
                    .shrink
                    .on_drag(&mut self.host, phase, Point::new(dx, dy));
                self.push(step_no, step.label(), t);
            }
            Step::Release { dy } => {
                let t = self
                    .shrink
                    .on_drag(&mut self.host, DragPhase::Ended, Point::new(0.0, dy));
                self.push(step_no, step.label(), t);
            }
            Step::Cancel => {
                let t = self
                    .shrink
                    .on_drag(&mut self.host, DragPhase::Cancelled, Point::ZERO);
                self.push(step_no, step.label(), t);
            }
            Step::Tap => {
                let t = self.shrink.on_tap(&mut self.host);
                self.push(step_no, step.label(), t);
            }
            Step::Wait { ms } => self.wait(step_no, Duration::from_millis(ms)),
            Step::Resize { width, height } => {
                self.container = Frame::new(
                    self.container.origin.x,
                    self.container.origin.y,
                    width,
                    height,
                );
                let t = self.shrink.relayout(&mut self.host, self.container)?;
                // Relayout supersedes whatever the host was still playing.
                self.host.abandon();
                self.push(step_no, step.label(), t);
            }
            Step::Settle => {
                let t = self.shrink.settle_now(&mut self.host);
                if !t.effect.is_noop() {
                    self.host.abandon();
                }
                self.push(step_no, step.label(), t);
            }
        }
        Ok(())
    }

    /// Run the clock for `total`, reporting completions as they happen.
    fn wait(&mut self, step_no: usize, total: Duration) {
        let mut remaining = total;
        while !remaining.is_zero() {
            if !self.host.is_playing() {
                self.clock += remaining;
                return;
            }
            let dt = remaining.min(self.frame_step);
            remaining -= dt;
            self.clock += dt;
            if let Some(id) = self.host.tick(dt) {
                let t = self.shrink.on_transition_complete(&mut self.host, id);
                self.push(step_no, format!("complete #{}", id.get()), t);
            }
        }
    }

    /// Play out any animation still running and produce the report.
    pub fn finish(mut self, drain_step: usize) -> Report {
        while self.host.is_playing() {
            self.wait(drain_step, self.frame_step);
        }
        info!(
            steps = drain_step.saturating_sub(1),
            records = self.trace.len(),
            state = ?self.shrink.state(),
            "simulation finished"
        );
        Report {
            final_state: self.shrink.state(),
            final_frame: self.host.current_frame(),
            elapsed_ms: duration_ms(self.clock),
            animations: self.host.animations_started(),
            trace: self.trace,
        }
    }

    fn push(&mut self, step: usize, input: String, transition: ShrinkTransition) {
        self.trace.push(TraceLine {
            step,
            at_ms: duration_ms(self.clock),
            input,
            transition,
            frame: self.host.current_frame(),
            interaction_enabled: self.host.interaction_enabled(),
        });
    }
}

/// Run every step of `script` and drain the final animation.
pub fn simulate(script: &Script, config: ShrinkConfig, frame_step: Duration) -> Result<Report> {
    let mut sim = Simulation::new(script, config, frame_step)?;
    for (index, step) in script.steps.iter().enumerate() {
        sim.apply(index, *step)?;
    }
    Ok(sim.finish(script.steps.len() + 1))
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One JSON object per trace line, then a summary object.
pub fn write_json(report: &Report, out: &mut impl Write) -> Result<()> {
    for line in &report.trace {
        serde_json::to_writer(&mut *out, line)?;
        writeln!(out)?;
    }
    serde_json::to_writer(
        &mut *out,
        &serde_json::json!({
            "final_state": report.final_state,
            "final_frame": report.final_frame,
            "elapsed_ms": report.elapsed_ms,
            "animations": report.animations,
        }),
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_text(report: &Report, out: &mut impl Write) -> Result<()> {
    for line in &report.trace {
        writeln!(
            out,
            "{:>6}ms  step {:>2}  {:<18} {:<22} {}",
            line.at_ms,
            line.step,
            line.input,
            format!(
                "{} -> {}",
                state_label(line.transition.from),
                state_label(line.transition.to)
            ),
            effect_label(&line.transition.effect),
        )?;
    }
    writeln!(
        out,
        "final: {} at {} after {}ms ({} animations)",
        state_label(report.final_state),
        report
            .final_frame
            .map_or_else(|| "<no view>".to_string(), frame_label),
        report.elapsed_ms,
        report.animations,
    )?;
    Ok(())
}

fn endpoint_label(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Full => "full",
        Endpoint::Docked => "docked",
    }
}

fn state_label(state: InteractionState) -> String {
    match state {
        InteractionState::Full => "full".to_string(),
        InteractionState::Docked => "docked".to_string(),
        InteractionState::Transitioning { target } => {
            format!("moving({})", endpoint_label(target))
        }
    }
}

fn frame_label(frame: Frame) -> String {
    format!(
        "[{:.1},{:.1} {:.1}x{:.1}]",
        frame.origin.x,
        frame.origin.y,
        frame.width(),
        frame.height()
    )
}

fn effect_label(effect: &ShrinkEffect) -> String {
    match *effect {
        ShrinkEffect::Configured => "configured".to_string(),
        ShrinkEffect::FrameUpdated { frame, progress } => {
            format!("frame {} progress={progress:.3}", frame_label(frame))
        }
        ShrinkEffect::SnapRequested { target, id, to } => format!(
            "snap to {} #{} {}",
            endpoint_label(target),
            id.get(),
            frame_label(to)
        ),
        ShrinkEffect::SnapSkipped { target } => {
            format!("already {}", endpoint_label(target))
        }
        ShrinkEffect::RestoreRequested { id, to } => {
            format!("restore #{} {}", id.get(), frame_label(to))
        }
        ShrinkEffect::TransitionCompleted { target, id } => {
            format!("landed {} #{}", endpoint_label(target), id.get())
        }
        ShrinkEffect::Settled { target, id } => {
            format!("settled {} #{}", endpoint_label(target), id.get())
        }
        ShrinkEffect::Noop { reason } => format!("ignored ({reason:?})"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shrink_core::{Endpoint, InteractionState, NoopReason, ShrinkConfig, ShrinkEffect};

    use super::{simulate, write_json, write_text};
    use crate::script::Script;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn demo_docks_restores_and_ignores_the_double_tap() {
        let script = Script::demo().expect("demo");
        let report = simulate(&script, ShrinkConfig::default(), FRAME).expect("run");

        let effects: Vec<_> = report.effects().copied().collect();
        assert!(effects.iter().any(|e| matches!(
            e,
            ShrinkEffect::TransitionCompleted {
                target: Endpoint::Docked,
                ..
            }
        )));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, ShrinkEffect::RestoreRequested { .. }))
        );
        assert!(effects.contains(&ShrinkEffect::Noop {
            reason: NoopReason::TransitionInFlight
        }));
        assert_eq!(
            effects.last(),
            Some(&ShrinkEffect::Noop {
                reason: NoopReason::NotDocked
            })
        );
        assert_eq!(report.final_state, InteractionState::Full);
        assert_eq!(report.animations, 2);
    }

    #[test]
    fn interaction_flag_tracks_transitions() {
        let script = Script::demo().expect("demo");
        let report = simulate(&script, ShrinkConfig::default(), FRAME).expect("run");
        for line in &report.trace {
            assert_eq!(
                line.interaction_enabled,
                !line.transition.to.is_transitioning(),
                "at {}",
                line.input
            );
        }
    }

    #[test]
    fn final_animation_is_drained() {
        let mut script = Script::demo().expect("demo");
        // Stop right after the release.
        script.steps.truncate(4);
        let report = simulate(&script, ShrinkConfig::default(), FRAME).expect("run");
        assert_eq!(report.final_state, InteractionState::Docked);
        assert_eq!(report.trace.last().map(|line| line.step), Some(5));
    }

    #[test]
    fn zero_frame_step_is_rejected() {
        let script = Script::demo().expect("demo");
        let err = simulate(&script, ShrinkConfig::default(), Duration::ZERO).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let script = Script::demo().expect("demo");
        let config = ShrinkConfig {
            aspect_ratio: -1.0,
            ..ShrinkConfig::default()
        };
        let err = simulate(&script, config, FRAME).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn outputs_render_every_line() {
        let script = Script::demo().expect("demo");
        let report = simulate(&script, ShrinkConfig::default(), FRAME).expect("run");

        let mut text = Vec::new();
        write_text(&report, &mut text).expect("text");
        let text = String::from_utf8(text).expect("utf8");
        assert_eq!(text.lines().count(), report.trace.len() + 1);
        assert!(text.contains("snap to docked"));
        assert!(text.starts_with("     0ms  step  0  configure"));

        let mut json = Vec::new();
        write_json(&report, &mut json).expect("json");
        let json = String::from_utf8(json).expect("utf8");
        let lines: Vec<serde_json::Value> = json
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json"))
            .collect();
        assert_eq!(lines.len(), report.trace.len() + 1);
        assert_eq!(lines[0]["transition"]["effect"]["effect"], "configured");
        assert_eq!(lines.last().expect("summary")["final_state"]["state"], "full");
    }
}
