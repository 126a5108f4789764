//! Scripted gesture scenarios.
//!
//! ```toml
//! container = { width = 300, height = 600 }
//! tracked = { width = 300, height = 168.75 }
//!
//! [[steps]]
//! op = "drag"
//! dy = 120
//!
//! [[steps]]
//! op = "release"
//!
//! [[steps]]
//! op = "wait"
//! ms = 450
//! ```
//!
//! Consecutive `drag` steps form one gesture: the first begins it, the rest
//! continue it, and `release` or `cancel` ends it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shrink_core::{Frame, ShrinkConfig};

use crate::error::{Result, SimError};

/// Built-in scenario used by `shrink-sim demo`.
pub const DEMO_SCRIPT: &str = include_str!("../scenarios/demo.toml");

/// A rectangle as written in a script. `x` and `y` default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FrameSpec {
    #[must_use]
    pub fn to_frame(self) -> Frame {
        Frame::new(self.x, self.y, self.width, self.height)
    }
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Drag sample moving the view by `dy` (and `dx`, ignored by the core).
    Drag {
        dy: f64,
        #[serde(default)]
        dx: f64,
    },
    /// Final sample of the gesture.
    Release {
        #[serde(default)]
        dy: f64,
    },
    /// The platform cancelled the gesture.
    Cancel,
    Tap,
    /// Let the clock run, playing any animation in progress.
    Wait { ms: u64 },
    /// Resize the container, keeping its origin.
    Resize { width: f64, height: f64 },
    /// Jump the in-flight transition to its target.
    Settle,
}

impl Step {
    /// Short label used in text traces.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Drag { dy, .. } => format!("drag dy={dy}"),
            Self::Release { dy } => format!("release dy={dy}"),
            Self::Cancel => "cancel".to_string(),
            Self::Tap => "tap".to_string(),
            Self::Wait { ms } => format!("wait {ms}ms"),
            Self::Resize { width, height } => format!("resize {width}x{height}"),
            Self::Settle => "settle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub container: FrameSpec,
    /// Starting frame of the tracked view. Defaults to a full-width view at
    /// the top of the container using the configured aspect ratio.
    #[serde(default)]
    pub tracked: Option<FrameSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script, attributing errors to `origin`.
    pub fn parse(source: &str, origin: &Path) -> Result<Self> {
        let script: Self =
            toml::from_str(source).map_err(|err| SimError::script(origin, err.to_string()))?;
        script.check(origin)?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SimError::MissingPath {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, path)
    }

    pub fn demo() -> Result<Self> {
        Self::parse(DEMO_SCRIPT, Path::new("<demo>"))
    }

    pub fn container_frame(&self) -> Frame {
        self.container.to_frame()
    }

    pub fn tracked_frame(&self, config: &ShrinkConfig) -> Frame {
        match self.tracked {
            Some(spec) => spec.to_frame(),
            None => {
                let container = self.container_frame();
                Frame::new(
                    container.origin.x,
                    container.origin.y,
                    container.width(),
                    container.width() * config.aspect_ratio,
                )
            }
        }
    }

    fn check(&self, origin: &Path) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            let finite = match *step {
                Step::Drag { dy, dx } => dy.is_finite() && dx.is_finite(),
                Step::Release { dy } => dy.is_finite(),
                Step::Resize { width, height } => width.is_finite() && height.is_finite(),
                Step::Cancel | Step::Tap | Step::Wait { .. } | Step::Settle => true,
            };
            if !finite {
                return Err(SimError::script(
                    origin,
                    format!("step {index} ({}) has a non-finite value", step.label()),
                ));
            }
        }
        Ok(())
    }
}
