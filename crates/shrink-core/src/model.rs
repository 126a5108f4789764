#![forbid(unsafe_code)]

//! Reference geometry for the shrink interaction.
//!
//! A [`GeometryModel`] captures the full-size frame of the tracked view and
//! the docked frame derived from the container, plus the three scalar ranges
//! used to map one-dimensional drag progress onto a size and a center.
//!
//! # Invariants
//!
//! 1. `final_center.y > initial_center.y` (the dock is below the full frame).
//! 2. `width_range > 0` (the docked view is narrower).
//! 3. `final_size` is non-empty.
//! 4. The model is immutable; reconfiguring builds a new one.
//!
//! Construction fails with a [`ConfigurationError`] rather than producing a
//! model that violates any of the above.

use serde::{Deserialize, Serialize};

use crate::config::ShrinkConfig;
use crate::error::ConfigurationError;
use crate::geometry::{Frame, GEOMETRY_EPSILON, Point, Size};
use crate::state::Endpoint;

/// Cached full/docked geometry and interpolation ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryModel {
    initial_center: Point,
    final_center: Point,
    initial_size: Size,
    final_size: Size,
    aspect_ratio: f64,
    vertical_range: f64,
    width_range: f64,
    center_x_range: f64,
}

impl GeometryModel {
    /// Derive the model with default tuning.
    pub fn configure(tracked: Frame, container: Frame) -> Result<Self, ConfigurationError> {
        Self::configure_with(tracked, container, &ShrinkConfig::default())
    }

    /// Derive the model from the tracked view's current frame and the
    /// container frame.
    ///
    /// The docked center sits a quarter of the container width in from the
    /// right edge and a quarter of the tracked height (plus the bottom gap)
    /// above the bottom edge. The docked width is half the container width
    /// minus the inset.
    pub fn configure_with(
        tracked: Frame,
        container: Frame,
        config: &ShrinkConfig,
    ) -> Result<Self, ConfigurationError> {
        if !tracked.is_finite() || !container.is_finite() {
            return Err(ConfigurationError::NonFiniteGeometry);
        }
        let ratio = config.aspect_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigurationError::InvalidAspectRatio { ratio });
        }

        let container_width = container.width();
        let container_height = container.height();
        if container_width <= config.min_container_width {
            return Err(ConfigurationError::ContainerTooNarrow {
                width: container_width,
                min: config.min_container_width,
            });
        }

        let final_size = Size::from_width(container_width / 2.0 - config.dock_inset, ratio);
        if final_size.is_empty() {
            return Err(ConfigurationError::DegenerateDockedSize {
                width: final_size.width,
                height: final_size.height,
            });
        }

        let initial_center = tracked.center();
        let initial_size = tracked.size;
        let final_center = Point::new(
            container_width - container_width / 4.0,
            container_height - tracked.height() / 4.0 - config.dock_bottom_gap,
        );

        let vertical_range = final_center.y - initial_center.y;
        if vertical_range <= GEOMETRY_EPSILON {
            return Err(ConfigurationError::DockNotBelow {
                initial_y: initial_center.y,
                final_y: final_center.y,
            });
        }
        let width_range = initial_size.width - final_size.width;
        if width_range <= GEOMETRY_EPSILON {
            return Err(ConfigurationError::DockNotSmaller {
                initial_width: initial_size.width,
                final_width: final_size.width,
            });
        }

        Ok(Self {
            initial_center,
            final_center,
            initial_size,
            final_size,
            aspect_ratio: ratio,
            vertical_range,
            width_range,
            center_x_range: final_center.x - initial_center.x,
        })
    }

    #[inline]
    #[must_use]
    pub fn initial_center(&self) -> Point {
        self.initial_center
    }

    #[inline]
    #[must_use]
    pub fn final_center(&self) -> Point {
        self.final_center
    }

    #[inline]
    #[must_use]
    pub fn initial_size(&self) -> Size {
        self.initial_size
    }

    #[inline]
    #[must_use]
    pub fn final_size(&self) -> Size {
        self.final_size
    }

    #[inline]
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// `final_center.y - initial_center.y`.
    #[inline]
    #[must_use]
    pub fn vertical_range(&self) -> f64 {
        self.vertical_range
    }

    /// `initial_size.width - final_size.width`.
    #[inline]
    #[must_use]
    pub fn width_range(&self) -> f64 {
        self.width_range
    }

    /// `final_center.x - initial_center.x`.
    #[inline]
    #[must_use]
    pub fn center_x_range(&self) -> f64 {
        self.center_x_range
    }

    /// Full-size frame.
    #[must_use]
    pub fn initial_frame(&self) -> Frame {
        Frame::from_center(self.initial_center, self.initial_size)
    }

    /// Docked frame.
    #[must_use]
    pub fn final_frame(&self) -> Frame {
        Frame::from_center(self.final_center, self.final_size)
    }

    /// Frame of a stable endpoint.
    #[must_use]
    pub fn endpoint_frame(&self, endpoint: Endpoint) -> Frame {
        match endpoint {
            Endpoint::Full => self.initial_frame(),
            Endpoint::Docked => self.final_frame(),
        }
    }

    /// Center of a stable endpoint.
    #[must_use]
    pub fn endpoint_center(&self, endpoint: Endpoint) -> Point {
        match endpoint {
            Endpoint::Full => self.initial_center,
            Endpoint::Docked => self.final_center,
        }
    }

    /// Whether `y` lies inside the draggable band `[initial.y, final.y)`.
    #[inline]
    #[must_use]
    pub fn in_drag_range(&self, y: f64) -> bool {
        y >= self.initial_center.y && y < self.final_center.y
    }

    /// Normalized progress of a center at height `center_y`, clamped to [0, 1].
    #[must_use]
    pub fn progress_at(&self, center_y: f64) -> f64 {
        if self.vertical_range <= GEOMETRY_EPSILON {
            return 0.0;
        }
        ((center_y - self.initial_center.y) / self.vertical_range).clamp(0.0, 1.0)
    }

    /// Interpolated size at `progress`; height follows the aspect ratio.
    #[must_use]
    pub fn size_at(&self, progress: f64) -> Size {
        let inverted = 1.0 - progress.clamp(0.0, 1.0);
        Size::from_width(
            self.final_size.width + self.width_range * inverted,
            self.aspect_ratio,
        )
    }

    /// Interpolated center x at `progress`.
    #[must_use]
    pub fn center_x_at(&self, progress: f64) -> f64 {
        self.initial_center.x + self.center_x_range * progress.clamp(0.0, 1.0)
    }

    /// Frame at `progress`, vertically centered on `center_y`.
    #[must_use]
    pub fn frame_at(&self, progress: f64, center_y: f64) -> Frame {
        Frame::from_center(
            Point::new(self.center_x_at(progress), center_y),
            self.size_at(progress),
        )
    }

    /// Endpoint nearer to a release at `y`.
    ///
    /// Exact ties resolve to [`Endpoint::Full`].
    #[must_use]
    pub fn nearest_endpoint(&self, y: f64) -> Endpoint {
        let top_distance = y - self.initial_center.y;
        let bottom_distance = self.final_center.y - y;
        if top_distance > bottom_distance {
            Endpoint::Docked
        } else {
            Endpoint::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Frame {
        Frame::from_size(300.0, 600.0)
    }

    fn tracked() -> Frame {
        Frame::from_size(300.0, 168.75)
    }

    fn model() -> GeometryModel {
        GeometryModel::configure(tracked(), container()).expect("valid geometry")
    }

    #[test]
    fn reference_points_for_portrait_container() {
        let m = model();
        assert_eq!(m.initial_center(), Point::new(150.0, 84.375));
        assert_eq!(m.initial_size(), Size::new(300.0, 168.75));
        assert_eq!(m.final_center(), Point::new(225.0, 555.8125));
        assert!(m.final_size().approx_eq(Size::new(140.0, 78.75)));
    }

    #[test]
    fn ranges_are_derived() {
        let m = model();
        assert!((m.vertical_range() - 471.4375).abs() < 1e-9);
        assert!((m.width_range() - 160.0).abs() < 1e-9);
        assert!((m.center_x_range() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn interpolation_is_continuous_at_both_ends() {
        let m = model();
        assert!(m.size_at(0.0).approx_eq(m.initial_size()));
        assert!((m.center_x_at(0.0) - m.initial_center().x).abs() < 1e-9);
        assert!(m.size_at(1.0).approx_eq(m.final_size()));
        assert!((m.center_x_at(1.0) - m.final_center().x).abs() < 1e-9);
    }

    #[test]
    fn midpoint_interpolation() {
        let m = model();
        let y = m.initial_center().y + 0.5 * m.vertical_range();
        let p = m.progress_at(y);
        assert!((p - 0.5).abs() < 1e-12);
        assert!((m.size_at(p).width - 220.0).abs() < 1e-9);
        assert!((m.center_x_at(p) - 187.5).abs() < 1e-9);
    }

    #[test]
    fn progress_is_clamped() {
        let m = model();
        assert_eq!(m.progress_at(-1000.0), 0.0);
        assert_eq!(m.progress_at(10_000.0), 1.0);
    }

    #[test]
    fn tie_resolves_to_full() {
        let m = model();
        let mid = m.initial_center().y + m.vertical_range() / 2.0;
        assert_eq!(m.nearest_endpoint(mid), Endpoint::Full);
        assert_eq!(m.nearest_endpoint(mid + 0.01), Endpoint::Docked);
        assert_eq!(m.nearest_endpoint(mid - 0.01), Endpoint::Full);
    }

    #[test]
    fn drag_range_is_half_open() {
        let m = model();
        assert!(m.in_drag_range(m.initial_center().y));
        assert!(!m.in_drag_range(m.final_center().y));
        assert!(!m.in_drag_range(m.initial_center().y - 0.5));
    }

    #[test]
    fn narrow_container_is_rejected() {
        let err = GeometryModel::configure(Frame::from_size(20.0, 11.25), Frame::from_size(20.0, 600.0))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ContainerTooNarrow { .. }));
    }

    #[test]
    fn bad_aspect_ratio_is_rejected() {
        let config = ShrinkConfig {
            aspect_ratio: -0.5,
            ..ShrinkConfig::default()
        };
        let err = GeometryModel::configure_with(tracked(), container(), &config).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidAspectRatio { .. }));
    }

    #[test]
    fn non_finite_frames_are_rejected() {
        let err = GeometryModel::configure(Frame::new(f64::NAN, 0.0, 300.0, 100.0), container())
            .unwrap_err();
        assert_eq!(err, ConfigurationError::NonFiniteGeometry);
    }

    #[test]
    fn dock_above_view_is_rejected() {
        // Tracked view already sits at the bottom of a short container.
        let err = GeometryModel::configure(
            Frame::new(0.0, 150.0, 300.0, 168.75),
            Frame::from_size(300.0, 200.0),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::DockNotBelow { .. }));
    }

    #[test]
    fn tracked_narrower_than_dock_is_rejected() {
        let err = GeometryModel::configure(Frame::from_size(100.0, 56.25), container()).unwrap_err();
        assert!(matches!(err, ConfigurationError::DockNotSmaller { .. }));
    }

    #[test]
    fn endpoint_frames_match_reference_points() {
        let m = model();
        assert!(
            m.endpoint_frame(Endpoint::Full)
                .center()
                .approx_eq(m.initial_center())
        );
        assert!(
            m.endpoint_frame(Endpoint::Docked)
                .center()
                .approx_eq(m.final_center())
        );
        assert_eq!(m.endpoint_center(Endpoint::Docked), m.final_center());
    }
}
