#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in the container's coordinate space (origin at top-left,
//! y grows downward), expressed in platform points as `f64`.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing positions produced by float arithmetic.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// A point in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Compare within [`GEOMETRY_EPSILON`] on both axes.
    #[inline]
    pub fn approx_eq(&self, other: Point) -> bool {
        (self.x - other.x).abs() <= GEOMETRY_EPSILON && (self.y - other.y).abs() <= GEOMETRY_EPSILON
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size with the given width and `height = width * ratio`.
    #[inline]
    pub fn from_width(width: f64, ratio: f64) -> Self {
        Self::new(width, width * ratio)
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether both dimensions are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Compare within [`GEOMETRY_EPSILON`] on both dimensions.
    #[inline]
    pub fn approx_eq(&self, other: Size) -> bool {
        (self.width - other.width).abs() <= GEOMETRY_EPSILON
            && (self.height - other.height).abs() <= GEOMETRY_EPSILON
    }
}

/// A positioned rectangle: origin (top-left corner) plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

impl Frame {
    /// Create a new frame from origin and dimensions.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a frame at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Create a frame of `size` centered on `center`.
    #[inline]
    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Same size, re-centered on `center`.
    #[inline]
    pub fn with_center(&self, center: Point) -> Self {
        Self::from_center(center, self.size)
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Whether origin and size are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Compare center and size within [`GEOMETRY_EPSILON`].
    pub fn approx_eq(&self, other: &Frame) -> bool {
        self.center().approx_eq(other.center()) && self.size.approx_eq(other.size)
    }

    /// Linear interpolation between two frames.
    ///
    /// Centers and sizes are interpolated independently so that a frame
    /// shrinking toward a corner keeps a straight center path.
    pub fn lerp(&self, to: &Frame, t: f64) -> Frame {
        let from_center = self.center();
        let to_center = to.center();
        let center = Point::new(
            from_center.x + (to_center.x - from_center.x) * t,
            from_center.y + (to_center.y - from_center.y) * t,
        );
        let size = Size::new(
            self.size.width + (to.size.width - self.size.width) * t,
            self.size.height + (to.size.height - self.size.height) * t,
        );
        Frame::from_center(center, size)
    }
}
