pub use kurbo::{Point, Vec2};

/// Index of a tracked path, in the order the paths were handed to the wobbler.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PathId(pub usize);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// Per-axis random offset applied to a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create an offset from its two components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation `self + (to - self) * r`, applied per axis.
    pub fn lerp(self, to: Self, r: f64) -> Self {
        Self {
            x: self.x + (to.x - self.x) * r,
            y: self.y + (to.y - self.y) * r,
        }
    }

    /// Translate a point by this offset.
    pub fn apply(self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }

    /// Largest absolute component.
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

impl From<Offset> for Vec2 {
    fn from(o: Offset) -> Self {
        Vec2::new(o.x, o.y)
    }
}
