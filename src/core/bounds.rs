use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Projected coordinates of a map's extrapolated corners.
///
/// `(x0, y0)` corresponds to the normalized image position `(0, 0)` and
/// `(x1, y1)` to `(1, 1)`. No ordering is enforced between the corners;
/// sign and orientation follow the calibration points that produced the
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl MapBounds {
    /// Creates new bounds from the two extrapolated corners
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Gets the signed horizontal extent
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Gets the signed vertical extent
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Normalized position of a projected coordinate within the bounds.
    ///
    /// Returns `None` when the bounds are degenerate on either axis. The
    /// result is outside [0, 1] for coordinates beyond the map edges.
    pub fn relative_of(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.width() == 0.0 || self.height() == 0.0 {
            return None;
        }
        Some(((x - self.x0) / self.width(), (y - self.y0) / self.height()))
    }

    /// Projected coordinate of a normalized position
    pub fn projected_of(&self, nx: f64, ny: f64) -> Point {
        Point::new(self.x0 + nx * self.width(), self.y0 + ny * self.height())
    }

    /// Checks if a projected coordinate falls within the bounds
    pub fn contains_projected(&self, x: f64, y: f64) -> bool {
        match self.relative_of(x, y) {
            Some((nx, ny)) => (0.0..=1.0).contains(&nx) && (0.0..=1.0).contains(&ny),
            None => false,
        }
    }
}
