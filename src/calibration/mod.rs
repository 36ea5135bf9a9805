//! Calibration engine: derives projected map bounds from user-picked
//! reference points.
//!
//! Each reference point ties a normalized position on the map image to a
//! real-world projected coordinate. Two, three, or four points are
//! supported; the X and Y axes are always solved independently, so with
//! three or more points the two axes may extrapolate from different point
//! pairs.

mod engine;

use crate::core::bounds::MapBounds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user-picked correspondence between a relative position on the map
/// image and a real-world projected coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Horizontal position on the image, in [0, 1]
    #[serde(rename = "x")]
    pub normalized_x: f64,
    /// Vertical position on the image, in [0, 1]
    #[serde(rename = "y")]
    pub normalized_y: f64,
    /// Projected x coordinate of the same spot
    #[serde(rename = "proj_x")]
    pub absolute_x: f64,
    /// Projected y coordinate of the same spot
    #[serde(rename = "proj_y")]
    pub absolute_y: f64,
}

impl CalibrationPoint {
    /// Creates a new calibration point
    pub fn new(normalized_x: f64, normalized_y: f64, absolute_x: f64, absolute_y: f64) -> Self {
        Self {
            normalized_x,
            normalized_y,
            absolute_x,
            absolute_y,
        }
    }
}

/// Number of reference points used to derive the map bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationMethod {
    #[serde(rename = "2POINTS")]
    TwoPoints,
    #[serde(rename = "3POINTS")]
    ThreePoints,
    #[serde(rename = "4POINTS")]
    FourPoints,
}

impl CalibrationMethod {
    /// Number of calibration points the method consumes
    pub fn point_count(&self) -> usize {
        match self {
            CalibrationMethod::TwoPoints => 2,
            CalibrationMethod::ThreePoints => 3,
            CalibrationMethod::FourPoints => 4,
        }
    }

    /// Method matching a point count, if any
    pub fn from_point_count(count: usize) -> Option<Self> {
        match count {
            2 => Some(CalibrationMethod::TwoPoints),
            3 => Some(CalibrationMethod::ThreePoints),
            4 => Some(CalibrationMethod::FourPoints),
            _ => None,
        }
    }
}

/// Image axis a calibration refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub(crate) fn normalized(&self, point: &CalibrationPoint) -> f64 {
        match self {
            Axis::X => point.normalized_x,
            Axis::Y => point.normalized_y,
        }
    }

    pub(crate) fn absolute(&self, point: &CalibrationPoint) -> f64 {
        match self {
            Axis::X => point.absolute_x,
            Axis::Y => point.absolute_y,
        }
    }

    pub(crate) fn other(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Why a set of calibration points cannot produce bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("calibration needs 2, 3 or 4 points, got {0}")]
    UnsupportedPointCount(usize),

    #[error("calibration points are not distinct on the {0} axis")]
    DegenerateAxis(Axis),
}

/// Derives projected map bounds from calibration points.
///
/// Only the first `method.point_count()` points are consulted. The result
/// is deterministic for a given point set regardless of input order, and
/// carries no ordering guarantee between opposite corners: inverted
/// calibrations produce inverted bounds.
pub fn calibrate(
    method: CalibrationMethod,
    points: &[CalibrationPoint],
) -> Result<MapBounds, CalibrationError> {
    let needed = method.point_count();
    if points.len() < needed {
        return Err(CalibrationError::UnsupportedPointCount(points.len()));
    }
    let points = &points[..needed];

    let (x0, x1) = engine::axis_bounds(points, Axis::X)?;
    let (y0, y1) = engine::axis_bounds(points, Axis::Y)?;
    Ok(MapBounds::new(x0, y0, x1, y1))
}

/// Calibrates using the method implied by the number of points supplied
pub fn calibrate_auto(points: &[CalibrationPoint]) -> Result<MapBounds, CalibrationError> {
    let method = CalibrationMethod::from_point_count(points.len())
        .ok_or(CalibrationError::UnsupportedPointCount(points.len()))?;
    calibrate(method, points)
}
