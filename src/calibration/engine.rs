//! Per-axis extrapolation math behind [`calibrate`](super::calibrate).

use super::{Axis, CalibrationError, CalibrationPoint};

/// Computes the projected bounds of one axis from 2, 3 or 4 points.
///
/// Returns the projected coordinates at the normalized extents 0 and 1 of
/// the given axis.
pub(super) fn axis_bounds(
    points: &[CalibrationPoint],
    axis: Axis,
) -> Result<(f64, f64), CalibrationError> {
    match points.len() {
        2 => two_point(&points[0], &points[1], axis),
        3 => {
            // min and max along this axis become the extrapolation pair;
            // the other axis may pick a different pair
            let sorted = sorted_by_axis(points, axis);
            two_point(&sorted[0], &sorted[2], axis)
        }
        4 => four_point(&sorted_by_axis(points, axis), axis),
        count => Err(CalibrationError::UnsupportedPointCount(count)),
    }
}

/// Linear extrapolation from two points to the normalized extents 0 and 1
fn two_point(
    a: &CalibrationPoint,
    b: &CalibrationPoint,
    axis: Axis,
) -> Result<(f64, f64), CalibrationError> {
    let delta_norm = axis.normalized(b) - axis.normalized(a);
    if delta_norm == 0.0 {
        return Err(CalibrationError::DegenerateAxis(axis));
    }
    let scale = (axis.absolute(b) - axis.absolute(a)) / delta_norm;

    let low = axis.absolute(a) - scale * axis.normalized(a);
    let high = axis.absolute(b) + scale * (1.0 - axis.normalized(b));
    Ok((low, high))
}

/// Extrapolation with a scale factor averaged over the deltas from the
/// axis-minimum point to the three others, weighted by their normalized
/// spans. `points` must be sorted ascending along `axis`.
fn four_point(points: &[CalibrationPoint], axis: Axis) -> Result<(f64, f64), CalibrationError> {
    let min = &points[0];
    let max = &points[points.len() - 1];

    let mut norm_sum = 0.0;
    let mut proj_sum = 0.0;
    for point in &points[1..] {
        norm_sum += axis.normalized(point) - axis.normalized(min);
        proj_sum += axis.absolute(point) - axis.absolute(min);
    }
    if norm_sum == 0.0 {
        return Err(CalibrationError::DegenerateAxis(axis));
    }
    let scale = proj_sum / norm_sum;

    let low = axis.absolute(min) - scale * axis.normalized(min);
    let high = axis.absolute(max) + scale * (1.0 - axis.normalized(max));
    Ok((low, high))
}

/// Sorts points ascending along `axis` with a total tie-break over the
/// remaining coordinates, so equal inputs order identically no matter how
/// the caller arranged them.
fn sorted_by_axis(points: &[CalibrationPoint], axis: Axis) -> Vec<CalibrationPoint> {
    let other = axis.other();
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        axis.normalized(a)
            .total_cmp(&axis.normalized(b))
            .then(other.normalized(a).total_cmp(&other.normalized(b)))
            .then(axis.absolute(a).total_cmp(&axis.absolute(b)))
            .then(other.absolute(a).total_cmp(&other.absolute(b)))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_order_independent() {
        let a = CalibrationPoint::new(0.1, 0.1, 10.0, 10.0);
        let b = CalibrationPoint::new(0.9, 0.9, 90.0, 90.0);

        // the formula handles either supply order
        assert_eq!(two_point(&a, &b, Axis::X), Ok((0.0, 100.0)));
        assert_eq!(two_point(&b, &a, Axis::X), Ok((0.0, 100.0)));
    }

    #[test]
    fn test_sorted_by_axis_breaks_ties() {
        let points = [
            CalibrationPoint::new(0.5, 0.9, 1.0, 2.0),
            CalibrationPoint::new(0.5, 0.1, 3.0, 4.0),
            CalibrationPoint::new(0.2, 0.5, 5.0, 6.0),
        ];
        let sorted = sorted_by_axis(&points, Axis::X);
        assert_eq!(sorted[0].normalized_x, 0.2);
        // ties on x resolve by the y coordinate
        assert_eq!(sorted[1].normalized_y, 0.1);
        assert_eq!(sorted[2].normalized_y, 0.9);
    }

    #[test]
    fn test_four_point_averaged_scale() {
        // three points agree on scale 100, one disagrees; the extrapolated
        // edge blends them instead of fitting exactly
        let points = sorted_by_axis(
            &[
                CalibrationPoint::new(0.0, 0.0, 0.0, 0.0),
                CalibrationPoint::new(0.5, 0.5, 40.0, 40.0),
                CalibrationPoint::new(0.8, 0.8, 80.0, 80.0),
                CalibrationPoint::new(0.9, 0.9, 90.0, 90.0),
            ],
            Axis::X,
        );
        let (low, high) = four_point(&points, Axis::X).unwrap();
        // scale = (40 + 80 + 90) / (0.5 + 0.8 + 0.9) = 210 / 2.2
        let scale = 210.0 / 2.2;
        assert!((low - 0.0).abs() < 1e-9);
        assert!((high - (90.0 + scale * 0.1)).abs() < 1e-9);
    }
}
