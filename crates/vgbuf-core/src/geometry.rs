use thiserror::Error;

/// An integer rectilinear coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether `self` and `other` share a row or a column (i.e. a single
    /// axis-aligned step could connect them, though not necessarily a unit
    /// step).
    pub fn shares_axis_with(&self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }
}

/// A polyline failed to satisfy the rectilinear (axis-aligned) invariant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("segment from ({x1}, {y1}) to ({x2}, {y2}) is not axis-aligned")]
    NonRectilinearSegment { x1: i32, y1: i32, x2: i32, y2: i32 },
}

/// L1 (Manhattan) length of a rectilinear polyline.
///
/// Returns [`GeometryError::NonRectilinearSegment`] if any consecutive pair
/// of points is diagonal.
pub fn polyline_length(points: &[Point]) -> Result<i64, GeometryError> {
    let mut total = 0i64;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.x != b.x && a.y != b.y {
            return Err(GeometryError::NonRectilinearSegment {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
            });
        }
        total += ((b.x - a.x).abs() + (b.y - a.y).abs()) as i64;
    }
    Ok(total)
}

/// Wire capacitance of a piece of wire of the given length: `C = u_c * len`.
pub fn wire_capacitance(unit_c: f64, length: f64) -> f64 {
    unit_c * length
}

/// Elmore delay contributed by a piece of wire of the given length driving a
/// downstream load `c_load`: `D = 1/2 * u_r * u_c * len^2 + u_r * len * c_load`.
pub fn wire_delay(unit_r: f64, unit_c: f64, length: f64, c_load: f64) -> f64 {
    0.5 * unit_r * unit_c * length * length + unit_r * length * c_load
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_segment_length() {
        let pts = [Point::new(0, 0), Point::new(0, 5)];
        assert_eq!(polyline_length(&pts).unwrap(), 5);
    }

    #[test]
    fn multi_segment_length_sums_l1() {
        let pts = [Point::new(0, 0), Point::new(3, 0), Point::new(3, 4)];
        assert_eq!(polyline_length(&pts).unwrap(), 7);
    }

    #[test]
    fn diagonal_segment_is_rejected() {
        let pts = [Point::new(0, 0), Point::new(1, 1)];
        assert!(matches!(
            polyline_length(&pts),
            Err(GeometryError::NonRectilinearSegment { .. })
        ));
    }

    #[test]
    fn wire_delay_matches_elmore_formula() {
        // u_r=1, u_c=1, len=1, c_load=1 -> 0.5*1*1*1 + 1*1*1 = 1.5
        assert_eq!(wire_delay(1.0, 1.0, 1.0, 1.0), 1.5);
    }
}
