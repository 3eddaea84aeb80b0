use nalgebra::Point2;

use crate::engine::COORDINATE_SCALE;
use crate::misc::FloatingPoint;

/// Plane coordinates to the engine's integer grid, rounding to the nearest
/// grid unit.
pub fn to_scaled<T: FloatingPoint>(point: &Point2<T>) -> Point2<i64> {
    let s = T::from_f64(COORDINATE_SCALE as f64).unwrap();
    Point2::new(
        (point.x * s).round().to_i64().unwrap(),
        (point.y * s).round().to_i64().unwrap(),
    )
}

/// Grid coordinates back to the plane.
pub fn from_scaled<T: FloatingPoint>(point: &Point2<i64>) -> Point2<T> {
    let s = T::from_f64(COORDINATE_SCALE as f64).unwrap();
    Point2::new(
        T::from_f64(point.x as f64).unwrap() / s,
        T::from_f64(point.y as f64).unwrap() / s,
    )
}

/// A scalar quantity (distance, tolerance, limit) onto the grid.
pub fn to_scaled_value<T: FloatingPoint>(value: T) -> i64 {
    let s = T::from_f64(COORDINATE_SCALE as f64).unwrap();
    (value * s).round().to_i64().unwrap()
}
