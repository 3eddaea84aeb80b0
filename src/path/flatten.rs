use nalgebra::Point2;

use crate::misc::FloatingPoint;

/// Hard cap on recursive subdivision of a single cubic span.
const MAX_DEPTH: usize = 16;

/// Append a polyline approximation of the cubic span to `out`, starting
/// after the span's first control point and ending with its last. The
/// polyline stays within `tolerance` of the curve.
pub(crate) fn flatten_cubic<T: FloatingPoint>(
    cubic: &[Point2<T>; 4],
    tolerance: T,
    out: &mut Vec<Point2<T>>,
) {
    subdivide(cubic, tolerance, 0, out);
    out.push(cubic[3]);
}

fn subdivide<T: FloatingPoint>(
    cubic: &[Point2<T>; 4],
    tolerance: T,
    depth: usize,
    out: &mut Vec<Point2<T>>,
) {
    if depth >= MAX_DEPTH || is_flat(cubic, tolerance) {
        return;
    }
    let (left, right) = split_at_half(cubic);
    subdivide(&left, tolerance, depth + 1, out);
    out.push(right[0]);
    subdivide(&right, tolerance, depth + 1, out);
}

/// Both control points lie within `tolerance` of the chord.
fn is_flat<T: FloatingPoint>(cubic: &[Point2<T>; 4], tolerance: T) -> bool {
    let chord = cubic[3] - cubic[0];
    let len2 = chord.norm_squared();
    let tol2 = tolerance * tolerance;
    if len2 <= tol2 {
        (cubic[1] - cubic[0]).norm_squared() <= tol2
            && (cubic[2] - cubic[0]).norm_squared() <= tol2
    } else {
        let d1 = chord.perp(&(cubic[1] - cubic[0]));
        let d2 = chord.perp(&(cubic[2] - cubic[0]));
        d1 * d1 <= tol2 * len2 && d2 * d2 <= tol2 * len2
    }
}

/// de Casteljau split at t = 1/2.
fn split_at_half<T: FloatingPoint>(cubic: &[Point2<T>; 4]) -> ([Point2<T>; 4], [Point2<T>; 4]) {
    let half = T::from_f64(0.5).unwrap();
    let lerp = |a: Point2<T>, b: Point2<T>| Point2::from(a.coords.lerp(&b.coords, half));
    let p01 = lerp(cubic[0], cubic[1]);
    let p12 = lerp(cubic[1], cubic[2]);
    let p23 = lerp(cubic[2], cubic[3]);
    let p012 = lerp(p01, p12);
    let p123 = lerp(p12, p23);
    let mid = lerp(p012, p123);
    (
        [cubic[0], p01, p012, mid],
        [mid, p123, p23, cubic[3]],
    )
}
