use nalgebra::{Point2, Vector2};

use crate::misc::FloatingPoint;
use crate::path::{PathSegment, VectorPath};

/// Refit a polyline path with cubic spans staying within `tolerance` of the
/// original points. Closed paths are fitted through their seam and the
/// trailing handle folded back onto the first segment.
pub fn fit_path<T: FloatingPoint>(path: &VectorPath<T>, tolerance: T) -> VectorPath<T> {
    let mut points = path.points();
    points.dedup();
    if path.closed() && points.len() > 1 {
        points.push(points[0]);
    }
    if points.len() < 2 {
        return path.clone();
    }
    let mut segments = fit_points(&points, tolerance);
    if path.closed() && segments.len() > 1 {
        let seam = segments.pop().unwrap();
        segments[0].set_handle_in(seam.handle_in());
    }
    VectorPath::new(segments, path.closed()).with_style(*path.style())
}

/// Least-squares cubic fitting with adaptive splitting at the point of
/// largest error.
pub(crate) fn fit_points<T: FloatingPoint>(
    points: &[Point2<T>],
    tolerance: T,
) -> Vec<PathSegment<T>> {
    let mut segments = vec![PathSegment::new(points[0])];
    if points.len() < 2 {
        return segments;
    }
    let last = points.len() - 1;
    let t_hat1 = unit(points[1] - points[0]);
    let t_hat2 = unit(points[last - 1] - points[last]);
    fit_cubic(
        points,
        0,
        last,
        t_hat1,
        t_hat2,
        tolerance * tolerance,
        &mut segments,
    );
    segments
}

fn fit_cubic<T: FloatingPoint>(
    points: &[Point2<T>],
    first: usize,
    last: usize,
    t_hat1: Vector2<T>,
    t_hat2: Vector2<T>,
    tol2: T,
    segments: &mut Vec<PathSegment<T>>,
) {
    if last - first == 1 {
        let third = T::from_f64(1. / 3.).unwrap();
        let chord = points[last] - points[first];
        add_curve(
            segments,
            &[
                points[first],
                points[first] + chord * third,
                points[last] - chord * third,
                points[last],
            ],
        );
        return;
    }

    let mut u = chord_length_parameterize(points, first, last);
    let mut split = (first + last) / 2;
    for _ in 0..=4 {
        let bezier = generate_bezier(points, first, last, &u, t_hat1, t_hat2);
        let (err2, index) = max_error(points, first, last, &bezier, &u);
        if err2 <= tol2 {
            add_curve(segments, &bezier);
            return;
        }
        split = index;
        u = reparameterize(points, first, &u, &bezier);
    }

    let t_center = center_tangent(points, split);
    fit_cubic(points, first, split, t_hat1, t_center, tol2, segments);
    fit_cubic(points, split, last, -t_center, t_hat2, tol2, segments);
}

fn add_curve<T: FloatingPoint>(segments: &mut Vec<PathSegment<T>>, bezier: &[Point2<T>; 4]) {
    segments
        .last_mut()
        .unwrap()
        .set_handle_out(bezier[1] - bezier[0]);
    let mut segment = PathSegment::new(bezier[3]);
    segment.set_handle_in(bezier[2] - bezier[3]);
    segments.push(segment);
}

/// Parameterize the points by normalized cumulative chord length.
fn chord_length_parameterize<T: FloatingPoint>(
    points: &[Point2<T>],
    first: usize,
    last: usize,
) -> Vec<T> {
    let mut u = Vec::with_capacity(last - first + 1);
    u.push(T::zero());
    for i in first + 1..=last {
        let prev = *u.last().unwrap();
        u.push(prev + (points[i] - points[i - 1]).norm());
    }
    let total = *u.last().unwrap();
    if total > T::zero() {
        for v in &mut u {
            *v /= total;
        }
    }
    u
}

/// Least-squares solve for the two handle lengths along the fixed end
/// tangents.
fn generate_bezier<T: FloatingPoint>(
    points: &[Point2<T>],
    first: usize,
    last: usize,
    u: &[T],
    t_hat1: Vector2<T>,
    t_hat2: Vector2<T>,
) -> [Point2<T>; 4] {
    let three = T::from_f64(3.).unwrap();
    let p0 = points[first];
    let p3 = points[last];

    let mut c00 = T::zero();
    let mut c01 = T::zero();
    let mut c11 = T::zero();
    let mut x0 = T::zero();
    let mut x1 = T::zero();
    for (i, &t) in u.iter().enumerate() {
        let s = T::one() - t;
        let b0 = s * s * s;
        let b1 = three * s * s * t;
        let b2 = three * s * t * t;
        let b3 = t * t * t;
        let a0 = t_hat1 * b1;
        let a1 = t_hat2 * b2;
        c00 += a0.dot(&a0);
        c01 += a0.dot(&a1);
        c11 += a1.dot(&a1);
        let tmp = points[first + i].coords - (p0.coords * (b0 + b1) + p3.coords * (b2 + b3));
        x0 += a0.dot(&tmp);
        x1 += a1.dot(&tmp);
    }

    let det_c0_c1 = c00 * c11 - c01 * c01;
    let (mut alpha_l, mut alpha_r) = if det_c0_c1.abs() > T::from_f64(1e-12).unwrap() {
        ((x0 * c11 - x1 * c01) / det_c0_c1, (c00 * x1 - c01 * x0) / det_c0_c1)
    } else {
        (T::zero(), T::zero())
    };

    // degenerate or inward-pointing solutions fall back to a third of the
    // chord, the Wu/Barsky heuristic
    let seg_length = (p3 - p0).norm();
    let eps = T::from_f64(1e-6).unwrap() * seg_length;
    if alpha_l < eps || alpha_r < eps {
        let third = seg_length / three;
        alpha_l = third;
        alpha_r = third;
    }

    [p0, p0 + t_hat1 * alpha_l, p3 + t_hat2 * alpha_r, p3]
}

/// Squared distance of the worst point from the fitted curve, and its
/// index.
fn max_error<T: FloatingPoint>(
    points: &[Point2<T>],
    first: usize,
    last: usize,
    bezier: &[Point2<T>; 4],
    u: &[T],
) -> (T, usize) {
    let mut max = T::zero();
    let mut index = (first + last) / 2;
    for i in first + 1..last {
        let d = (evaluate(bezier, u[i - first]) - points[i]).norm_squared();
        if d > max {
            max = d;
            index = i;
        }
    }
    (max, index)
}

/// One Newton-Raphson step per parameter toward the locally closest curve
/// point.
fn reparameterize<T: FloatingPoint>(
    points: &[Point2<T>],
    first: usize,
    u: &[T],
    bezier: &[Point2<T>; 4],
) -> Vec<T> {
    u.iter()
        .enumerate()
        .map(|(i, &t)| newton_raphson(bezier, points[first + i], t))
        .collect()
}

fn newton_raphson<T: FloatingPoint>(bezier: &[Point2<T>; 4], point: Point2<T>, t: T) -> T {
    let three = T::from_f64(3.).unwrap();
    let two = T::from_f64(2.).unwrap();
    let d1: Vec<Vector2<T>> = (0..3)
        .map(|i| (bezier[i + 1] - bezier[i]) * three)
        .collect();
    let d2: Vec<Vector2<T>> = (0..2).map(|i| (d1[i + 1] - d1[i]) * two).collect();

    let q = evaluate(bezier, t);
    let s = T::one() - t;
    let q1 = d1[0] * (s * s) + d1[1] * (two * s * t) + d1[2] * (t * t);
    let q2 = d2[0] * s + d2[1] * t;

    let diff = q - point;
    let denominator = q1.dot(&q1) + diff.dot(&q2);
    if denominator.abs() <= T::from_f64(1e-12).unwrap() {
        return t;
    }
    (t - diff.dot(&q1) / denominator).clamp(T::zero(), T::one())
}

fn evaluate<T: FloatingPoint>(bezier: &[Point2<T>; 4], t: T) -> Point2<T> {
    let mut q = [
        bezier[0].coords,
        bezier[1].coords,
        bezier[2].coords,
        bezier[3].coords,
    ];
    for level in (1..4).rev() {
        for i in 0..level {
            q[i] = q[i].lerp(&q[i + 1], t);
        }
    }
    Point2::from(q[0])
}

/// Tangent through an interior point, pointing back toward the start.
fn center_tangent<T: FloatingPoint>(points: &[Point2<T>], center: usize) -> Vector2<T> {
    let v1 = points[center - 1] - points[center];
    let v2 = points[center] - points[center + 1];
    let v = v1 + v2;
    if v.norm() > T::from_f64(1e-12).unwrap() {
        unit(v)
    } else {
        unit(v1)
    }
}

fn unit<T: FloatingPoint>(v: Vector2<T>) -> Vector2<T> {
    let n = v.norm();
    if n > T::from_f64(1e-12).unwrap() {
        v / n
    } else {
        v
    }
}
