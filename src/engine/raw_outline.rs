use nalgebra::{Point2, Vector2};

use super::offset_engine::{EndType, EngineRequest, JoinType, COORDINATE_SCALE};

/// Junctions with a turn smaller than this are treated as straight.
const ANGLE_EPS: f64 = 1e-6;
/// Edges shorter than this (grid units) are collapsed before offsetting.
const EDGE_EPS: f64 = 0.25;

/// Parameters shared by every junction and cap of one outline.
pub(super) struct OutlineParams {
    pub delta: f64,
    pub join_type: JoinType,
    /// `1 + cos >= threshold` keeps the miter, below it the corner is
    /// squared off.
    pub miter_threshold: f64,
    /// Angular step (radians) keeping round join sagitta within the arc
    /// tolerance.
    pub arc_step: f64,
}

impl OutlineParams {
    pub fn from_request(request: &EngineRequest) -> Self {
        let delta = request.delta as f64;
        let abs_delta = delta.abs().max(1.0);
        // the request carries the miter ratio pre-multiplied by the grid scale
        let miter_limit = request.miter_limit as f64 / COORDINATE_SCALE as f64;
        let miter_threshold = if miter_limit > 2.0 {
            2.0 / (miter_limit * miter_limit)
        } else {
            0.5
        };
        let max_tolerance = (abs_delta * 0.25).max(0.25);
        let arc_tolerance = (request.arc_tolerance as f64).clamp(0.25, max_tolerance);
        let arc_step = 2.0 * (1.0 - arc_tolerance / abs_delta).clamp(-1.0, 1.0).acos();
        Self {
            delta,
            join_type: request.join_type,
            miter_threshold,
            arc_step: arc_step.max(1e-3),
        }
    }
}

/// Raw offset outline of a closed polygon: every edge shifted along its
/// outward normal, join geometry inserted at outward corners, the original
/// vertex inserted at inward ones. The result self-intersects wherever the
/// offset collapses locally; untangling resolves that afterwards.
pub(super) fn closed_outline(points: &[Point2<f64>], params: &OutlineParams) -> Vec<Point2<f64>> {
    let mut points = dedup(points, true);
    if points.len() < 3 {
        return vec![];
    }
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    let n = points.len();
    let normals: Vec<_> = (0..n)
        .map(|i| edge_normal(points[i], points[(i + 1) % n]))
        .collect();
    let mut out = Vec::with_capacity(n * 3);
    for i in 0..n {
        let j = (i + 1) % n;
        out.push(points[i] + normals[i] * params.delta);
        out.push(points[j] + normals[i] * params.delta);
        add_junction(&mut out, points[j], normals[i], normals[j], params);
    }
    out
}

/// Raw offset outline of an open polyline: the forward side at `delta`, an
/// end cap, the reverse side, and a start cap.
pub(super) fn open_outline(
    points: &[Point2<f64>],
    cap: EndType,
    params: &OutlineParams,
) -> Vec<Point2<f64>> {
    let points = dedup(points, false);
    let m = points.len();
    if m < 2 {
        return vec![];
    }
    let normals: Vec<_> = (0..m - 1)
        .map(|e| edge_normal(points[e], points[e + 1]))
        .collect();
    let mut out = Vec::with_capacity(m * 6);

    for e in 0..m - 1 {
        out.push(points[e] + normals[e] * params.delta);
        out.push(points[e + 1] + normals[e] * params.delta);
        if e + 1 < m - 1 {
            add_junction(&mut out, points[e + 1], normals[e], normals[e + 1], params);
        }
    }
    let end_dir = (points[m - 1] - points[m - 2]).normalize();
    add_cap(&mut out, points[m - 1], normals[m - 2], end_dir, cap, params);

    for e in (0..m - 1).rev() {
        let n = -normals[e];
        out.push(points[e + 1] + n * params.delta);
        out.push(points[e] + n * params.delta);
        if e > 0 {
            add_junction(&mut out, points[e], n, -normals[e - 1], params);
        }
    }
    let start_dir = (points[0] - points[1]).normalize();
    add_cap(&mut out, points[0], -normals[0], start_dir, cap, params);

    out
}

/// Insert geometry between the offsets of two edges meeting at `vertex`.
/// `n_from` and `n_to` are the edges' offset-side unit normals.
fn add_junction(
    out: &mut Vec<Point2<f64>>,
    vertex: Point2<f64>,
    n_from: Vector2<f64>,
    n_to: Vector2<f64>,
    params: &OutlineParams,
) {
    let sin_a = (n_from.x * n_to.y - n_from.y * n_to.x).clamp(-1.0, 1.0);
    let cos_a = n_from.dot(&n_to);
    if sin_a.abs() < ANGLE_EPS && cos_a > 0.0 {
        // straight through: the next edge start repeats this point
        out.pop();
        return;
    }
    if sin_a * params.delta < 0.0 {
        // turning away from the offset side: keep the original vertex and
        // let untangling cut the resulting loop away
        out.push(vertex);
        return;
    }
    match params.join_type {
        JoinType::Miter => {
            let r = 1.0 + cos_a;
            if r >= params.miter_threshold {
                out.push(vertex + (n_from + n_to) * (params.delta / r));
            } else {
                add_square(out, vertex, n_from, n_to, sin_a, cos_a, params.delta);
            }
        }
        JoinType::Square => add_square(out, vertex, n_from, n_to, sin_a, cos_a, params.delta),
        JoinType::Round => add_arc(out, vertex, n_from, n_to, sin_a, params),
    }
}

/// Two points truncating the corner one delta out, at the quarter angle of
/// the turn.
fn add_square(
    out: &mut Vec<Point2<f64>>,
    vertex: Point2<f64>,
    n_from: Vector2<f64>,
    n_to: Vector2<f64>,
    sin_a: f64,
    cos_a: f64,
    delta: f64,
) {
    let dx = (sin_a.atan2(cos_a) / 4.0).tan();
    out.push(vertex + (n_from + perp(n_from) * dx) * delta);
    out.push(vertex + (n_to - perp(n_to) * dx) * delta);
}

/// Interior arc points between the two edge offsets, sweeping in the turn
/// direction. The endpoints are already in `out`.
fn add_arc(
    out: &mut Vec<Point2<f64>>,
    vertex: Point2<f64>,
    n_from: Vector2<f64>,
    n_to: Vector2<f64>,
    sin_a: f64,
    params: &OutlineParams,
) {
    let a0 = n_from.y.atan2(n_from.x);
    let mut a1 = n_to.y.atan2(n_to.x);
    if sin_a >= 0.0 {
        while a1 < a0 {
            a1 += std::f64::consts::TAU;
        }
    } else {
        while a1 > a0 {
            a1 -= std::f64::consts::TAU;
        }
    }
    let sweep = a1 - a0;
    let steps = (sweep.abs() / params.arc_step).ceil().max(1.0) as usize;
    for k in 1..steps {
        let a = a0 + sweep * k as f64 / steps as f64;
        out.push(vertex + Vector2::new(a.cos(), a.sin()) * params.delta);
    }
}

/// Cap geometry between the two sides of an open outline. `normal` is the
/// outgoing side's normal at the endpoint and `dir` the unit tangent
/// pointing out of the path.
fn add_cap(
    out: &mut Vec<Point2<f64>>,
    vertex: Point2<f64>,
    normal: Vector2<f64>,
    dir: Vector2<f64>,
    cap: EndType,
    params: &OutlineParams,
) {
    match cap {
        EndType::OpenButt | EndType::ClosedPolygon => {}
        EndType::OpenSquare => {
            out.push(vertex + (normal + dir) * params.delta);
            out.push(vertex + (-normal + dir) * params.delta);
        }
        EndType::OpenRound => {
            let a0 = normal.y.atan2(normal.x);
            let turn = normal.x * dir.y - normal.y * dir.x;
            let sweep = std::f64::consts::PI * turn.signum();
            let steps = (sweep.abs() / params.arc_step).ceil().max(1.0) as usize;
            for k in 1..steps {
                let a = a0 + sweep * k as f64 / steps as f64;
                out.push(vertex + Vector2::new(a.cos(), a.sin()) * params.delta);
            }
        }
    }
}

fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

fn edge_normal(a: Point2<f64>, b: Point2<f64>) -> Vector2<f64> {
    let d = (b - a).normalize();
    Vector2::new(d.y, -d.x)
}

fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

fn dedup(points: &[Point2<f64>], cyclic: bool) -> Vec<Point2<f64>> {
    let mut out: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(&q) if (p - q).norm_squared() < EDGE_EPS * EDGE_EPS => {}
            _ => out.push(p),
        }
    }
    if cyclic && out.len() > 1 {
        let first = out[0];
        let last = *out.last().unwrap();
        if (first - last).norm_squared() < EDGE_EPS * EDGE_EPS {
            out.pop();
        }
    }
    out
}
