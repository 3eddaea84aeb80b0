use geo::LineIntersection;
use nalgebra::Point2;

/// Winding test slack: a point sitting exactly on an upward edge still
/// counts as wound around once.
const LEFT_EPS: f64 = -1e-5;
/// Minimum |dy| (grid units) of the edge whose midpoint anchors the winding
/// test of a region.
const TEST_EDGE_MIN_DY: f64 = 1.0;
/// Consecutive outline points closer than this are merged.
const DUP_EPS: f64 = 1e-9;

struct Crossing {
    t: f64,
    id: usize,
}

/// Split a self-intersecting outline at its proper crossings and return the
/// simple regions a point of which winds exactly once around the whole
/// outline. A non-self-intersecting outline comes back unchanged as the
/// single region.
pub(super) fn simple_regions(outline: &[Point2<f64>]) -> Vec<Vec<Point2<f64>>> {
    let ring = dedup(outline);
    let n = ring.len();
    if n < 3 {
        return vec![];
    }

    let mut per_edge: Vec<Vec<Crossing>> = (0..n).map(|_| vec![]).collect();
    let mut crossings: Vec<Point2<f64>> = vec![];
    for i in 0..n {
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let li = to_line(ring[i], ring[(i + 1) % n]);
            let lj = to_line(ring[j], ring[(j + 1) % n]);
            let it = geo::algorithm::line_intersection::line_intersection(li, lj);
            if let Some(LineIntersection::SinglePoint {
                intersection,
                is_proper: true,
            }) = it
            {
                let p = Point2::new(intersection.x, intersection.y);
                let id = crossings.len();
                crossings.push(p);
                per_edge[i].push(Crossing {
                    t: param_along(ring[i], ring[(i + 1) % n], p),
                    id,
                });
                per_edge[j].push(Crossing {
                    t: param_along(ring[j], ring[(j + 1) % n], p),
                    id,
                });
            }
        }
    }
    if crossings.is_empty() {
        return vec![ring];
    }

    // rebuild the outline with crossing points spliced into their edges
    let mut points: Vec<Point2<f64>> = Vec::with_capacity(n + crossings.len() * 2);
    let mut tags: Vec<Option<usize>> = Vec::with_capacity(points.capacity());
    for i in 0..n {
        points.push(ring[i]);
        tags.push(None);
        per_edge[i].sort_by(|a, b| a.t.total_cmp(&b.t));
        for c in &per_edge[i] {
            points.push(crossings[c.id]);
            tags.push(Some(c.id));
        }
    }
    let m = points.len();

    let mut twin = vec![usize::MAX; m];
    {
        let mut first_pos = vec![usize::MAX; crossings.len()];
        for (pos, tag) in tags.iter().enumerate() {
            if let Some(id) = tag {
                if first_pos[*id] == usize::MAX {
                    first_pos[*id] = pos;
                } else {
                    twin[pos] = first_pos[*id];
                    twin[first_pos[*id]] = pos;
                }
            }
        }
    }

    // following a crossing over to its twin partitions the positions into
    // cycles, one per simple region
    let succ = |pos: usize| -> usize {
        match tags[pos] {
            Some(_) => (twin[pos] + 1) % m,
            None => (pos + 1) % m,
        }
    };
    let mut visited = vec![false; m];
    let mut regions = vec![];
    for start in 0..m {
        if visited[start] {
            continue;
        }
        let mut region = vec![];
        let mut pos = start;
        loop {
            visited[pos] = true;
            region.push(points[pos]);
            pos = succ(pos);
            if pos == start || visited[pos] {
                break;
            }
        }
        if region.len() >= 3 {
            regions.push(region);
        }
    }

    regions.retain(|region| winds_once(region, &points));
    regions
}

/// The midpoint of the region's first clearly non-horizontal edge winds
/// exactly once around the full outline.
fn winds_once(region: &[Point2<f64>], outline: &[Point2<f64>]) -> bool {
    let n = region.len();
    for i in 0..n {
        let a = region[i];
        let b = region[(i + 1) % n];
        if (b.y - a.y).abs() > TEST_EDGE_MIN_DY {
            let mid = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            return winding_number(mid, outline) == 1;
        }
    }
    false
}

fn winding_number(point: Point2<f64>, ring: &[Point2<f64>]) -> isize {
    let n = ring.len();
    let mut wn = 0;
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        if p0.y <= point.y {
            if p1.y > point.y && is_left(p0, p1, point) >= LEFT_EPS {
                wn += 1;
            }
        } else if p1.y <= point.y && is_left(p0, p1, point) < LEFT_EPS {
            wn -= 1;
        }
    }
    wn
}

fn is_left(p0: Point2<f64>, p1: Point2<f64>, p2: Point2<f64>) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

fn to_line(a: Point2<f64>, b: Point2<f64>) -> geo::Line {
    geo::Line::new(geo::coord! { x: a.x, y: a.y }, geo::coord! { x: b.x, y: b.y })
}

fn param_along(a: Point2<f64>, b: Point2<f64>, p: Point2<f64>) -> f64 {
    let ab = b - a;
    (p - a).dot(&ab) / ab.norm_squared()
}

fn dedup(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut out: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(&q) if (p - q).norm_squared() < DUP_EPS * DUP_EPS => {}
            _ => out.push(p),
        }
    }
    if out.len() > 1 && (out[0] - *out.last().unwrap()).norm_squared() < DUP_EPS * DUP_EPS {
        out.pop();
    }
    out
}
