use nalgebra::Point2;

/// Fixed multiplier between plane coordinates and the engine's integer grid.
pub const COORDINATE_SCALE: i64 = 1000;

/// One polygonal ring on the engine's integer grid, implicitly closed.
pub type ScaledPolygon = Vec<Point2<i64>>;

/// Join geometry inserted where two offset edges meet at an outward corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinType {
    Miter,
    Round,
    Square,
}

/// Whether the input is a closed polygon, or an open polyline with the
/// given cap geometry at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndType {
    ClosedPolygon,
    OpenRound,
    OpenSquare,
    OpenButt,
}

/// A single offset request in the engine's integer domain. `delta`,
/// `miter_limit` and `arc_tolerance` arrive pre-multiplied by
/// [`COORDINATE_SCALE`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub delta: i64,
    pub miter_limit: i64,
    pub arc_tolerance: i64,
    pub join_type: JoinType,
    pub end_type: EndType,
    pub polygon: ScaledPolygon,
}

/// A polygon offsetting capability working on the integer grid.
pub trait OffsetEngine {
    /// Offset one polygon. `Ok(None)` signals the engine could not produce
    /// an offset at all (degenerate input); a fully collapsing offset is
    /// `Ok(Some(vec![]))`.
    fn offset(&self, request: &EngineRequest) -> anyhow::Result<Option<Vec<ScaledPolygon>>>;

    /// Drop vertices within `tolerance` grid units of their predecessor,
    /// then interior vertices within `tolerance` of the line through their
    /// neighbors. Endpoints are kept so open polylines survive intact.
    fn clean(&self, polygon: &[Point2<i64>], tolerance: i64) -> ScaledPolygon {
        clean_scaled_polygon(polygon, tolerance)
    }
}

pub fn clean_scaled_polygon(polygon: &[Point2<i64>], tolerance: i64) -> ScaledPolygon {
    let tol2 = tolerance * tolerance;
    let mut points: ScaledPolygon = Vec::with_capacity(polygon.len());
    for &p in polygon {
        match points.last() {
            Some(&q) if distance2(p, q) <= tol2 => {}
            _ => points.push(p),
        }
    }

    loop {
        let mut removed = false;
        let mut i = 1;
        while i + 1 < points.len() {
            if within_line(points[i - 1], points[i], points[i + 1], tolerance) {
                points.remove(i);
                removed = true;
            } else {
                i += 1;
            }
        }
        if !removed {
            break;
        }
    }
    points
}

fn distance2(a: Point2<i64>, b: Point2<i64>) -> i64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Perpendicular distance of `b` from the line through `a` and `c` is at
/// most `tolerance`, compared without division.
fn within_line(a: Point2<i64>, b: Point2<i64>, c: Point2<i64>, tolerance: i64) -> bool {
    let cross = ((b.x - a.x) as i128) * ((c.y - a.y) as i128)
        - ((c.x - a.x) as i128) * ((b.y - a.y) as i128);
    let len2 = distance2(c, a) as i128;
    cross * cross <= (tolerance as i128) * (tolerance as i128) * len2
}
