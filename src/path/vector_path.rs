use itertools::Itertools;
use nalgebra::Point2;

use crate::misc::FloatingPoint;

use super::{flatten, PathSegment, StrokeStyle};

/// A 2D vector path: an ordered run of segments, a closed flag and stroke
/// attributes. Consecutive segments span a cubic curve through their
/// handles; a closed path has an implicit span from its last segment back
/// to its first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorPath<T: FloatingPoint> {
    segments: Vec<PathSegment<T>>,
    closed: bool,
    style: StrokeStyle<T>,
}

impl<T: FloatingPoint> VectorPath<T> {
    pub fn new(segments: Vec<PathSegment<T>>, closed: bool) -> Self {
        Self {
            segments,
            closed,
            style: StrokeStyle::default(),
        }
    }

    /// A path of straight spans through the given points.
    pub fn polyline(points: &[Point2<T>], closed: bool) -> Self {
        Self::new(points.iter().map(|p| PathSegment::new(*p)).collect(), closed)
    }

    pub fn with_style(mut self, style: StrokeStyle<T>) -> Self {
        self.style = style;
        self
    }

    pub fn segments(&self) -> &[PathSegment<T>] {
        &self.segments
    }

    pub fn style(&self) -> &StrokeStyle<T> {
        &self.style
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.len()
    }

    /// Anchor points in order, handles ignored.
    pub fn points(&self) -> Vec<Point2<T>> {
        self.segments.iter().map(|s| s.point()).collect_vec()
    }

    /// Cubic control points of the i-th span.
    fn span(&self, i: usize) -> [Point2<T>; 4] {
        let a = &self.segments[i];
        let b = &self.segments[(i + 1) % self.segments.len()];
        [
            a.point(),
            a.point() + a.handle_out(),
            b.point() + b.handle_in(),
            b.point(),
        ]
    }

    fn span_count(&self) -> usize {
        let n = self.segments.len();
        if self.closed {
            n
        } else {
            n.saturating_sub(1)
        }
    }

    /// A copy of this path with every curved span replaced by straight
    /// spans within `tolerance` of the curve. The closed flag and style are
    /// preserved.
    pub fn flattened(&self, tolerance: T) -> Self {
        if self.segments.is_empty() {
            return self.clone();
        }
        let mut points = vec![self.segments[0].point()];
        for i in 0..self.span_count() {
            let cubic = self.span(i);
            let straight = self.segments[i].handle_out() == nalgebra::Vector2::zeros()
                && self.segments[(i + 1) % self.segments.len()].handle_in()
                    == nalgebra::Vector2::zeros();
            if straight {
                points.push(cubic[3]);
            } else {
                flatten::flatten_cubic(&cubic, tolerance, &mut points);
            }
        }
        if self.closed && points.len() > 1 {
            // the final span lands back on the first anchor
            points.pop();
        }
        Self::polyline(&points, self.closed).with_style(self.style)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use super::*;

    #[test]
    fn flattening_a_polyline_is_the_identity() {
        let pts = vec![
            Point2::new(0., 0.),
            Point2::new(10., 0.),
            Point2::new(10., 10.),
        ];
        let path = VectorPath::polyline(&pts, true);
        let flat = path.flattened(1e-2);
        assert_eq!(flat, path);
    }

    #[test]
    fn flattening_a_curved_span_adds_points() {
        let segments = vec![
            PathSegment::with_handles(
                Point2::new(0., 0.),
                Vector2::zeros(),
                Vector2::new(0., 5.),
            ),
            PathSegment::with_handles(
                Point2::new(10., 0.),
                Vector2::new(0., 5.),
                Vector2::zeros(),
            ),
        ];
        let path = VectorPath::new(segments, false);
        let flat = path.flattened(1e-2);
        assert!(flat.vertex_count() > 2);
        assert!(flat.segments().iter().all(|s| s.is_straight()));
        assert_eq!(flat.points()[0], Point2::new(0., 0.));
        assert_eq!(*flat.points().last().unwrap(), Point2::new(10., 0.));
    }

    #[test]
    fn closed_flattened_path_has_no_duplicate_seam_point() {
        let pts = vec![
            Point2::new(0., 0.),
            Point2::new(10., 0.),
            Point2::new(10., 10.),
            Point2::new(0., 10.),
        ];
        let path = VectorPath::polyline(&pts, true);
        let flat = path.flattened(1e-2);
        assert_eq!(flat.vertex_count(), 4);
        assert!(flat.closed());
    }
}
