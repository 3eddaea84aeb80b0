use itertools::Itertools;
use log::{debug, trace};

use crate::engine::{EngineRequest, OffsetEngine, ScaledPolygon};
use crate::error::OffsetError;
use crate::misc::FloatingPoint;
use crate::path::{StrokeStyle, VectorPath};
use crate::simplify::DEFAULT_SIMPLIFY_TOLERANCE;

use super::{from_scaled, style_map, to_scaled, to_scaled_value, OffsetOptions};

/// Tolerance used to flatten curved spans before offsetting, plane units.
const FLATTEN_TOLERANCE: f64 = 1e-2;
/// Vertex cleaning tolerance, plane units, applied on the grid before and
/// after the engine runs.
const CLEAN_TOLERANCE: f64 = 1e-2;
/// Arc approximation bound handed to the engine, plane units.
const ARC_TOLERANCE: f64 = 1e-2;

/// Offsets vector paths through an [`OffsetEngine`].
///
/// One invocation flattens the path, moves it onto the engine's integer
/// grid, cleans it, runs the engine with join and end types mapped from the
/// path's stroke style, cleans and unscales the resulting rings, rebuilds
/// them as closed paths, drops rings too small to enclose area and applies
/// the configured simplification to the survivors.
#[derive(Debug, Clone)]
pub struct PathOffset<E> {
    engine: E,
}

impl<E: OffsetEngine + Default> Default for PathOffset<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: OffsetEngine> PathOffset<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Offset `path` by the given distance (or full options). Positive
    /// distances grow a counterclockwise closed path outwards; open paths
    /// produce the closed outline of their stroked band.
    pub fn offset<T: FloatingPoint>(
        &self,
        path: &VectorPath<T>,
        options: impl Into<OffsetOptions<T>>,
    ) -> Result<Vec<VectorPath<T>>, OffsetError> {
        self.run(path, options.into(), None)
    }

    /// Like [`PathOffset::offset`], with a trailing simplification
    /// tolerance used when the options carry none.
    pub fn offset_with_tolerance<T: FloatingPoint>(
        &self,
        path: &VectorPath<T>,
        options: impl Into<OffsetOptions<T>>,
        tolerance: T,
    ) -> Result<Vec<VectorPath<T>>, OffsetError> {
        self.run(path, options.into(), Some(tolerance))
    }

    fn run<T: FloatingPoint>(
        &self,
        path: &VectorPath<T>,
        options: OffsetOptions<T>,
        fallback_tolerance: Option<T>,
    ) -> Result<Vec<VectorPath<T>>, OffsetError> {
        let options = options.validated()?;
        let clean_tolerance = (CLEAN_TOLERANCE * crate::engine::COORDINATE_SCALE as f64) as i64;

        let flattened = path.flattened(T::from_f64(FLATTEN_TOLERANCE).unwrap());
        let scaled = flattened.points().iter().map(to_scaled).collect_vec();
        let polygon = self.engine.clean(&scaled, clean_tolerance);
        trace!(
            "flattened {} segment(s) into {} vertices, {} after cleaning",
            path.vertex_count(),
            scaled.len(),
            polygon.len()
        );

        let style = path.style();
        let request = EngineRequest {
            delta: to_scaled_value(options.distance()),
            miter_limit: to_scaled_value(style.miter_limit),
            arc_tolerance: (ARC_TOLERANCE * crate::engine::COORDINATE_SCALE as f64) as i64,
            join_type: style_map::join_type(style.join),
            end_type: style_map::end_type(path.closed(), style.cap),
            polygon,
        };
        let Some(rings) = self.engine.offset(&request)? else {
            debug!("engine produced no offset, returning no paths");
            return Ok(vec![]);
        };

        let tolerance = options
            .tolerance()
            .or(fallback_tolerance)
            .unwrap_or_else(|| T::from_f64(DEFAULT_SIMPLIFY_TOLERANCE).unwrap());
        let simplify = options.simplify();
        let paths = rings
            .iter()
            .map(|ring| self.engine.clean(ring, clean_tolerance))
            .map(|ring| reconstruct::<T>(&ring))
            .filter(|path| path.vertex_count() > 3)
            .map(|path| simplify.apply(path, tolerance))
            .collect_vec();
        debug!("offset produced {} path(s)", paths.len());
        Ok(paths)
    }
}

/// A cleaned engine ring back in the plane, as a closed path with rounded
/// stroke attributes.
fn reconstruct<T: FloatingPoint>(ring: &ScaledPolygon) -> VectorPath<T> {
    let points = ring.iter().map(from_scaled).collect_vec();
    VectorPath::polyline(&points, true).with_style(StrokeStyle::rounded())
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use crate::engine::WindingEngine;
    use crate::path::StrokeCap;

    use super::*;

    #[test]
    fn reconstructed_rings_are_closed_and_rounded() {
        let ring = vec![
            Point2::new(0, 0),
            Point2::new(1000, 0),
            Point2::new(1000, 1000),
        ];
        let path: VectorPath<f64> = reconstruct(&ring);
        assert!(path.closed());
        assert_eq!(*path.style(), StrokeStyle::rounded());
        assert_eq!(path.points()[1], Point2::new(1., 0.));
    }

    #[test]
    fn degenerate_paths_offset_to_nothing() {
        let offsetter = PathOffset::new(WindingEngine);
        let path = VectorPath::polyline(&[Point2::new(0., 0.), Point2::new(5., 5.)], true);
        assert!(offsetter.offset(&path, 2.0).unwrap().is_empty());
    }

    #[test]
    fn open_paths_with_negative_distance_offset_to_nothing() {
        let offsetter = PathOffset::new(WindingEngine);
        let path = VectorPath::polyline(&[Point2::new(0., 0.), Point2::new(10., 0.)], false)
            .with_style(StrokeStyle::default().with_cap(StrokeCap::Round));
        assert!(offsetter.offset(&path, -2.0).unwrap().is_empty());
    }
}
