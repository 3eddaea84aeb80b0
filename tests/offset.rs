use std::sync::Arc;

use approx::assert_relative_eq;
use nalgebra::Point2;

use konturo::prelude::*;

fn square() -> VectorPath<f64> {
    VectorPath::polyline(
        &[
            Point2::new(0., 0.),
            Point2::new(10., 0.),
            Point2::new(10., 10.),
            Point2::new(0., 10.),
        ],
        true,
    )
}

fn rounded_square() -> VectorPath<f64> {
    square().with_style(StrokeStyle::default().with_join(StrokeJoin::Round))
}

/// Distance from `p` to the boundary of the filled square [0, 10]^2,
/// for points outside it.
fn distance_to_square(p: &Point2<f64>) -> f64 {
    let c = Point2::new(p.x.clamp(0., 10.), p.y.clamp(0., 10.));
    (p - c).norm()
}

#[test]
fn outset_square_with_round_joins_traces_the_offset_band() {
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter.offset(&rounded_square(), 2.0).unwrap();
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(path.closed());
    assert!(path.vertex_count() > 3);
    for p in path.points() {
        let d = distance_to_square(&p);
        assert!((1.95..=2.05).contains(&d), "anchor {p} is {d} from the square");
    }

}

#[test]
fn a_bare_distance_and_default_options_are_equivalent() {
    let offsetter = PathOffset::new(WindingEngine);
    let bare = offsetter.offset(&rounded_square(), 2.0).unwrap();
    let options = offsetter
        .offset(&rounded_square(), OffsetOptions::new(2.0))
        .unwrap();
    assert_eq!(bare, options);
}

#[test]
fn non_finite_distances_fail_with_an_argument_error() {
    let offsetter = PathOffset::new(WindingEngine);
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = offsetter.offset(&square(), bad).unwrap_err();
        assert!(matches!(err, OffsetError::Argument { .. }), "{err}");
    }
}

#[test]
fn identity_simplification_returns_the_raw_engine_polylines() {
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter
        .offset(
            &rounded_square(),
            OffsetOptions::new(2.0).with_simplify(Simplify::Identity),
        )
        .unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].segments().iter().all(|s| s.is_straight()));

    // the polyline spans the whole offset band
    let xs: Vec<f64> = paths[0].points().iter().map(|p| p.x).collect();
    let min_x = xs.iter().cloned().fold(f64::MAX, f64::min);
    let max_x = xs.iter().cloned().fold(f64::MIN, f64::max);
    assert!((-2.01..=-1.99).contains(&min_x), "min_x = {min_x}");
    assert!((11.99..=12.01).contains(&max_x), "max_x = {max_x}");

    // reproduce the pipeline's engine invocation by hand: same ring sizes
    let engine = WindingEngine;
    let scaled: Vec<Point2<i64>> = square().points().iter().map(to_scaled).collect();
    let request = EngineRequest {
        delta: 2_000,
        miter_limit: 10_000,
        arc_tolerance: 10,
        join_type: JoinType::Round,
        end_type: EndType::ClosedPolygon,
        polygon: engine.clean(&scaled, 10),
    };
    let rings = engine.offset(&request).unwrap().unwrap();
    assert_eq!(rings.len(), 1);
    assert_eq!(engine.clean(&rings[0], 10).len(), paths[0].vertex_count());
}

#[test]
fn curve_fitting_reduces_the_vertex_count_and_bends_the_spans() {
    let offsetter = PathOffset::new(WindingEngine);
    let identity = offsetter
        .offset(
            &rounded_square(),
            OffsetOptions::new(2.0).with_simplify(Simplify::Identity),
        )
        .unwrap();
    let fitted = offsetter.offset(&rounded_square(), 2.0).unwrap();
    assert!(fitted[0].vertex_count() < identity[0].vertex_count());
    assert!(fitted[0].segments().iter().any(|s| !s.is_straight()));
}

#[test]
fn a_custom_simplification_is_applied_per_path() {
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter
        .offset(
            &rounded_square(),
            OffsetOptions::new(2.0).with_simplify(Simplify::Custom(Arc::new(|path| {
                let points = path.points();
                VectorPath::polyline(&points[..points.len().min(6)], true)
            }))),
        )
        .unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].vertex_count(), 6);
}

#[test]
fn ring_survival_is_decided_before_simplification() {
    // a simplification condensing a large valid ring below four vertices
    // must not make the ring vanish from the result
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter
        .offset(
            &rounded_square(),
            OffsetOptions::new(2.0).with_simplify(Simplify::Custom(Arc::new(|path| {
                let points = path.points();
                VectorPath::polyline(&points[..3], true)
            }))),
        )
        .unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].vertex_count(), 3);
}

#[test]
fn inset_collapses_to_an_empty_sequence() {
    let offsetter = PathOffset::new(WindingEngine);
    assert!(offsetter.offset(&square(), -6.0).unwrap().is_empty());
}

#[test]
fn inset_square_keeps_miter_corners() {
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter
        .offset(
            &square(),
            OffsetOptions::new(-2.0).with_simplify(Simplify::Identity),
        )
        .unwrap();
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.vertex_count(), 4);
    for p in path.points() {
        assert!((p.x - 2.).abs() < 1e-9 || (p.x - 8.).abs() < 1e-9);
        assert!((p.y - 2.).abs() < 1e-9 || (p.y - 8.).abs() < 1e-9);
    }
}

#[test]
fn open_paths_offset_into_a_closed_stroke_outline() {
    let offsetter = PathOffset::new(WindingEngine);
    let line: VectorPath<f64> =
        VectorPath::polyline(&[Point2::new(0., 0.), Point2::new(10., 0.)], false)
            .with_style(StrokeStyle::default().with_cap(StrokeCap::Round));
    let paths = offsetter.offset(&line, 2.0).unwrap();
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert!(path.closed());
    for p in path.points() {
        let c = Point2::new(p.x.clamp(0., 10.), 0.);
        let d = (p - c).norm();
        assert!((1.95..=2.05).contains(&d), "anchor {p} is {d} from the spine");
    }
}

#[test]
fn butt_caps_stop_at_the_endpoints() {
    let offsetter = PathOffset::new(WindingEngine);
    let line: VectorPath<f64> =
        VectorPath::polyline(&[Point2::new(0., 0.), Point2::new(10., 0.)], false);
    let paths = offsetter
        .offset(&line, OffsetOptions::new(2.0).with_simplify(Simplify::Identity))
        .unwrap();
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.vertex_count(), 4);
    for p in path.points() {
        assert!((0. ..=10.).contains(&p.x));
        assert_relative_eq!(p.y.abs(), 2., epsilon = 1e-9);
    }
}

#[test]
fn curved_paths_are_flattened_before_offsetting() {
    // a circle of radius 5 drawn as four cubic arcs
    let k = 5. * 0.5522847498307936;
    let segments = vec![
        PathSegment::with_handles(
            Point2::new(5., 0.),
            nalgebra::Vector2::new(0., -k),
            nalgebra::Vector2::new(0., k),
        ),
        PathSegment::with_handles(
            Point2::new(0., 5.),
            nalgebra::Vector2::new(k, 0.),
            nalgebra::Vector2::new(-k, 0.),
        ),
        PathSegment::with_handles(
            Point2::new(-5., 0.),
            nalgebra::Vector2::new(0., k),
            nalgebra::Vector2::new(0., -k),
        ),
        PathSegment::with_handles(
            Point2::new(0., -5.),
            nalgebra::Vector2::new(-k, 0.),
            nalgebra::Vector2::new(k, 0.),
        ),
    ];
    let circle = VectorPath::new(segments, true)
        .with_style(StrokeStyle::default().with_join(StrokeJoin::Round));

    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter.offset(&circle, 2.0).unwrap();
    assert_eq!(paths.len(), 1);
    for p in paths[0].points() {
        let r = p.coords.norm();
        assert!((6.95..=7.05).contains(&r), "anchor {p} has radius {r}");
    }
}

#[test]
fn a_trailing_tolerance_loosens_the_fit_when_options_carry_none() {
    let offsetter = PathOffset::new(WindingEngine);
    let tight = offsetter
        .offset_with_tolerance(&rounded_square(), 2.0, 0.01)
        .unwrap();
    let loose = offsetter
        .offset_with_tolerance(&rounded_square(), 2.0, 1.0)
        .unwrap();
    assert!(loose[0].vertex_count() <= tight[0].vertex_count());

    // an explicit option tolerance wins over the trailing argument
    let explicit = offsetter
        .offset_with_tolerance(&rounded_square(), OffsetOptions::new(2.0).with_tolerance(1.0), 0.01)
        .unwrap();
    assert_eq!(explicit[0].vertex_count(), loose[0].vertex_count());
}

#[test]
fn tiny_rings_are_filtered_out() {
    // a triangle inset close to its collapse leaves at most a sliver
    let triangle = VectorPath::polyline(
        &[
            Point2::new(0., 0.),
            Point2::new(1., 0.),
            Point2::new(0.5, 0.8),
        ],
        true,
    );
    let offsetter = PathOffset::new(WindingEngine);
    let paths = offsetter
        .offset(
            &triangle,
            OffsetOptions::new(-0.27).with_simplify(Simplify::Identity),
        )
        .unwrap();
    // either fully collapsed or a ring with enough vertices to enclose area
    assert!(paths.iter().all(|p| p.vertex_count() > 3));
}
