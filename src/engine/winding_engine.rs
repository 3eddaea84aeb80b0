use itertools::Itertools;
use log::trace;
use nalgebra::Point2;

use super::offset_engine::{EndType, EngineRequest, OffsetEngine, ScaledPolygon};
use super::{raw_outline, untangle};

/// Built-in offset engine.
///
/// Builds the raw offset outline edge by edge, with join geometry at
/// outward corners and caps at open ends, then untangles the outline by
/// splitting it at its self-intersections and keeping the regions that wind
/// exactly once around it. Offsets that collapse the input entirely leave
/// no such region and come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindingEngine;

impl OffsetEngine for WindingEngine {
    fn offset(&self, request: &EngineRequest) -> anyhow::Result<Option<Vec<ScaledPolygon>>> {
        let points = request
            .polygon
            .iter()
            .map(|p| Point2::new(p.x as f64, p.y as f64))
            .collect_vec();

        let outline = match request.end_type {
            EndType::ClosedPolygon => {
                if points.len() < 3 {
                    return Ok(None);
                }
                if request.delta == 0 {
                    return Ok(Some(vec![request.polygon.clone()]));
                }
                let params = raw_outline::OutlineParams::from_request(request);
                raw_outline::closed_outline(&points, &params)
            }
            cap => {
                if points.len() < 2 || request.delta <= 0 {
                    return Ok(None);
                }
                let params = raw_outline::OutlineParams::from_request(request);
                raw_outline::open_outline(&points, cap, &params)
            }
        };
        if outline.len() < 3 {
            return Ok(None);
        }

        let regions = untangle::simple_regions(&outline);
        trace!(
            "outline of {} points untangled into {} region(s)",
            outline.len(),
            regions.len()
        );
        let rings = regions
            .into_iter()
            .map(to_scaled_ring)
            .filter(|r| r.len() >= 3)
            .collect_vec();
        Ok(Some(rings))
    }
}

fn to_scaled_ring(region: Vec<Point2<f64>>) -> ScaledPolygon {
    let mut ring: ScaledPolygon = Vec::with_capacity(region.len());
    for p in region {
        let q = Point2::new(p.x.round() as i64, p.y.round() as i64);
        if ring.last() != Some(&q) {
            ring.push(q);
        }
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}
