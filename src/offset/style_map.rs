use crate::engine::{EndType, JoinType};
use crate::path::{StrokeCap, StrokeJoin};

/// Engine join geometry for a stroke join. Bevel corners map to the
/// engine's squared-off corner.
pub fn join_type(join: StrokeJoin) -> JoinType {
    match join {
        StrokeJoin::Miter => JoinType::Miter,
        StrokeJoin::Round => JoinType::Round,
        StrokeJoin::Bevel => JoinType::Square,
    }
}

/// Engine end treatment: closed paths offset as polygons regardless of
/// their cap, open paths carry their cap geometry over.
pub fn end_type(closed: bool, cap: StrokeCap) -> EndType {
    if closed {
        return EndType::ClosedPolygon;
    }
    match cap {
        StrokeCap::Round => EndType::OpenRound,
        StrokeCap::Square => EndType::OpenSquare,
        StrokeCap::Butt => EndType::OpenButt,
    }
}
