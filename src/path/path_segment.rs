use nalgebra::{Point2, Vector2};

use crate::misc::FloatingPoint;

/// An anchor point with cubic handles stored relative to the anchor.
/// A zero-length handle means the adjoining span leaves (or enters) the
/// anchor as a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment<T: FloatingPoint> {
    point: Point2<T>,
    handle_in: Vector2<T>,
    handle_out: Vector2<T>,
}

impl<T: FloatingPoint> PathSegment<T> {
    /// An anchor with no handles.
    pub fn new(point: Point2<T>) -> Self {
        Self {
            point,
            handle_in: Vector2::zeros(),
            handle_out: Vector2::zeros(),
        }
    }

    pub fn with_handles(point: Point2<T>, handle_in: Vector2<T>, handle_out: Vector2<T>) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }

    pub fn point(&self) -> Point2<T> {
        self.point
    }

    pub fn handle_in(&self) -> Vector2<T> {
        self.handle_in
    }

    pub fn handle_out(&self) -> Vector2<T> {
        self.handle_out
    }

    pub fn set_handle_in(&mut self, handle_in: Vector2<T>) {
        self.handle_in = handle_in;
    }

    pub fn set_handle_out(&mut self, handle_out: Vector2<T>) {
        self.handle_out = handle_out;
    }

    /// True when both handles are zero.
    pub fn is_straight(&self) -> bool {
        self.handle_in == Vector2::zeros() && self.handle_out == Vector2::zeros()
    }
}
