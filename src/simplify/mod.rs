pub mod fit_path;

pub use fit_path::*;

use std::fmt;
use std::sync::Arc;

use crate::misc::FloatingPoint;
use crate::path::VectorPath;

/// Curve fit error bound (plane units) used when neither the options nor a
/// trailing tolerance argument supply one.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Post-processing applied to each reconstructed offset path.
pub enum Simplify<T: FloatingPoint> {
    /// Refit the polyline with cubic spans within the effective tolerance.
    /// This is the default.
    Fit,
    /// Hand the reconstructed polylines back untouched.
    Identity,
    /// A caller-supplied transform, applied to each path in turn.
    Custom(Arc<dyn Fn(VectorPath<T>) -> VectorPath<T> + Send + Sync>),
}

impl<T: FloatingPoint> Simplify<T> {
    pub(crate) fn apply(&self, path: VectorPath<T>, tolerance: T) -> VectorPath<T> {
        match self {
            Simplify::Fit => fit_path(&path, tolerance),
            Simplify::Identity => path,
            Simplify::Custom(f) => f(path),
        }
    }
}

impl<T: FloatingPoint> Default for Simplify<T> {
    fn default() -> Self {
        Simplify::Fit
    }
}

impl<T: FloatingPoint> Clone for Simplify<T> {
    fn clone(&self) -> Self {
        match self {
            Simplify::Fit => Simplify::Fit,
            Simplify::Identity => Simplify::Identity,
            Simplify::Custom(f) => Simplify::Custom(f.clone()),
        }
    }
}

impl<T: FloatingPoint> fmt::Debug for Simplify<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simplify::Fit => f.write_str("Fit"),
            Simplify::Identity => f.write_str("Identity"),
            Simplify::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
