use crate::error::OffsetError;
use crate::misc::FloatingPoint;
use crate::simplify::Simplify;

/// Options controlling one offset invocation. A bare distance converts into
/// options with the defaults: no explicit tolerance and the built-in curve
/// fit as post-processing.
#[derive(Debug, Clone)]
pub struct OffsetOptions<T: FloatingPoint> {
    distance: T,
    tolerance: Option<T>,
    simplify: Simplify<T>,
}

impl<T: FloatingPoint> OffsetOptions<T> {
    pub fn new(distance: T) -> Self {
        Self {
            distance,
            tolerance: None,
            simplify: Simplify::default(),
        }
    }

    /// Curve fit error bound, plane units. Overrides any trailing tolerance
    /// argument and the default.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_simplify(mut self, simplify: Simplify<T>) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn distance(&self) -> T {
        self.distance
    }

    pub fn tolerance(&self) -> Option<T> {
        self.tolerance
    }

    pub fn simplify(&self) -> &Simplify<T> {
        &self.simplify
    }

    pub(crate) fn validated(self) -> Result<Self, OffsetError> {
        let finite = self
            .distance
            .to_f64()
            .is_some_and(|distance| distance.is_finite());
        if finite {
            Ok(self)
        } else {
            Err(OffsetError::Argument {
                distance: self.distance.to_f64().unwrap_or(f64::NAN),
            })
        }
    }
}

impl<T: FloatingPoint> From<T> for OffsetOptions<T> {
    fn from(distance: T) -> Self {
        Self::new(distance)
    }
}
