use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Floating point types usable as plane coordinates (f32, f64).
/// The `ToPrimitive` bound covers the crossings into the offset engine's
/// integer grid and into `geo`'s f64 predicates.
pub trait FloatingPoint: RealField + ToPrimitive + Copy {}

impl FloatingPoint for f64 {}
impl FloatingPoint for f32 {}
