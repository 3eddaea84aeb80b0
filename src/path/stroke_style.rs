use crate::misc::FloatingPoint;

/// How two stroke edges meet at an outward corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

/// How an open stroke terminates at its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

/// Stroke attributes the offset pipeline reads off a path.
///
/// `miter_limit` is the conventional ratio of miter length to stroke width
/// above which a miter corner is squared off.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle<T: FloatingPoint> {
    pub join: StrokeJoin,
    pub cap: StrokeCap,
    pub miter_limit: T,
}

impl<T: FloatingPoint> Default for StrokeStyle<T> {
    fn default() -> Self {
        Self {
            join: StrokeJoin::Miter,
            cap: StrokeCap::Butt,
            miter_limit: T::from_f64(10.).unwrap(),
        }
    }
}

impl<T: FloatingPoint> StrokeStyle<T> {
    /// Round joins and round caps, the style stamped onto reconstructed
    /// offset paths.
    pub fn rounded() -> Self {
        Self {
            join: StrokeJoin::Round,
            cap: StrokeCap::Round,
            ..Default::default()
        }
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: T) -> Self {
        self.miter_limit = miter_limit;
        self
    }
}
