mod engine;
mod error;
mod misc;
mod offset;
mod path;
mod simplify;

pub mod prelude {
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::misc::*;
    pub use crate::offset::*;
    pub use crate::path::*;
    pub use crate::simplify::*;
}
