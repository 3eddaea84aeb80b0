pub mod offset_engine;
pub mod winding_engine;

mod raw_outline;
mod untangle;

pub use offset_engine::*;
pub use winding_engine::*;
