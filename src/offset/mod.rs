pub mod offset_options;
pub mod path_offset;
pub mod scaling;
pub mod style_map;

pub use offset_options::*;
pub use path_offset::*;
pub use scaling::*;
pub use style_map::*;
