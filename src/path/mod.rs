mod flatten;
pub mod path_segment;
pub mod stroke_style;
pub mod vector_path;

pub use path_segment::*;
pub use stroke_style::*;
pub use vector_path::*;
