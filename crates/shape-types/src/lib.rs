pub mod color;
pub mod selection;

pub use color::*;
pub use selection::*;
