pub mod config;
pub mod decorator;
pub mod viewer;

pub use config::*;
pub use decorator::*;
pub use viewer::*;
