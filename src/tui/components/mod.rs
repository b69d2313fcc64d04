pub mod chart;
pub mod input;
pub mod markdown;
pub mod progress;
pub mod viewer;

pub use chart::*;
pub use input::*;
pub use markdown::*;
pub use progress::*;
pub use viewer::*;
