pub mod analyzer;
pub mod metadata;
pub mod narrative;
pub mod prompt;
pub mod reach;
pub mod transcript;
pub mod video_id;

pub use analyzer::*;
pub use metadata::*;
pub use narrative::*;
pub use prompt::*;
pub use reach::{ReachPotential, ReachScore};
pub use transcript::*;
pub use video_id::*;

#[cfg(test)]
pub mod testing;
