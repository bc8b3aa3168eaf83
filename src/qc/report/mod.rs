pub mod collate;
pub mod error;
pub mod flags;
pub mod io;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod summary;
pub mod tiers;

pub use error::{ReportError, Result};
