//! Document types for raw input, per-asset analysis and fund results.

mod asset;
mod diagnostics;
mod raw;
mod result;
mod stats;

pub use asset::*;
pub use diagnostics::*;
pub use raw::*;
pub use result::*;
pub use stats::*;
