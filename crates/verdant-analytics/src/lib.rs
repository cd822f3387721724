//! # Verdant Analytics
//!
//! Turns raw ESG fund documents into analysis documents.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every call is a function of its input, nothing is cached
//! - **Fixed schema**: the ten metric slots are typed, so a missing metric is
//!   caught when the asset is read, not deep inside the arithmetic
//! - **Decimal arithmetic**: statistics are exact on the decimal form of the
//!   observations and rounded half away from zero
//! - **Config-driven parallelism**: optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use verdant_analytics::prelude::*;
//!
//! let stats = summarize(&[10.0, 20.0, 15.0]).unwrap();
//! assert_eq!(stats.average, 15.0);
//!
//! let empty = aggregate_fund(&[]);
//! assert_eq!(*empty.get(MetricPath::Co2Emission), 0.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`summarize`](mod@summarize) - per-metric statistics
//! - [`transform`] - one raw asset to its analysis block
//! - [`aggregate`](mod@aggregate) - fund-wide averages of year-over-year change
//! - [`normalize`](mod@normalize) - input shapes and parsing
//! - [`pipeline`] - the whole run, with per-asset failure isolation
//! - [`config`] - [`AnalysisConfig`]
//!
//! ## Feature Flags
//!
//! - `parallel`: transform and aggregate assets with rayon for large funds

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod config;
pub mod normalize;
pub mod parallel;
pub mod pipeline;
pub mod summarize;
pub mod transform;

pub use aggregate::{
    aggregate, aggregate_documents, aggregate_fund, aggregate_fund_with, FundAggregation,
    YearOverYearSource,
};
pub use config::{AnalysisConfig, FailurePolicy, MissingContribution};
pub use normalize::{
    detect_shape, normalize, parse_document, InputDocument, InputShape, NormalizedFund,
};
pub use pipeline::{analyze, analyze_normalized, AnalysisReport};
pub use summarize::{summarize, summarize_series, summarize_with_unit};
pub use transform::{transform_asset, transform_asset_value};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate_documents, aggregate_fund, aggregate_fund_with};
    pub use crate::config::{AnalysisConfig, FailurePolicy, MissingContribution};
    pub use crate::normalize::{normalize, InputDocument};
    pub use crate::pipeline::{analyze, AnalysisReport};
    pub use crate::summarize::{summarize, summarize_with_unit};
    pub use crate::transform::transform_asset;
    pub use verdant_core::prelude::*;
}
