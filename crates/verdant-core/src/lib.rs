//! # Verdant Core
//!
//! Schema, document types and errors shared by the Verdant ESG aggregation crates.
//!
//! - **Schema**: the closed set of ten ESG metrics ([`MetricPath`], [`MetricSet`])
//! - **Documents**: [`MetricStats`], [`MetricSeries`], [`AssetAnalysis`],
//!   [`AnalysisResult`] and the raw input form [`RawAsset`]
//! - **Diagnostics**: [`AggregationWarning`], [`AssetFailure`], [`Diagnostics`]
//! - **Rounding**: decimal helpers that round half away from zero
//!
//! ## Example
//!
//! ```rust
//! use verdant_core::prelude::*;
//!
//! let stats: FundStatistics = MetricSet::from_fn(|_| 0.0);
//! assert_eq!(*stats.get(MetricPath::EthicsViolations), 0.0);
//! assert_eq!(MetricPath::Co2Emission.as_str(), "environmental.CO2_emission");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod rounding;
pub mod schema;
pub mod types;

pub use error::{VerdantError, VerdantResult};
pub use schema::{
    BoardDiversity, Category, EnvironmentalMetrics, GovernanceMetrics, MetricPath, MetricSet,
    SocialMetrics,
};
pub use types::{
    AggregationWarning, AnalysisResult, AssetAnalysis, AssetFailure, AssetMetrics, Diagnostics,
    FundStatistics, MetricSeries, MetricStats, RawAsset, TimeSeries,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{VerdantError, VerdantResult};
    pub use crate::schema::{Category, MetricPath, MetricSet};
    pub use crate::types::{
        AggregationWarning, AnalysisResult, AssetAnalysis, AssetFailure, AssetMetrics,
        Diagnostics, FundStatistics, MetricSeries, MetricStats, RawAsset, TimeSeries,
    };
}
