//! Fan-out over a fund's assets.
//!
//! Both per-asset stages go through [`maybe_parallel_map`]: the pipeline
//! transforms each raw asset into its analysis, and the aggregator reads
//! each asset's ten year-over-year contributions. Neither stage shares state
//! between assets, so rayon can run them on any thread; results come back in
//! asset order so diagnostics and warnings keep input order.

use crate::config::AnalysisConfig;

/// Applies `f` to every asset, on rayon's pool once the fund reaches
/// `config.parallel_threshold` assets with `config.parallel` set and the
/// `parallel` feature compiled in. Smaller funds stay on the calling thread.
///
/// ```ignore
/// let outcomes = maybe_parallel_map(&raw_assets, &config, |raw| transform_asset(raw, &config));
/// let contributions = maybe_parallel_map(&analyses, &config, contributions_of);
/// ```
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalysisConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
