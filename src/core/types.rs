use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("degenerate normalization: {0}")]
    DegenerateNormalization(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Interpolated,
    Modeled,
}

/// One row of the distribution table. Share and average fields stay zero
/// until the normalizer fills them; `max_wealth_usd` is `None` only for the
/// single open-ended terminal bin.
#[derive(Debug, Clone, Serialize)]
pub struct Bin {
    pub min_wealth_usd: f64,
    pub max_wealth_usd: Option<f64>,
    pub population_count: f64,
    pub population_share: f64,
    pub total_wealth_usd: f64,
    pub wealth_share: f64,
    pub avg_wealth_usd: f64,
    pub data_quality: DataQuality,
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KnownThresholds {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    #[serde(rename = "p99.9")]
    pub p99_9: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Methodology {
    pub interpolation: String,
    pub pareto_modeling: String,
    pub normalization: String,
    pub validation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub source: String,
    pub source_url: String,
    pub additional_sources: Vec<String>,
    pub data_year: i32,
    pub report_year: i32,
    pub notes: Vec<String>,
    pub methodology: Methodology,
    pub known_thresholds: KnownThresholds,
    pub total_adult_population: f64,
    pub total_global_wealth_usd: f64,
    pub mean_wealth_per_adult: f64,
    pub number_of_bins: usize,
}

/// Aggregate sums recomputed from the final bins, for sanity display only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Verification {
    pub total_population_sum: f64,
    pub total_wealth_sum: f64,
    pub population_share_sum: f64,
    pub wealth_share_sum: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,
    pub bins: Vec<Bin>,
    pub verification: Verification,
}
