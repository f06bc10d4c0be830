mod assemble;
mod binners;
mod config;
mod dataset;
mod normalize;
mod types;

pub use assemble::assemble_bins;
pub use binners::{linear_bins, pareto_bins_finite, pareto_open_ended_tail};
pub use config::{PipelineConfig, RangeModel, RangeSpec};
pub use dataset::build_dataset;
pub use normalize::normalize_bins;
pub use types::{
    Bin, DataQuality, Dataset, KnownThresholds, Metadata, Methodology, PipelineError,
    Verification,
};
