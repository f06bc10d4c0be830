use super::binners::{linear_bins, pareto_bins_finite, pareto_open_ended_tail};
use super::config::{PipelineConfig, RangeModel, RangeSpec};
use super::types::{Bin, PipelineError};

/// Walk the configured range table and produce one flat, ordered bin
/// sequence covering [0, inf): linear segments first, Pareto segments after,
/// and a single open-ended tail contributed by the final segment.
pub fn assemble_bins(config: &PipelineConfig) -> Result<Vec<Bin>, PipelineError> {
    let Some(last) = config.ranges.last() else {
        return Err(PipelineError::Configuration(
            "at least one range is required".to_string(),
        ));
    };
    let RangeModel::Pareto { alpha: tail_alpha } = last.model else {
        return Err(PipelineError::Configuration(
            "final range must use a Pareto model to cover the open tail".to_string(),
        ));
    };
    validate_partition(&config.ranges)?;

    let mut bins = Vec::new();
    for range in &config.ranges {
        match range.model {
            RangeModel::Linear { wealth_usd } => bins.extend(linear_bins(
                range.min_wealth_usd,
                range.max_wealth_usd,
                range.step,
                range.population,
                wealth_usd,
            )?),
            RangeModel::Pareto { alpha } => bins.extend(pareto_bins_finite(
                range.min_wealth_usd,
                range.max_wealth_usd,
                range.step,
                range.population,
                alpha,
            )?),
        }
    }

    bins.push(pareto_open_ended_tail(
        last.min_wealth_usd,
        last.max_wealth_usd,
        last.population,
        tail_alpha,
    )?);

    Ok(bins)
}

fn validate_partition(ranges: &[RangeSpec]) -> Result<(), PipelineError> {
    if ranges[0].min_wealth_usd != 0.0 {
        return Err(PipelineError::Configuration(format!(
            "first range must start at 0, got {}",
            ranges[0].min_wealth_usd
        )));
    }
    for pair in ranges.windows(2) {
        if pair[0].max_wealth_usd != pair[1].min_wealth_usd {
            return Err(PipelineError::Configuration(format!(
                "ranges are not contiguous: {} ends at {} but the next starts at {}",
                pair[0].min_wealth_usd, pair[0].max_wealth_usd, pair[1].min_wealth_usd
            )));
        }
    }
    Ok(())
}
