use super::types::{Bin, DataQuality, PipelineError};

/// Subdivide `[min_wealth, max_wealth)` into equal-width bins with uniform
/// population and wealth. Used where only coarse aggregate data exists.
pub fn linear_bins(
    min_wealth: f64,
    max_wealth: f64,
    step: f64,
    total_population: f64,
    total_wealth: f64,
) -> Result<Vec<Bin>, PipelineError> {
    if !(step > 0.0) {
        return Err(PipelineError::Configuration(format!(
            "linear step must be > 0, got {step}"
        )));
    }
    if max_wealth <= min_wealth {
        return Err(PipelineError::Configuration(format!(
            "linear range is empty: min {min_wealth}, max {max_wealth}"
        )));
    }
    if total_population < 0.0 || total_wealth < 0.0 {
        return Err(PipelineError::Configuration(format!(
            "linear allocations must be non-negative: population {total_population}, wealth {total_wealth}"
        )));
    }

    let num_bins = ((max_wealth - min_wealth) / step).floor();
    if num_bins < 1.0 {
        return Err(PipelineError::Configuration(format!(
            "linear step {step} exceeds range width {}",
            max_wealth - min_wealth
        )));
    }

    let pop_per_bin = total_population / num_bins;
    let wealth_per_bin = total_wealth / num_bins;

    let mut bins = Vec::new();
    let mut current = min_wealth;
    while current < max_wealth {
        let bin_max = (current + step).min(max_wealth);
        bins.push(Bin {
            min_wealth_usd: current,
            max_wealth_usd: Some(bin_max),
            population_count: pop_per_bin,
            population_share: 0.0,
            total_wealth_usd: wealth_per_bin,
            wealth_share: 0.0,
            avg_wealth_usd: 0.0,
            data_quality: DataQuality::Interpolated,
            method: "linear_subdivision".to_string(),
        });
        current = bin_max;
    }

    Ok(bins)
}

/// Slice `[min_wealth, max_wealth]` into closed bins under a Pareto Type-I
/// distribution with scale `min_wealth` and shape `alpha`. Population per
/// bin comes from CDF differences; wealth from the truncated conditional
/// mean (midpoint when `alpha <= 1`, where the Pareto mean diverges).
pub fn pareto_bins_finite(
    min_wealth: f64,
    max_wealth: f64,
    step: f64,
    total_population: f64,
    alpha: f64,
) -> Result<Vec<Bin>, PipelineError> {
    validate_pareto_args(min_wealth, max_wealth, total_population, alpha)?;
    if !(step > 0.0) {
        return Err(PipelineError::Configuration(format!(
            "pareto step must be > 0, got {step}"
        )));
    }

    let boundaries = pareto_boundaries(min_wealth, max_wealth, step);
    let cdf: Vec<f64> = boundaries
        .iter()
        .map(|&x| pareto_cdf(min_wealth, alpha, x))
        .collect();

    let mut bins = Vec::with_capacity(boundaries.len() - 1);
    for i in 0..boundaries.len() - 1 {
        let lo = boundaries[i];
        let hi = boundaries[i + 1];
        let pop_fraction = cdf[i + 1] - cdf[i];
        let population_count = pop_fraction * total_population;

        let wealth_mean = if alpha > 1.0 {
            truncated_pareto_mean(min_wealth, alpha, lo, hi)
        } else {
            (lo + hi) / 2.0
        };

        let mut method = format!("pareto_distribution_alpha_{alpha}");
        if alpha <= 1.0 {
            method.push_str("_midpoint_fallback");
        }

        bins.push(Bin {
            min_wealth_usd: lo,
            max_wealth_usd: Some(hi),
            population_count,
            population_share: 0.0,
            total_wealth_usd: population_count * wealth_mean,
            wealth_share: 0.0,
            avg_wealth_usd: 0.0,
            data_quality: DataQuality::Modeled,
            method,
        });
    }

    Ok(bins)
}

/// The single unbounded bin `[max_wealth, inf)` holding the Pareto mass
/// beyond `max_wealth`, with mean `alpha/(alpha-1) * max_wealth` when the
/// mean exists and `max_wealth * 2` otherwise.
pub fn pareto_open_ended_tail(
    min_wealth: f64,
    max_wealth: f64,
    total_population: f64,
    alpha: f64,
) -> Result<Bin, PipelineError> {
    validate_pareto_args(min_wealth, max_wealth, total_population, alpha)?;

    let tail_fraction = 1.0 - pareto_cdf(min_wealth, alpha, max_wealth);
    let population_count = tail_fraction * total_population;

    let wealth_mean = if alpha > 1.0 {
        (alpha / (alpha - 1.0)) * max_wealth
    } else {
        max_wealth * 2.0
    };

    let mut method = format!("pareto_distribution_alpha_{alpha}_open_ended");
    if alpha <= 1.0 {
        method.push_str("_x2_fallback");
    }

    Ok(Bin {
        min_wealth_usd: max_wealth,
        max_wealth_usd: None,
        population_count,
        population_share: 0.0,
        total_wealth_usd: population_count * wealth_mean,
        wealth_share: 0.0,
        avg_wealth_usd: 0.0,
        data_quality: DataQuality::Modeled,
        method,
    })
}

fn validate_pareto_args(
    min_wealth: f64,
    max_wealth: f64,
    total_population: f64,
    alpha: f64,
) -> Result<(), PipelineError> {
    if !(min_wealth > 0.0) {
        return Err(PipelineError::Configuration(format!(
            "pareto scale must be > 0, got {min_wealth}"
        )));
    }
    if max_wealth <= min_wealth {
        return Err(PipelineError::Configuration(format!(
            "pareto range is empty: min {min_wealth}, max {max_wealth}"
        )));
    }
    if !(alpha > 0.0) || !alpha.is_finite() {
        return Err(PipelineError::Configuration(format!(
            "pareto alpha must be > 0 and finite, got {alpha}"
        )));
    }
    if total_population < 0.0 {
        return Err(PipelineError::Configuration(format!(
            "pareto population must be non-negative, got {total_population}"
        )));
    }
    Ok(())
}

// F(min) == 0 exactly because (min/min)^alpha == 1.
fn pareto_cdf(scale: f64, alpha: f64, x: f64) -> f64 {
    1.0 - (scale / x).powf(alpha)
}

// E[X | lo < X < hi] for Pareto Type-I; only valid for alpha > 1.
fn truncated_pareto_mean(scale: f64, alpha: f64, lo: f64, hi: f64) -> f64 {
    let numer = lo.powf(1.0 - alpha) - hi.powf(1.0 - alpha);
    let denom = (scale / lo).powf(alpha) - (scale / hi).powf(alpha);
    (alpha / (alpha - 1.0)) * scale * numer / denom
}

// min, min+step, min+2*step, ... plus max itself when the stride falls short.
fn pareto_boundaries(min_wealth: f64, max_wealth: f64, step: f64) -> Vec<f64> {
    let mut points = Vec::new();
    let mut pos = min_wealth;
    while pos <= max_wealth {
        points.push(pos);
        pos += step;
    }
    if points.last().is_some_and(|&last| last < max_wealth) {
        points.push(max_wealth);
    }
    points
}
