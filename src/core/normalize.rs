use super::types::{Bin, PipelineError};

/// Rescale the assembled bins so population and wealth sum exactly to the
/// external totals, then derive each bin's shares and average wealth.
pub fn normalize_bins(
    mut bins: Vec<Bin>,
    total_population: f64,
    total_wealth: f64,
) -> Result<Vec<Bin>, PipelineError> {
    if !(total_population > 0.0) || !(total_wealth > 0.0) {
        return Err(PipelineError::Configuration(format!(
            "normalization targets must be > 0: population {total_population}, wealth {total_wealth}"
        )));
    }

    let population_sum: f64 = bins.iter().map(|b| b.population_count).sum();
    let wealth_sum: f64 = bins.iter().map(|b| b.total_wealth_usd).sum();
    if population_sum <= 0.0 {
        return Err(PipelineError::DegenerateNormalization(format!(
            "pre-normalization population sum is {population_sum}"
        )));
    }
    if wealth_sum <= 0.0 {
        return Err(PipelineError::DegenerateNormalization(format!(
            "pre-normalization wealth sum is {wealth_sum}"
        )));
    }

    let pop_ratio = total_population / population_sum;
    let wealth_ratio = total_wealth / wealth_sum;

    for bin in &mut bins {
        bin.population_count *= pop_ratio;
        bin.total_wealth_usd *= wealth_ratio;
        bin.population_share = bin.population_count / total_population;
        bin.wealth_share = bin.total_wealth_usd / total_wealth;
        bin.avg_wealth_usd = if bin.population_count > 0.0 {
            bin.total_wealth_usd / bin.population_count
        } else {
            0.0
        };
    }

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataQuality;

    fn raw_bin(min: f64, max: Option<f64>, population: f64, wealth: f64) -> Bin {
        Bin {
            min_wealth_usd: min,
            max_wealth_usd: max,
            population_count: population,
            population_share: 0.0,
            total_wealth_usd: wealth,
            wealth_share: 0.0,
            avg_wealth_usd: 0.0,
            data_quality: DataQuality::Interpolated,
            method: "linear_subdivision".to_string(),
        }
    }

    fn assert_relative(actual: f64, expected: f64, tol: f64) {
        assert!(
            ((actual - expected) / expected).abs() <= tol,
            "expected {expected}, got {actual}, relative tolerance {tol}"
        );
    }

    #[test]
    fn rescaled_sums_match_targets_exactly() {
        let bins = vec![
            raw_bin(0.0, Some(10.0), 30.0, 100.0),
            raw_bin(10.0, Some(20.0), 50.0, 300.0),
            raw_bin(20.0, None, 17.0, 250.0),
        ];

        let bins = normalize_bins(bins, 1_000.0, 40_000.0).expect("valid totals");

        let pop_sum: f64 = bins.iter().map(|b| b.population_count).sum();
        let wealth_sum: f64 = bins.iter().map(|b| b.total_wealth_usd).sum();
        assert_relative(pop_sum, 1_000.0, 1e-9);
        assert_relative(wealth_sum, 40_000.0, 1e-9);

        let pop_share_sum: f64 = bins.iter().map(|b| b.population_share).sum();
        let wealth_share_sum: f64 = bins.iter().map(|b| b.wealth_share).sum();
        assert_relative(pop_share_sum, 1.0, 1e-6);
        assert_relative(wealth_share_sum, 1.0, 1e-6);

        for bin in &bins {
            assert_relative(
                bin.avg_wealth_usd,
                bin.total_wealth_usd / bin.population_count,
                1e-12,
            );
        }
    }

    #[test]
    fn rescale_preserves_relative_proportions() {
        let bins = vec![
            raw_bin(0.0, Some(10.0), 10.0, 100.0),
            raw_bin(10.0, None, 40.0, 900.0),
        ];
        let bins = normalize_bins(bins, 500.0, 5_000.0).expect("valid totals");
        assert_relative(
            bins[1].population_count / bins[0].population_count,
            4.0,
            1e-12,
        );
        assert_relative(bins[1].total_wealth_usd / bins[0].total_wealth_usd, 9.0, 1e-12);
    }

    #[test]
    fn zero_population_bin_gets_zero_average() {
        let bins = vec![
            raw_bin(0.0, Some(10.0), 100.0, 100.0),
            raw_bin(10.0, None, 0.0, 0.0),
        ];
        let bins = normalize_bins(bins, 100.0, 100.0).expect("valid totals");
        assert_eq!(bins[1].avg_wealth_usd, 0.0);
        assert_eq!(bins[1].population_share, 0.0);
    }

    #[test]
    fn zero_sums_are_fatal() {
        let bins = vec![raw_bin(0.0, None, 0.0, 0.0)];
        let err = normalize_bins(bins, 100.0, 100.0).expect_err("zero sums are degenerate");
        assert!(matches!(err, PipelineError::DegenerateNormalization(_)));

        let bins = vec![raw_bin(0.0, None, 10.0, 0.0)];
        let err = normalize_bins(bins, 100.0, 100.0).expect_err("zero wealth sum is degenerate");
        assert!(matches!(err, PipelineError::DegenerateNormalization(_)));
    }

    #[test]
    fn non_positive_targets_are_rejected() {
        let bins = vec![raw_bin(0.0, None, 10.0, 10.0)];
        let err = normalize_bins(bins, 0.0, 100.0).expect_err("zero target is invalid");
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
