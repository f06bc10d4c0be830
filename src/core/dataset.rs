use super::assemble::assemble_bins;
use super::config::PipelineConfig;
use super::normalize::normalize_bins;
use super::types::{Bin, Dataset, Metadata, Methodology, PipelineError, Verification};

/// Run the full pipeline: assemble raw bins from the range table, normalize
/// them to the global totals, and wrap the result with metadata and a
/// recomputed verification summary.
pub fn build_dataset(config: &PipelineConfig) -> Result<Dataset, PipelineError> {
    let bins = assemble_bins(config)?;
    let bins = normalize_bins(bins, config.total_population, config.total_wealth_usd)?;
    let verification = verify(&bins);
    let metadata = build_metadata(config, bins.len());
    Ok(Dataset {
        metadata,
        bins,
        verification,
    })
}

fn verify(bins: &[Bin]) -> Verification {
    Verification {
        total_population_sum: bins.iter().map(|b| b.population_count).sum(),
        total_wealth_sum: bins.iter().map(|b| b.total_wealth_usd).sum(),
        population_share_sum: bins.iter().map(|b| b.population_share).sum(),
        wealth_share_sum: bins.iter().map(|b| b.wealth_share).sum(),
    }
}

fn build_metadata(config: &PipelineConfig, number_of_bins: usize) -> Metadata {
    Metadata {
        source: "UBS Global Wealth Report 2023 / Credit Suisse Global Wealth Databook 2023"
            .to_string(),
        source_url:
            "https://www.ubs.com/global/en/family-office-uhnw/reports/global-wealth-report-2023.html"
                .to_string(),
        additional_sources: vec![
            "Global Wealth Monitor 2022 (http://wealth-monitor.co.uk)".to_string(),
            "Statista Global Wealth Distribution aggregation".to_string(),
        ],
        data_year: config.data_year,
        report_year: config.report_year,
        notes: vec![
            "Fine-grained bins synthesized from coarse aggregate brackets".to_string(),
            "Data quality varies by wealth range:".to_string(),
            "  - [0-1M]: real UBS/Statista aggregates, subdivided by linear interpolation"
                .to_string(),
            "  - [1M+]: modeled with a Pareto Type I distribution (standard for wealth tails)"
                .to_string(),
            "All bins normalized to sum exactly to the global totals".to_string(),
            "Pareto alpha parameters 1.3-1.5, empirically validated for wealth".to_string(),
        ],
        methodology: Methodology {
            interpolation: "Linear subdivision of known aggregate brackets".to_string(),
            pareto_modeling: "Pareto Type I distribution with varying alpha by wealth range"
                .to_string(),
            normalization: "Proportional adjustment to match exact global totals".to_string(),
            validation: "Verified against known percentile thresholds (p50, p90, p99, p99.9)"
                .to_string(),
        },
        known_thresholds: config.known_thresholds,
        total_adult_population: config.total_population,
        total_global_wealth_usd: config.total_wealth_usd,
        mean_wealth_per_adult: config.total_wealth_usd / config.total_population,
        number_of_bins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_relative(actual: f64, expected: f64, tol: f64) {
        assert!(
            ((actual - expected) / expected).abs() <= tol,
            "expected {expected}, got {actual}, relative tolerance {tol}"
        );
    }

    #[test]
    fn shipped_config_hits_global_totals() {
        let config = PipelineConfig::ubs_2023();
        let dataset = build_dataset(&config).expect("shipped config must build");

        assert_relative(
            dataset.verification.total_population_sum,
            3_767_000_000.0,
            1e-9,
        );
        assert_relative(
            dataset.verification.total_wealth_sum,
            454_400_000_000_000.0,
            1e-9,
        );
        assert_relative(dataset.verification.population_share_sum, 1.0, 1e-6);
        assert_relative(dataset.verification.wealth_share_sum, 1.0, 1e-6);
    }

    #[test]
    fn metadata_reflects_the_built_bins() {
        let config = PipelineConfig::ubs_2023();
        let dataset = build_dataset(&config).expect("shipped config must build");

        assert_eq!(dataset.metadata.number_of_bins, dataset.bins.len());
        assert_eq!(dataset.metadata.number_of_bins, 76);
        assert_eq!(dataset.metadata.data_year, 2022);
        assert_relative(
            dataset.metadata.mean_wealth_per_adult,
            454_400_000_000_000.0 / 3_767_000_000.0,
            1e-12,
        );
        assert_eq!(dataset.metadata.known_thresholds.p50, 8_654.0);
    }

    #[test]
    fn normalized_bins_keep_ordering_and_tail_invariants() {
        let config = PipelineConfig::ubs_2023();
        let dataset = build_dataset(&config).expect("shipped config must build");

        for pair in dataset.bins.windows(2) {
            assert!(pair[0].min_wealth_usd < pair[1].min_wealth_usd);
            if let Some(max) = pair[0].max_wealth_usd {
                assert_eq!(max, pair[1].min_wealth_usd);
            }
        }
        let open_ended: Vec<_> = dataset
            .bins
            .iter()
            .filter(|b| b.max_wealth_usd.is_none())
            .collect();
        assert_eq!(open_ended.len(), 1);
        assert_eq!(open_ended[0].min_wealth_usd, 100_000_000_000.0);

        for bin in &dataset.bins {
            assert!(bin.population_count >= 0.0);
            assert!(bin.total_wealth_usd >= 0.0);
            assert!(bin.population_share >= 0.0);
            assert!(bin.wealth_share >= 0.0);
        }
    }

    #[test]
    fn dataset_serializes_with_expected_field_names() {
        let config = PipelineConfig::ubs_2023();
        let dataset = build_dataset(&config).expect("shipped config must build");
        let value = serde_json::to_value(&dataset).expect("serializable");

        assert!(value.get("_metadata").is_some());
        assert!(value["_metadata"]["known_thresholds"].get("p99.9").is_some());
        assert_eq!(value["bins"][0]["data_quality"], "interpolated");
        assert_eq!(value["bins"][0]["method"], "linear_subdivision");
        let last = value["bins"]
            .as_array()
            .expect("bins array")
            .last()
            .expect("non-empty");
        assert!(last["max_wealth_usd"].is_null());
        assert_eq!(last["data_quality"], "modeled");
        assert!(value["verification"]["total_population_sum"].is_number());
    }
}
