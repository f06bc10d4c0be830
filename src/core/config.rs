use super::types::KnownThresholds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeModel {
    /// Uniform subdivision with a fixed wealth allocation for the range.
    Linear { wealth_usd: f64 },
    /// Pareto Type-I slicing; bin wealth comes from the conditional mean,
    /// so the range carries no wealth allocation of its own.
    Pareto { alpha: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub min_wealth_usd: f64,
    pub max_wealth_usd: f64,
    pub step: f64,
    pub population: f64,
    pub model: RangeModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub total_population: f64,
    pub total_wealth_usd: f64,
    pub data_year: i32,
    pub report_year: i32,
    pub known_thresholds: KnownThresholds,
    /// Ascending, contiguous segments starting at 0. The final segment must
    /// be Pareto so its open tail extends coverage to infinity.
    pub ranges: Vec<RangeSpec>,
}

impl PipelineConfig {
    /// Constants from the UBS Global Wealth Report 2023 (2022 data) plus the
    /// Statista/UBS coarse brackets, split into six modeled segments.
    pub fn ubs_2023() -> Self {
        Self {
            total_population: 3_767_000_000.0,
            total_wealth_usd: 454_400_000_000_000.0,
            data_year: 2022,
            report_year: 2023,
            known_thresholds: KnownThresholds {
                p50: 8_654.0,
                p90: 137_333.0,
                p99: 1_081_342.0,
                p99_9: 50_000_000.0,
            },
            ranges: vec![
                RangeSpec {
                    min_wealth_usd: 0.0,
                    max_wealth_usd: 10_000.0,
                    step: 10_000.0,
                    population: 1_488_000_000.0,
                    // Estimated from avg wealth $3,500
                    model: RangeModel::Linear {
                        wealth_usd: 5_208_000_000_000.0,
                    },
                },
                RangeSpec {
                    min_wealth_usd: 10_000.0,
                    max_wealth_usd: 100_000.0,
                    step: 10_000.0,
                    population: 1_608_000_000.0,
                    model: RangeModel::Linear {
                        wealth_usd: 56_280_000_000_000.0,
                    },
                },
                RangeSpec {
                    min_wealth_usd: 100_000.0,
                    max_wealth_usd: 1_000_000.0,
                    step: 25_000.0,
                    population: 613_000_000.0,
                    model: RangeModel::Linear {
                        wealth_usd: 196_160_000_000_000.0,
                    },
                },
                RangeSpec {
                    min_wealth_usd: 1_000_000.0,
                    max_wealth_usd: 100_000_000.0,
                    step: 10_000_000.0,
                    population: 50_000_000.0,
                    model: RangeModel::Pareto { alpha: 1.5 },
                },
                RangeSpec {
                    min_wealth_usd: 100_000_000.0,
                    max_wealth_usd: 1_000_000_000.0,
                    step: 100_000_000.0,
                    population: 5_000_000.0,
                    model: RangeModel::Pareto { alpha: 1.4 },
                },
                RangeSpec {
                    min_wealth_usd: 1_000_000_000.0,
                    max_wealth_usd: 100_000_000_000.0,
                    step: 10_000_000_000.0,
                    population: 3_000_000.0,
                    model: RangeModel::Pareto { alpha: 1.3 },
                },
            ],
        }
    }
}
