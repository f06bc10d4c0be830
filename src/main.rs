use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use wealthgrid::core::{PipelineConfig, build_dataset};

#[derive(Parser, Debug)]
#[command(
    name = "wealthgrid",
    about = "Synthesize a fine-grained global wealth distribution dataset"
)]
struct Cli {
    /// Output path for the generated JSON dataset
    #[arg(short, long, default_value = "data/wealth_distribution.json")]
    output: PathBuf,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("Generating wealth distribution dataset...");
    let config = PipelineConfig::ubs_2023();
    let dataset = build_dataset(&config).context("failed to build dataset")?;

    println!("Generated {} bins", dataset.metadata.number_of_bins);
    println!(
        "Total population: {:.0}",
        dataset.verification.total_population_sum
    );
    println!("Total wealth: ${:.0}", dataset.verification.total_wealth_sum);
    println!(
        "Population share sum: {:.6}",
        dataset.verification.population_share_sum
    );
    println!(
        "Wealth share sum: {:.6}",
        dataset.verification.wealth_share_sum
    );

    let json = if cli.compact {
        serde_json::to_string(&dataset)?
    } else {
        serde_json::to_string_pretty(&dataset)?
    };

    if let Some(parent) = cli.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("Dataset written to {}", cli.output.display());
    Ok(())
}
