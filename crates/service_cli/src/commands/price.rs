//! Price command implementation
//!
//! Prices the configured scenario with every engine and prints the mean.

use tracing::info;

use crate::config::CliConfig;
use crate::render::{render_summary, EngineListing};
use crate::Result;

/// Run the price command
pub fn run(config: &CliConfig, verbose: bool) -> Result<()> {
    let scenario = config.scenario.to_parameters()?;
    let pipeline = config.pipeline();

    info!("Starting pricing...");
    info!("  Option: {} K={}", scenario.option_kind, scenario.strike_price);
    info!("  Engines: {}", pipeline.engines().len());

    let estimate = pipeline.evaluate(&scenario)?;

    println!();
    print!("{}", render_summary(scenario.effective_spot(), &estimate));
    if verbose {
        println!();
        print!("{}", EngineListing(&estimate));
    }
    println!();

    info!("Pricing complete");
    Ok(())
}
