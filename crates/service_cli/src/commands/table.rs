//! Table command implementation
//!
//! Builds the holding-period × spot-move sensitivity table.

use tracing::info;

use crate::config::CliConfig;
use crate::render::TableView;
use crate::Result;

/// Run the table command
pub fn run(config: &CliConfig) -> Result<()> {
    let scenario = config.scenario.to_parameters()?;
    let builder = config.table_builder();

    info!(
        "Building table for {} days, {}% move",
        scenario.days_held,
        (scenario.spot_move_fraction * 100.0).round()
    );

    let table = builder.build(&scenario)?;
    print!("{}", TableView(&table));

    if table.failed_cells() > 0 {
        info!("{} cells could not be priced", table.failed_cells());
    }
    Ok(())
}
