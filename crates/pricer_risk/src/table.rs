//! Price sensitivity to holding period and spot move.

use pricer_models::ScenarioParameters;
use pricer_pricing::PricingPipeline;
use tracing::{info, warn};

use crate::error::TableError;
use crate::grid::GridAxes;
use crate::parallel::ParallelConfig;

/// Grid of rounded prices, rows by spot move and columns by holding days.
///
/// A cell is `None` when that scenario could not be priced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityTable {
    moves: Vec<i32>,
    days: Vec<u32>,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl SensitivityTable {
    /// Spot moves in percent, strictly increasing.
    #[inline]
    pub fn moves(&self) -> &[i32] {
        &self.moves
    }

    /// Holding days, strictly increasing.
    #[inline]
    pub fn days(&self) -> &[u32] {
        &self.days
    }

    /// One label per row, e.g. `$16.28   5%`.
    #[inline]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// One label per column, e.g. `5 days`.
    #[inline]
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Cells in row-major order.
    #[inline]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.cells
    }

    /// Cell at `(row, column)`; `None` if out of range or not priced.
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Price for a given move and day, if both are on the axes.
    pub fn lookup(&self, move_percent: i32, day: u32) -> Option<f64> {
        let row = self.moves.iter().position(|&m| m == move_percent)?;
        let column = self.days.iter().position(|&d| d == day)?;
        self.cell(row, column)
    }

    /// Number of cells that could not be priced.
    pub fn failed_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }
}

/// Row label: the moved spot and the move.
pub fn row_label(spot: f64, move_percent: i32) -> String {
    format!(
        "${:.2}   {}%",
        spot * (1.0 + f64::from(move_percent) / 100.0),
        move_percent
    )
}

/// Column label.
pub fn column_label(day: u32) -> String {
    format!("{day} days")
}

/// Builds a [`SensitivityTable`] by re-running the pipeline per cell.
///
/// # Examples
/// ```
/// use pricer_core::types::{Date, OptionKind};
/// use pricer_models::ScenarioParameters;
/// use pricer_pricing::engines::PricingEngine;
/// use pricer_pricing::{EngineSet, PricingPipeline};
/// use pricer_risk::TableBuilder;
///
/// let scenario = ScenarioParameters::builder()
///     .option_kind(OptionKind::Put)
///     .spot_price(15.50)
///     .strike_price(20.0)
///     .volatility(0.5815)
///     .risk_free_rate(0.0152)
///     .dividend_rate(0.0135)
///     .valuation_date(Date::from_ymd(2021, 10, 6).unwrap())
///     .exercise_date(Date::from_ymd(2021, 11, 19).unwrap())
///     .days_held(2)
///     .spot_move_fraction(0.01)
///     .build()
///     .unwrap();
///
/// let pipeline = PricingPipeline::new(EngineSet::new(vec![PricingEngine::barone_adesi_whaley()]));
/// let table = TableBuilder::new(pipeline).build(&scenario).unwrap();
/// assert_eq!(table.column_labels(), ["0 days", "1 days", "2 days"]);
/// assert_eq!(table.row_labels()[2], "$15.65   1%");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    pipeline: PricingPipeline,
    parallel: ParallelConfig,
}

impl TableBuilder {
    /// Builder around `pipeline` with the default worker pool.
    pub fn new(pipeline: PricingPipeline) -> Self {
        Self {
            pipeline,
            parallel: ParallelConfig::default(),
        }
    }

    /// Replaces the worker pool settings.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Pipeline run for every cell.
    pub fn pipeline(&self) -> &PricingPipeline {
        &self.pipeline
    }

    /// Evaluates every (move, day) pair of the grid spanned by `base`.
    ///
    /// Each cell prices a fresh copy of `base` with `days_held` and
    /// `spot_move_fraction` replaced; `base` itself is not modified.
    ///
    /// # Errors
    /// - `TableError::GridConfiguration` if the axes cannot be generated
    /// - `TableError::ThreadPool` if the worker pool cannot be started
    pub fn build(&self, base: &ScenarioParameters) -> Result<SensitivityTable, TableError> {
        let axes = GridAxes::for_scenario(base)?;
        info!(
            rows = axes.moves.len(),
            columns = axes.days.len(),
            "building sensitivity table"
        );

        let cells: Vec<(i32, u32)> = axes
            .moves
            .iter()
            .flat_map(|&m| axes.days.iter().map(move |&d| (m, d)))
            .collect();

        let prices = self.parallel.map(&cells, |&(move_percent, day)| {
            self.evaluate_cell(base, move_percent, day)
        })?;

        let columns = axes.days.len();
        let grid: Vec<Vec<Option<f64>>> = prices.chunks(columns).map(<[_]>::to_vec).collect();

        let table = SensitivityTable {
            row_labels: axes.moves.iter().map(|&m| row_label(base.spot_price, m)).collect(),
            column_labels: axes.days.iter().map(|&d| column_label(d)).collect(),
            moves: axes.moves,
            days: axes.days,
            cells: grid,
        };

        let failed = table.failed_cells();
        if failed > 0 {
            warn!(failed, "sensitivity table has unpriced cells");
        }
        info!(cells = cells.len(), failed, "sensitivity table complete");
        Ok(table)
    }

    fn evaluate_cell(&self, base: &ScenarioParameters, move_percent: i32, day: u32) -> Option<f64> {
        let scenario = base
            .with_days_held(day)
            .with_spot_move(f64::from(move_percent) / 100.0);

        match self.pipeline.evaluate(&scenario) {
            Ok(estimate) => Some(estimate.rounded()),
            Err(err) => {
                warn!(move_percent, day, error = %err, "cell not priced");
                None
            }
        }
    }
}
