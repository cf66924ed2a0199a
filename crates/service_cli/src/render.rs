//! Plain-text rendering of results.

use std::fmt;

use pricer_pricing::PriceEstimate;
use pricer_risk::SensitivityTable;

/// Placeholder for a cell that could not be priced.
const EMPTY_CELL: &str = "-";

/// Baseline summary in the two-line form of the original report.
pub fn render_summary(future_spot: f64, estimate: &PriceEstimate) -> String {
    format!(
        "Future Stock Price : {:.2}\nOption Price : {:.2}\n",
        future_spot,
        estimate.rounded()
    )
}

/// One line per engine, then failures.
pub struct EngineListing<'a>(pub &'a PriceEstimate);

impl fmt::Display for EngineListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = self.0;
        let width = estimate
            .results()
            .iter()
            .map(|r| r.engine.len())
            .chain(estimate.failures().iter().map(|f| f.engine.len()))
            .max()
            .unwrap_or(0);

        for result in estimate.results() {
            writeln!(f, "  {:<width$}  {:>10.4}", result.engine, result.price)?;
        }
        for failure in estimate.failures() {
            writeln!(f, "  {:<width$}  failed: {}", failure.engine, failure.reason)?;
        }
        Ok(())
    }
}

/// Table with row labels on the left and day columns right-aligned.
pub struct TableView<'a>(pub &'a SensitivityTable);

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        let label_width = table.row_labels().iter().map(String::len).max().unwrap_or(0);
        let cell_width = table
            .column_labels()
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(6);

        write!(f, "{:label_width$}", "")?;
        for label in table.column_labels() {
            write!(f, "  {label:>cell_width$}")?;
        }
        writeln!(f)?;

        for (label, row) in table.row_labels().iter().zip(table.rows()) {
            write!(f, "{label:<label_width$}")?;
            for cell in row {
                match cell {
                    Some(price) => write!(f, "  {price:>cell_width$.2}")?,
                    None => write!(f, "  {EMPTY_CELL:>cell_width$}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{Date, OptionKind};
    use pricer_models::ScenarioParameters;
    use pricer_pricing::engines::PricingEngine;
    use pricer_pricing::{EngineSet, PricingPipeline};
    use pricer_risk::TableBuilder;

    fn pipeline() -> PricingPipeline {
        PricingPipeline::new(EngineSet::new(vec![PricingEngine::barone_adesi_whaley()]))
    }

    fn scenario(days_held: u32) -> ScenarioParameters {
        ScenarioParameters::builder()
            .option_kind(OptionKind::Put)
            .spot_price(15.50)
            .strike_price(20.0)
            .volatility(0.5815)
            .risk_free_rate(0.0152)
            .dividend_rate(0.0135)
            .valuation_date(Date::from_ymd(2021, 10, 6).unwrap())
            .exercise_date(Date::from_ymd(2021, 11, 19).unwrap())
            .days_held(days_held)
            .spot_move_fraction(0.01)
            .build()
            .unwrap()
    }

    #[test]
    fn test_summary() {
        let estimate = pipeline().evaluate(&scenario(5)).unwrap();
        let text = render_summary(15.655, &estimate);
        assert!(text.starts_with("Future Stock Price : 15.65"));
        assert!(text.contains("Option Price : "));
    }

    #[test]
    fn test_engines_listing() {
        let estimate = pipeline().evaluate(&scenario(5)).unwrap();
        let text = EngineListing(&estimate).to_string();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Barone-Adesi-Whaley"));
    }

    #[test]
    fn test_table_layout() {
        let table = TableBuilder::new(pipeline()).build(&scenario(2)).unwrap();
        let text = TableView(&table).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 3);
        assert!(lines[0].trim_start().starts_with("0 days"));
        assert!(lines[1].starts_with("$15.35   -1%"));
        assert!(lines[3].starts_with("$15.65   1%"));
        assert!(lines.iter().all(|l| !l.ends_with(EMPTY_CELL)));
    }

    #[test]
    fn test_unpriced_cells_render_as_placeholder() {
        // Exercise falls 44 days after valuation, so the 49-day column is empty
        let mut base = scenario(0);
        base.days_held = 49;
        base.spot_move_fraction = 0.0;
        let table = TableBuilder::new(pipeline()).build(&base).unwrap();

        let text = TableView(&table).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("49 days"));
        assert!(lines[1].starts_with("$15.50   0%"));
        assert!(lines[1].ends_with(&format!("  {EMPTY_CELL:>7}")));
        assert_eq!(lines[1].matches(EMPTY_CELL).count(), 1);
    }
}
