use crate::aggregate::{Accumulators, Distribution};
use crate::config::AnalysisConfig;
use std::fmt;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";
const COUNTRY_WIDTH: usize = 20;

/// Human-readable rendering of a finished scan.
pub struct Report<'a> {
    config: &'a AnalysisConfig,
    results: &'a Accumulators,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a AnalysisConfig, results: &'a Accumulators) -> Self {
        Self { config, results }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        let res = self.results;

        writeln!(f, "{RULE}")?;
        writeln!(f, "CAR SALES ANALYSIS RESULTS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        writeln!(
            f,
            "TASK 1: Number of {} cars sold in {} in {}",
            cfg.primary_manufacturer, cfg.target_country, cfg.target_year
        )?;
        writeln!(f, "Result: {} cars", res.primary_country_count)?;
        writeln!(f)?;

        writeln!(
            f,
            "TASK 2: Total revenue generated by {} in {}",
            cfg.secondary_manufacturer, cfg.target_year
        )?;
        writeln!(f, "Result: ${:.2} USD", res.secondary_revenue_target_year)?;
        writeln!(f)?;

        writeln!(
            f,
            "TASK 3: Distribution in {} Countries (Sorted Highest to Lowest)",
            cfg.target_region_label
        )?;
        writeln!(f, "{THIN_RULE}")?;
        write_distribution(f, &cfg.primary_manufacturer, &res.primary_region_distribution)?;
        writeln!(f)?;
        write_distribution(f, &cfg.secondary_manufacturer, &res.secondary_region_distribution)?;
        writeln!(f)?;
        writeln!(f, "{RULE}")
    }
}

fn write_distribution(
    f: &mut fmt::Formatter<'_>,
    manufacturer: &str,
    dist: &Distribution,
) -> fmt::Result {
    writeln!(f, "{} Distribution:", manufacturer.to_uppercase())?;
    for (country, count) in dist.sorted_desc() {
        writeln!(f, "  {:<width$}: {} cars", country, count, width = COUNTRY_WIDTH)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Accumulators {
        let mut acc = Accumulators {
            primary_country_count: 1,
            secondary_revenue_target_year: 20000.0,
            ..Default::default()
        };
        acc.primary_region_distribution.increment("France");
        acc
    }

    #[test]
    fn renders_full_layout() {
        let cfg = AnalysisConfig::default();
        let acc = sample();
        let text = Report::new(&cfg, &acc).to_string();
        let expected = "\
========================================
CAR SALES ANALYSIS RESULTS
========================================

TASK 1: Number of Audi cars sold in China in 2025
Result: 1 cars

TASK 2: Total revenue generated by BMW in 2025
Result: $20000.00 USD

TASK 3: Distribution in European Countries (Sorted Highest to Lowest)
----------------------------------------
AUDI Distribution:
  France              : 1 cars

BMW Distribution:

========================================
";
        assert_eq!(text, expected);
    }

    #[test]
    fn revenue_has_two_decimals() {
        let cfg = AnalysisConfig::default();
        let acc = Accumulators {
            secondary_revenue_target_year: 1234.5,
            ..Default::default()
        };
        assert!(Report::new(&cfg, &acc)
            .to_string()
            .contains("Result: $1234.50 USD"));
    }

    #[test]
    fn long_country_names_are_not_truncated() {
        let cfg = AnalysisConfig::default();
        let mut acc = Accumulators::default();
        acc.secondary_region_distribution
            .increment("Bosnia and Herzegovina");
        let text = Report::new(&cfg, &acc).to_string();
        assert!(text.contains("  Bosnia and Herzegovina: 1 cars\n"));
    }
}
