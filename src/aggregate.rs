use crate::config::AnalysisConfig;
use crate::record::SalesRecord;
use std::collections::BTreeMap;

/// Per-country sale counts for one manufacturer.
///
/// Keys are kept ordered so that equal counts always render in the same
/// (alphabetical) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: BTreeMap<String, u64>,
}

impl Distribution {
    pub fn increment(&mut self, country: &str) {
        // avoid allocating a key for countries already seen
        if let Some(n) = self.counts.get_mut(country) {
            *n += 1;
        } else {
            self.counts.insert(country.to_owned(), 1);
        }
    }

    pub fn get(&self, country: &str) -> u64 {
        self.counts.get(country).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count first; ties keep ascending country order.
    pub fn sorted_desc(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> =
            self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    pub fn merge(&mut self, other: Distribution) {
        for (country, n) in other.counts {
            *self.counts.entry(country).or_insert(0) += n;
        }
    }
}

/// Running totals for the three report tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulators {
    /// Task 1: primary manufacturer, target country, target year.
    pub primary_country_count: u64,
    /// Task 2: secondary manufacturer revenue in the target year.
    pub secondary_revenue_target_year: f64,
    /// Task 3: primary manufacturer inside the target region.
    pub primary_region_distribution: Distribution,
    /// Task 3: secondary manufacturer inside the target region.
    pub secondary_region_distribution: Distribution,
}

impl Accumulators {
    pub fn merge(&mut self, other: Accumulators) {
        self.primary_country_count += other.primary_country_count;
        self.secondary_revenue_target_year += other.secondary_revenue_target_year;
        self.primary_region_distribution
            .merge(other.primary_region_distribution);
        self.secondary_region_distribution
            .merge(other.secondary_region_distribution);
    }
}

/// Classifies records into [`Accumulators`] one at a time.
#[derive(Debug, Clone)]
pub struct SalesAggregator {
    config: AnalysisConfig,
    state: Accumulators,
}

impl SalesAggregator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            state: Accumulators::default(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn state(&self) -> &Accumulators {
        &self.state
    }

    /// Apply all three task predicates to `record`. Each check runs
    /// independently, so one record may feed several tasks.
    pub fn observe(&mut self, record: &SalesRecord) {
        let cfg = &self.config;
        let manufacturer = record.manufacturer();
        let is_primary = manufacturer == cfg.primary_manufacturer;
        let is_secondary = manufacturer == cfg.secondary_manufacturer;
        let in_target_year = record.sale_year() == cfg.target_year;

        if is_primary && record.country() == cfg.target_country && in_target_year {
            self.state.primary_country_count += 1;
        }

        if is_secondary && in_target_year {
            self.state.secondary_revenue_target_year += record.sale_price_usd();
        }

        if record.region() == cfg.target_region {
            if is_primary {
                self.state
                    .primary_region_distribution
                    .increment(record.country());
            } else if is_secondary {
                self.state
                    .secondary_region_distribution
                    .increment(record.country());
            }
        }
    }

    /// Fold a partition scanned by another aggregator into this one.
    pub fn merge(&mut self, other: SalesAggregator) {
        self.state.merge(other.state);
    }

    pub fn finish(self) -> Accumulators {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::parse_line;

    fn record(date: &str, country: &str, region: &str, make: &str, price: &str) -> SalesRecord {
        let line = format!(
            "S,{date},{country},{region},0,0,D1,Dealer,{make},M,2024,,,,,,,,,,{price}"
        );
        SalesRecord::from_fields(&parse_line(&line)).unwrap()
    }

    #[test]
    fn three_row_scenario() {
        let mut agg = SalesAggregator::new(AnalysisConfig::default());
        agg.observe(&record("2025-02-01", "China", "Asia", "Audi", "10000"));
        agg.observe(&record("2025-05-09", "Mexico", "Americas", "BMW", "20000"));
        agg.observe(&record("2019-07-30", "France", "Europe", "Audi", "5"));
        let acc = agg.finish();

        assert_eq!(acc.primary_country_count, 1);
        assert_eq!(acc.secondary_revenue_target_year, 20000.0);
        assert_eq!(acc.primary_region_distribution.sorted_desc(), vec![("France", 1)]);
        assert!(acc.secondary_region_distribution.is_empty());
    }

    #[test]
    fn one_record_can_feed_several_tasks() {
        let mut agg = SalesAggregator::new(AnalysisConfig::default());
        agg.observe(&record("2025-01-01", "Germany", "Europe", "BMW", "300.5"));
        let acc = agg.finish();
        assert_eq!(acc.secondary_revenue_target_year, 300.5);
        assert_eq!(acc.secondary_region_distribution.get("Germany"), 1);
    }

    #[test]
    fn region_counts_accumulate_per_country() {
        let mut agg = SalesAggregator::new(AnalysisConfig::default());
        agg.observe(&record("2020", "Germany", "Europe", "Audi", ""));
        agg.observe(&record("2021", "Germany", "Europe", "Audi", ""));
        agg.observe(&record("2021", "Germany", "Europe", "Skoda", ""));
        let acc = agg.finish();
        assert_eq!(acc.primary_region_distribution.get("Germany"), 2);
        assert_eq!(acc.primary_region_distribution.len(), 1);
        assert!(acc.secondary_region_distribution.is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut agg = SalesAggregator::new(AnalysisConfig::default());
        agg.observe(&record("2025", "china", "europe", "audi", "1"));
        agg.observe(&record("2025", "China", "Europe", "bmw", "1"));
        assert_eq!(agg.finish(), Accumulators::default());
    }

    #[test]
    fn ties_sort_by_country_name() {
        let mut dist = Distribution::default();
        for country in ["Spain", "Italy", "Spain", "Austria", "Italy", "Poland"] {
            dist.increment(country);
        }
        assert_eq!(
            dist.sorted_desc(),
            vec![("Italy", 2), ("Spain", 2), ("Austria", 1), ("Poland", 1)]
        );
    }

    #[test]
    fn merge_matches_single_pass() {
        let rows = [
            record("2025", "China", "Asia", "Audi", "1"),
            record("2025", "France", "Europe", "BMW", "2.5"),
            record("2024", "France", "Europe", "Audi", "3"),
            record("2025", "Italy", "Europe", "BMW", "4"),
        ];
        let mut single = SalesAggregator::new(AnalysisConfig::default());
        rows.iter().for_each(|r| single.observe(r));

        let mut left = SalesAggregator::new(AnalysisConfig::default());
        let mut right = SalesAggregator::new(AnalysisConfig::default());
        rows[..2].iter().for_each(|r| left.observe(r));
        rows[2..].iter().for_each(|r| right.observe(r));
        left.merge(right);

        assert_eq!(left.finish(), single.finish());
    }

    #[test]
    fn custom_config_moves_the_predicates() {
        let cfg = AnalysisConfig::default()
            .with_target_year(2024)
            .with_target_country("Japan")
            .with_manufacturers("Toyota", "Honda");
        let mut agg = SalesAggregator::new(cfg);
        agg.observe(&record("2024", "Japan", "Asia", "Toyota", "1"));
        agg.observe(&record("2024", "Japan", "Asia", "Audi", "1"));
        agg.observe(&record("2024", "Japan", "Asia", "Honda", "7"));
        let acc = agg.finish();
        assert_eq!(acc.primary_country_count, 1);
        assert_eq!(acc.secondary_revenue_target_year, 7.0);
    }
}
