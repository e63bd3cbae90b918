/// Business constants that define the three report tasks.
///
/// The `car_sales` binary always runs with [`AnalysisConfig::default`];
/// the builder methods exist so tests and library callers can aim the same
/// pipeline at other slices of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub target_year: i32,
    pub target_country: String,
    pub target_region: String,
    /// How the region is named in report headings.
    pub target_region_label: String,
    /// Counted in the target country for Task 1, per country for Task 3.
    pub primary_manufacturer: String,
    /// Summed for revenue in Task 2 and counted per country in Task 3.
    pub secondary_manufacturer: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_year: 2025,
            target_country: "China".into(),
            target_region: "Europe".into(),
            target_region_label: "European".into(),
            primary_manufacturer: "Audi".into(),
            secondary_manufacturer: "BMW".into(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_target_year(mut self, year: i32) -> Self {
        self.target_year = year;
        self
    }

    pub fn with_target_country(mut self, country: impl Into<String>) -> Self {
        self.target_country = country.into();
        self
    }

    /// Set the Task 3 region together with the word used for it in the
    /// report heading (`"Europe"`, `"European"`).
    pub fn with_target_region(
        mut self,
        region: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.target_region = region.into();
        self.target_region_label = label.into();
        self
    }

    pub fn with_manufacturers(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_manufacturer = primary.into();
        self.secondary_manufacturer = secondary.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_report_constants() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.target_year, 2025);
        assert_eq!(cfg.target_country, "China");
        assert_eq!(cfg.target_region, "Europe");
        assert_eq!(cfg.target_region_label, "European");
        assert_eq!(cfg.primary_manufacturer, "Audi");
        assert_eq!(cfg.secondary_manufacturer, "BMW");
    }

    #[test]
    fn builders_override_fields() {
        let cfg = AnalysisConfig::default()
            .with_target_year(2024)
            .with_target_country("Japan")
            .with_target_region("Asia", "Asian")
            .with_manufacturers("Toyota", "Honda");
        assert_eq!(cfg.target_year, 2024);
        assert_eq!(cfg.target_country, "Japan");
        assert_eq!(cfg.target_region, "Asia");
        assert_eq!(cfg.target_region_label, "Asian");
        assert_eq!(cfg.primary_manufacturer, "Toyota");
        assert_eq!(cfg.secondary_manufacturer, "Honda");
    }

    #[test]
    fn builder_order_does_not_matter() {
        let a = AnalysisConfig::default()
            .with_target_region("Asia", "Asian")
            .with_target_year(2030)
            .with_target_country("Japan");
        let b = AnalysisConfig::default()
            .with_target_country("Japan")
            .with_target_year(2030)
            .with_target_region("Asia", "Asian");
        assert_eq!(a, b);
        assert_eq!(a.target_region_label, "Asian");
    }
}
