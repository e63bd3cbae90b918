use car_sales::line::{parse_line, trim_field};
use car_sales::schema::{Column, MINIMUM_FIELD_COUNT};
use car_sales::SalesRecord;
use proptest::prelude::*;

fn is_trim_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn sales_row(date: &str, year: &str, price: &str) -> Vec<String> {
    let mut fields = vec!["x".to_string(); MINIMUM_FIELD_COUNT];
    fields[Column::SaleDate.index()] = date.to_string();
    fields[Column::VehicleYear.index()] = year.to_string();
    fields[Column::SalePriceUsd.index()] = price.to_string();
    fields
}

/// Delimiters outside quotes, counted the way the parser toggles on `"`.
fn unquoted_commas(line: &str) -> usize {
    let mut in_quotes = false;
    let mut n = 0;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => n += 1,
            _ => {}
        }
    }
    n
}

proptest! {
    #[test]
    fn record_builder_never_panics(
        fields in prop::collection::vec("\\PC{0,16}", MINIMUM_FIELD_COUNT..40)
    ) {
        if let Ok(rec) = SalesRecord::from_fields(&fields) {
            prop_assert!(rec.sale_price_usd() >= 0.0);
        }
    }

    #[test]
    fn numeric_fields_tolerate_any_text(
        year in "[ +\\-0-9a-z.]{0,12}",
        price in "[ +\\-0-9eE.a-z]{0,16}"
    ) {
        let _ = SalesRecord::from_fields(&sales_row("2025-01-01", &year, &price));
    }

    #[test]
    fn negative_prices_clamp_to_zero(price in -1.0e15f64..-1.0e-12) {
        let rec = SalesRecord::from_fields(&sales_row("2025", "", &price.to_string()))
            .expect("a negative number is a valid price");
        prop_assert_eq!(rec.sale_price_usd().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn positive_prices_survive(price in 0.0f64..1.0e9, suffix in "(USD)?") {
        let raw = format!("{price}{suffix}");
        let rec = SalesRecord::from_fields(&sales_row("2025", "", &raw)).unwrap();
        prop_assert_eq!(rec.sale_price_usd(), price);
    }

    #[test]
    fn vehicle_year_reads_leading_integer(
        year in any::<i32>(),
        tail in "(\\.[0-9]{1,3}|[a-z ]{0,4})"
    ) {
        let raw = format!("{year}{tail}");
        let rec = SalesRecord::from_fields(&sales_row("2025", &raw, "")).unwrap();
        prop_assert_eq!(rec.vehicle_year(), year);
    }

    #[test]
    fn sale_year_is_the_four_digit_prefix(date in "[0-9]{4}\\PC{0,12}") {
        let rec = SalesRecord::from_fields(&sales_row(&date, "", "")).unwrap();
        let expected: i32 = date[..4].parse().unwrap();
        prop_assert_eq!(rec.sale_year(), expected);
    }

    #[test]
    fn short_dates_have_year_zero(date in "\\PC{0,3}") {
        let rec = SalesRecord::from_fields(&sales_row(&date, "", "")).unwrap();
        prop_assert_eq!(rec.sale_year(), 0);
    }

    #[test]
    fn parsed_fields_are_trimmed(line in "[ \\t\\r,\"a-z0-9]{0,60}|\\PC{0,60}") {
        let fields = parse_line(&line);
        prop_assert!(!fields.is_empty());
        prop_assert_eq!(fields.len(), unquoted_commas(&line) + 1);
        for field in &fields {
            prop_assert_eq!(trim_field(field), field.as_str());
            prop_assert!(!field.starts_with(is_trim_char));
            prop_assert!(!field.ends_with(is_trim_char));
            prop_assert!(!field.contains('"'));
        }
    }
}
