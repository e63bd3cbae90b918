use crate::schema::{Column, MINIMUM_FIELD_COUNT};
use thiserror::Error;

const DATE_YEAR_LENGTH: usize = 4;

/// Why a parsed line did not become a [`SalesRecord`].
///
/// Rejections are expected in real exports; the pipeline counts and drops
/// them without surfacing an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("row has {found} fields, need at least {}", MINIMUM_FIELD_COUNT)]
    TooFewFields { found: usize },
    #[error("vehicle year is not an integer: {0:?}")]
    InvalidVehicleYear(String),
    #[error("sale price is not a number: {0:?}")]
    InvalidSalePrice(String),
}

/// Typed projection of one sales row.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    sale_id: String,
    sale_date: String,
    country: String,
    region: String,
    manufacturer: String,
    model: String,
    vehicle_year: i32,
    sale_price_usd: f64,
}

impl SalesRecord {
    /// Build a record from a parsed field sequence by fixed column position.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RowRejection> {
        if fields.len() < MINIMUM_FIELD_COUNT {
            return Err(RowRejection::TooFewFields {
                found: fields.len(),
            });
        }
        let field = |col: Column| fields[col.index()].as_ref();

        let raw_year = field(Column::VehicleYear);
        let vehicle_year = if raw_year.is_empty() {
            0
        } else {
            leading_int(raw_year)
                .ok_or_else(|| RowRejection::InvalidVehicleYear(raw_year.to_owned()))?
        };

        let raw_price = field(Column::SalePriceUsd);
        let sale_price_usd = if raw_price.is_empty() {
            0.0
        } else {
            leading_float(raw_price)
                .ok_or_else(|| RowRejection::InvalidSalePrice(raw_price.to_owned()))?
        };

        Ok(Self {
            sale_id: field(Column::SaleId).to_owned(),
            sale_date: field(Column::SaleDate).to_owned(),
            country: field(Column::Country).to_owned(),
            region: field(Column::Region).to_owned(),
            manufacturer: field(Column::Manufacturer).to_owned(),
            model: field(Column::Model).to_owned(),
            vehicle_year,
            sale_price_usd: clamp_price(sale_price_usd),
        })
    }

    pub fn sale_id(&self) -> &str {
        &self.sale_id
    }

    pub fn sale_date(&self) -> &str {
        &self.sale_date
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn vehicle_year(&self) -> i32 {
        self.vehicle_year
    }

    /// Never negative.
    pub fn sale_price_usd(&self) -> f64 {
        self.sale_price_usd
    }

    /// Year taken from the first four characters of the sale date, or 0 when
    /// the date is shorter or those characters are not all digits.
    pub fn sale_year(&self) -> i32 {
        year_prefix(&self.sale_date)
    }
}

/// NaN, negatives and -0.0 become 0.0.
fn clamp_price(price: f64) -> f64 {
    if price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Read the integer at the start of `text`, ignoring whatever follows it
/// (`"2024.0"` is 2024). `None` when there are no digits or the value does
/// not fit in an `i32`.
fn leading_int(text: &str) -> Option<i32> {
    let bytes = text.trim_start_matches(|c: char| c.is_ascii_whitespace()).as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let len = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let mut value: i64 = 0;
    for &d in &digits[..len] {
        value = value.checked_mul(10)?.checked_add(i64::from(d - b'0'))?;
    }
    i32::try_from(if negative { -value } else { value }).ok()
}

/// Read the decimal float at the start of `text` (sign, digits, fraction,
/// exponent, or an `inf`/`nan` literal), ignoring trailing text such as a
/// currency suffix. `None` when nothing numeric leads the field or a finite
/// literal overflows `f64`.
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let rest = text[end..].to_ascii_lowercase();
    for literal in ["infinity", "inf", "nan"] {
        if rest.starts_with(literal) {
            return text[..end + literal.len()].parse().ok();
        }
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    // an exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(&bytes[(end + 1 + sign).min(bytes.len())..]);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    let value: f64 = text[..end].parse().ok()?;
    value.is_finite().then_some(value)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn year_prefix(date: &str) -> i32 {
    let mut chars = date.chars();
    let mut year = 0;
    for _ in 0..DATE_YEAR_LENGTH {
        match chars.next().and_then(|c| c.to_digit(10)) {
            Some(d) => year = year * 10 + d as i32,
            None => return 0,
        }
    }
    year
}
