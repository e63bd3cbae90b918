use car_sales::schema::Column;
use clap::{Arg, Command};
use csv_async::AsyncWriterBuilder;

const MARKETS: &[(&str, &str)] = &[
    ("China", "Asia"),
    ("Japan", "Asia"),
    ("India", "Asia"),
    ("Germany", "Europe"),
    ("France", "Europe"),
    ("Italy", "Europe"),
    ("Spain", "Europe"),
    ("Poland", "Europe"),
    ("United Kingdom", "Europe"),
    ("USA", "North America"),
    ("Mexico", "North America"),
    ("Brazil", "South America"),
];
const MAKES: &[(&str, &[&str])] = &[
    ("Audi", &["A3", "A4", "Q5", "e-tron"]),
    ("BMW", &["3 Series", "X3", "X5", "i4"]),
    ("Toyota", &["Corolla", "RAV4"]),
    ("Volkswagen", &["Golf", "Tiguan"]),
    ("Ford", &["Focus", "F-150"]),
];

/// xorshift64*, enough to spread deterministic rows around.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next() % (hi - lo + 1)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("gen")
        .about("Write a synthetic world car sales export to stdout")
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(clap::value_parser!(u64))
                .required(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .default_value("42"),
        )
        .arg(
            Arg::new("bad_every")
                .long("bad-every")
                .help("Emit a truncated row every N rows (0 = never)")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .get_matches();

    let rows: u64 = *matches.get_one("rows").expect("required by clap");
    let seed: u64 = *matches.get_one("seed").expect("has default");
    let bad_every: u64 = *matches.get_one("bad_every").expect("has default");

    let mut wtr = AsyncWriterBuilder::new()
        .flexible(true)
        .create_writer(tokio::io::stdout());
    wtr.write_record(Column::ALL.iter().map(|c| c.header())).await?;

    let mut rng = Rng(seed.max(1));
    let mut row = vec![String::new(); Column::ALL.len()];
    for i in 0..rows {
        if bad_every > 0 && i % bad_every == bad_every - 1 {
            wtr.write_record(&[format!("S{i:09}"), "2025-01-01".into(), "China".into()])
                .await?;
            continue;
        }
        fill_row(&mut row, i, &mut rng);
        wtr.write_record(&row).await?;
    }

    wtr.flush().await?;
    Ok(())
}

fn fill_row(row: &mut [String], i: u64, rng: &mut Rng) {
    for field in row.iter_mut() {
        field.clear();
    }
    let (country, region) = *rng.pick(MARKETS);
    let (make, models) = *rng.pick(MAKES);
    let mut set = |col: Column, value: String| row[col.index()] = value;

    set(Column::SaleId, format!("S{i:09}"));
    set(
        Column::SaleDate,
        format!(
            "{}-{:02}-{:02}",
            rng.range(2022, 2025),
            rng.range(1, 12),
            rng.range(1, 28)
        ),
    );
    set(Column::Country, country.into());
    set(Column::Region, region.into());
    set(Column::DealershipId, format!("D{:04}", rng.range(1, 500)));
    set(Column::DealershipName, format!("{make} {country}, Store {}", rng.range(1, 9)));
    set(Column::Manufacturer, make.into());
    set(Column::Model, (*rng.pick(models)).into());
    set(Column::VehicleYear, rng.range(2015, 2025).to_string());
    set(Column::OdometerKm, rng.range(0, 150_000).to_string());
    set(
        Column::SalePriceUsd,
        format!("{}.{:02}", rng.range(8_000, 120_000), rng.range(0, 99)),
    );
    set(Column::Currency, "USD".into());
    set(Column::Features, "Sunroof, Navigation".into());
}
