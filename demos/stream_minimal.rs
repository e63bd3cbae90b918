use car_sales::{line::parse_line_into, open_source, raw_lines, SalesRecord, SourceMeta};
use futures::StreamExt;
use std::path::Path;

/// Walk an export record by record without the aggregator, printing the
/// first few BMW sales.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = Path::new("./data/sample.csv.gz");
    let reader = open_source(path, &SourceMeta::from_path(path)).await?;
    let mut lines = raw_lines(reader);

    // header
    lines.next().await.transpose()?;

    let mut fields = Vec::new();
    let mut shown = 0;
    while let Some(line) = lines.next().await {
        let line = line?;
        parse_line_into(&String::from_utf8_lossy(&line), &mut fields);
        let Ok(rec) = SalesRecord::from_fields(&fields) else {
            continue;
        };
        if rec.manufacturer() == "BMW" {
            println!("{} {} {} ${:.2}", rec.sale_date(), rec.country(), rec.model(), rec.sale_price_usd());
            shown += 1;
            if shown == 10 {
                break;
            }
        }
    }
    Ok(())
}
