use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use barviz::csv_reader;
use barviz::{BarQuery, VizService};

#[derive(Parser, Debug)]
#[command(name = "barviz")]
#[command(about = "Aggregate CSV data into bar-chart-ready JSON", long_about = None)]
struct Args {
    /// Bar-chart query as JSON, e.g.
    /// '{"category_field": "region", "measure": {"field": "sales", "aggregation": "SUM"}}'
    query: Option<String>,

    /// Read the CSV dataset from a file instead of stdin
    #[arg(long)]
    data: Option<PathBuf>,

    /// Print the ingest summary (row count and field classification)
    /// instead of running a query
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = match &args.data {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            csv_reader::read_csv(file)
                .with_context(|| format!("Failed to read CSV from {}", path.display()))?
        }
        None => csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?,
    };

    let service = VizService::new();
    let summary = service
        .ingest(table.headers, table.rows)
        .context("Failed to ingest dataset")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.describe {
        let json = serde_json::to_string_pretty(&summary)?;
        writeln!(handle, "{}", json).context("Failed to write summary to stdout")?;
        return Ok(());
    }

    let Some(query_json) = args.query else {
        anyhow::bail!("a query is required unless --describe is given");
    };
    let query = BarQuery::from_json(&query_json).context("Failed to decode query")?;
    let chart = service
        .query(summary.dataset_id, &query)
        .context("Query failed")?;

    let json = serde_json::to_string(&chart)?;
    writeln!(handle, "{}", json).context("Failed to write result to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
