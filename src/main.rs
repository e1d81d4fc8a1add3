use std::{fs, path::Path, time::Duration};

use anyhow::Result;
use clap::Parser;
use idxscraper::{fetch, master, process, symbols::IndexSymbol};
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Download index constituent files and build the master symbol table.
#[derive(Parser, Debug)]
struct Args {
    /// Directory to write data to; created if it does not exist.
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: std::path::PathBuf,

    /// Indices to process, in order.
    #[arg(
        short = 's',
        long,
        value_delimiter = ',',
        default_values = ["SPX", "IND", "NDX"]
    )]
    symbols: Vec<IndexSymbol>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    fs::create_dir_all(&args.data_dir)?;

    info!("********** beginning get constituents **********");
    let client = Client::new();

    for (i, &symbol) in args.symbols.iter().enumerate() {
        if i > 0 {
            // pace requests so the vendor sites aren't hammered
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        // one bad index must not abort the whole run
        if let Err(e) = process_symbol(&client, symbol, &args.data_dir).await {
            error!(%symbol, "processing failed: {e:#}");
        }
    }

    let ids: Vec<&str> = args.symbols.iter().map(|s| s.as_str()).collect();
    let table = master::build(&args.data_dir, &ids)?;
    let dest = args.data_dir.join("master_constituents.csv");
    table.write_csv(&dest)?;
    info!(rows = table.rows.len(), "wrote master table to {}", dest.display());

    info!("********** finished get constituents **********");
    Ok(())
}

async fn process_symbol(client: &Client, symbol: IndexSymbol, data_dir: &Path) -> Result<()> {
    info!(%symbol, "beginning constituents download");
    let raw_path = fetch::download_raw_file(client, symbol, data_dir).await?;
    info!(%symbol, path = %raw_path.display(), "downloaded raw file");

    let (last_update, table) = process::normalize(symbol, &raw_path)?;
    info!(%symbol, %last_update, rows = table.rows.len(), "normalized constituents");

    let dest = data_dir.join(format!("{symbol}.csv"));
    table.write_csv(&dest)?;
    info!(%symbol, path = %dest.display(), "wrote canonical csv");

    fs::remove_file(&raw_path)?;
    info!(%symbol, "deleted raw file");
    Ok(())
}
