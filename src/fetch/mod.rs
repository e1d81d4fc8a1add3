//! Downloads a vendor's raw holdings file to local storage. One attempt per
//! symbol; the driver decides whether to move on.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::debug;

use crate::error::{Error, Result};
use crate::symbols::IndexSymbol;

/// Download `symbol`'s holdings file into `out_dir` as
/// `{SYMBOL}_RAW.{ext}` and return the path written.
pub async fn download_raw_file(
    client: &Client,
    symbol: IndexSymbol,
    out_dir: &Path,
) -> Result<PathBuf> {
    let url = symbol.url();
    let dest = out_dir.join(format!("{}_RAW.{}", symbol, symbol.raw_extension()));

    debug!(%symbol, url, "fetching raw holdings file");
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| Error::Download {
            url: url.to_string(),
            source,
        })?;
    let bytes = resp.bytes().await.map_err(|source| Error::Download {
        url: url.to_string(),
        source,
    })?;
    tokio::fs::write(&dest, &bytes).await?;
    Ok(dest)
}
