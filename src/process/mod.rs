//! Constituent Normalizer: turns a vendor's raw holdings file into the
//! canonical {Company, Symbol, Sector, Weight, SharesHeld} table.

mod delimited;
mod spreadsheet;

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::symbols::{IndexSymbol, RawFormat};

/// Header of the canonical per-index CSV. The leading blank cell is the
/// 1-based row-index column.
pub const CANONICAL_HEADER: [&str; 7] = [
    "",
    "Company",
    "Symbol",
    "Sector",
    "Weight",
    "SharesHeld",
    "LastUpdate",
];

/// One holding of an index, in the vendor-independent schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentRow {
    pub company: String,
    pub symbol: String,
    pub sector: String,
    pub weight: f64,
    pub shares_held: f64,
}

/// Normalized constituents of one index. Rows are written 1-based;
/// `last_update` is the vendor file's stated effective date as YYYYMMDD and
/// is constant across the table.
#[derive(Debug, Clone)]
pub struct ConstituentTable {
    pub rows: Vec<ConstituentRow>,
    pub last_update: String,
}

impl ConstituentTable {
    /// Write the table as a canonical per-index CSV.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(CANONICAL_HEADER)?;
        for (i, row) in self.rows.iter().enumerate() {
            wtr.write_record(&[
                (i + 1).to_string(),
                row.company.clone(),
                row.symbol.clone(),
                row.sector.clone(),
                row.weight.to_string(),
                row.shares_held.to_string(),
                self.last_update.clone(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Parse the raw file at `raw_path` according to the layout `symbol`'s vendor
/// serves, returning the file's effective date and the canonical table.
///
/// The file must already be on local storage; fetching it is the caller's
/// concern.
pub fn normalize(symbol: IndexSymbol, raw_path: &Path) -> Result<(String, ConstituentTable)> {
    let table = match symbol.raw_format() {
        RawFormat::DelimitedText => delimited::parse(raw_path)?,
        RawFormat::Spreadsheet => spreadsheet::parse(raw_path)?,
    };
    Ok((table.last_update.clone(), table))
}

/// Rewrite class-share '.' separators to '/' (TOS convention) and drop
/// surrounding whitespace. Idempotent on already-normalized tickers.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().replace('.', "/")
}

/// Parse `raw` with the chrono format `in_fmt` and reformat as YYYYMMDD.
fn reformat_date(raw: &str, in_fmt: &str, path: &Path) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), in_fmt)
        .map_err(|e| Error::format(path, format!("unparseable date {raw:?}: {e}")))?;
    Ok(date.format("%Y%m%d").to_string())
}

/// Vendors format share counts with thousands separators in some exports.
fn parse_number(raw: &str, path: &Path) -> Result<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse()
        .map_err(|e| Error::format(path, format!("unparseable number {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn ticker_normalization_rewrites_class_share_separator() {
        assert_eq!(normalize_ticker("BRK.B"), "BRK/B");
        assert_eq!(normalize_ticker(" AAPL "), "AAPL");
    }

    #[test]
    fn ticker_normalization_is_idempotent() {
        assert_eq!(normalize_ticker("BRK/B"), "BRK/B");
        assert_eq!(normalize_ticker(normalize_ticker("BF.B").as_str()), "BF/B");
    }

    #[test]
    fn canonical_csv_layout() {
        let table = ConstituentTable {
            rows: vec![
                ConstituentRow {
                    company: "Apple Inc".into(),
                    symbol: "AAPL".into(),
                    sector: "Information Technology".into(),
                    weight: 7.25,
                    shares_held: 178000000.0,
                },
                ConstituentRow {
                    company: "Berkshire Hathaway B".into(),
                    symbol: "BRK/B".into(),
                    sector: "Financials".into(),
                    weight: 1.6,
                    shares_held: 20000000.0,
                },
            ],
            last_update: "20250404".into(),
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("SPX.csv");
        table.write_csv(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            ",Company,Symbol,Sector,Weight,SharesHeld,LastUpdate"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,Apple Inc,AAPL,Information Technology,7.25,178000000,20250404"
        );
        assert!(lines
            .next()
            .unwrap()
            .starts_with("2,Berkshire Hathaway B,BRK/B,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn reformat_date_rejects_garbage() {
        let err = reformat_date("not a date", "%m/%d/%Y", Path::new("x.csv")).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }
}
