//! Delimited-text vendor layout (Invesco holdings export): a flat CSV whose
//! header carries a `Date` field plus the five columns we keep.

use std::path::Path;

use crate::error::{Error, Result};

use super::{normalize_ticker, parse_number, reformat_date, ConstituentRow, ConstituentTable};

const DATE_COLUMN: &str = "Date";

/// Source columns, in the order they map onto
/// Company, Symbol, Sector, Weight, SharesHeld.
const SOURCE_COLUMNS: [&str; 5] = ["Name", "HoldingsTicker", "Sector", "Weight", "Shares"];

pub fn parse(path: &Path) -> Result<ConstituentTable> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::format(path, format!("missing expected column {name:?}")))
    };
    let date_idx = position(DATE_COLUMN)?;
    let mut source_idx = [0usize; SOURCE_COLUMNS.len()];
    for (slot, name) in source_idx.iter_mut().zip(SOURCE_COLUMNS) {
        *slot = position(name)?;
    }

    // LastUpdate comes from the first data row's Date; it is constant across
    // the file.
    let mut last_update: Option<String> = None;
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if last_update.is_none() {
            let raw = record.get(date_idx).unwrap_or("");
            last_update = Some(reformat_date(raw, "%m/%d/%Y", path)?);
        }
        let field = |i: usize| record.get(source_idx[i]).unwrap_or("").to_string();
        rows.push(ConstituentRow {
            company: field(0),
            symbol: normalize_ticker(&field(1)),
            sector: field(2),
            weight: parse_number(&field(3), path)?,
            shares_held: parse_number(&field(4), path)?,
        });
    }

    let last_update = last_update
        .ok_or_else(|| Error::format(path, "no data rows to take the Date field from"))?;
    Ok(ConstituentTable { rows, last_update })
}
