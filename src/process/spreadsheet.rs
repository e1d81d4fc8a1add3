//! Spreadsheet vendor layout (SSGA daily holdings workbook): metadata
//! preamble rows, an "As of" date note, then a data table introduced by a
//! row whose first cell is "Name".

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{Error, Result};

use super::{normalize_ticker, parse_number, reformat_date, ConstituentRow, ConstituentTable};

/// Cash/sweep line in the holdings table; not a real constituent.
const CASH_TICKER: &str = "CASH_USD";

pub fn parse(path: &Path) -> Result<ConstituentTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::format(path, "workbook has no sheets"))??;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    scan_rows(rows, path)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Walk the sheet top to bottom: pick up the "As of" date from the preamble
/// (first match wins), skip everything until the "Name" header row, then
/// collect holdings until a row whose first three cells are all empty.
fn scan_rows<I>(rows: I, path: &Path) -> Result<ConstituentTable>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut last_update: Option<String> = None;
    let mut in_table = false;
    let mut out = Vec::new();

    for cells in rows {
        if last_update.is_none() {
            if let Some(note) = cells.get(1) {
                if note.contains("As of") {
                    let token = note.split_whitespace().last().unwrap_or("");
                    last_update = Some(reformat_date(token, "%d-%b-%Y", path)?);
                }
            }
        }

        if in_table {
            if cells.iter().take(3).all(|c| c.is_empty()) {
                break;
            }
            if cells.iter().any(|c| c == CASH_TICKER) {
                continue;
            }
            let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
            out.push(ConstituentRow {
                company: cell(0),
                symbol: normalize_ticker(&cell(1)),
                weight: parse_number(&cell(4), path)?,
                sector: cell(5),
                shares_held: parse_number(&cell(6), path)?,
            });
        } else if cells.first().map(|c| c.trim()) == Some("Name") {
            in_table = true;
        }
    }

    if !in_table {
        return Err(Error::format(path, "no \"Name\" header row found"));
    }
    let last_update =
        last_update.ok_or_else(|| Error::format(path, "no \"As of\" date row found"))?;
    Ok(ConstituentTable {
        rows: out,
        last_update,
    })
}
