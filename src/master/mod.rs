//! Master Table Builder: merges the per-index canonical CSVs into one table
//! listing the union of all symbols plus per-index membership columns.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Local;

use crate::error::{Error, Result};

/// The merged view over every tracked index. Rebuilt from scratch on each
/// run; rows are already in final output order.
#[derive(Debug, Clone)]
pub struct MasterTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MasterTable {
    /// Write the table as CSV, header first, no row-index column.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Build the master table from `dir/{id}.csv` for each id in `index_ids`.
///
/// The All column is the sorted, deduplicated union of every index's Symbol
/// column. Each index contributes a `{id}_Count` / `{id}` column pair holding
/// its own symbols sorted independently, blank-padded to the union's length
/// (the table is intentionally jagged, not re-aligned by symbol). Last_Update
/// carries the current timestamp in row 1 only.
pub fn build(dir: &Path, index_ids: &[&str]) -> Result<MasterTable> {
    let mut per_index: Vec<(String, Vec<String>)> = Vec::with_capacity(index_ids.len());
    let mut union: BTreeSet<String> = BTreeSet::new();
    for &id in index_ids {
        let path = dir.join(format!("{id}.csv"));
        if !path.is_file() {
            return Err(Error::MissingIndexFile {
                index: id.to_string(),
                path,
            });
        }
        // An index's own list is not deduplicated here; only the cross-index
        // union is.
        let symbols = read_symbol_column(&path)?;
        union.extend(symbols.iter().cloned());
        per_index.push((id.to_string(), symbols));
    }
    let all: Vec<String> = union.into_iter().collect();

    let mut headers = vec!["All_Count".to_string(), "All".to_string()];
    for (id, _) in &per_index {
        headers.push(format!("{id}_Count"));
        headers.push(id.clone());
    }
    headers.push("Last_Update".to_string());

    let sorted: Vec<Vec<String>> = per_index
        .iter()
        .map(|(_, symbols)| {
            let mut s = symbols.clone();
            s.sort();
            s
        })
        .collect();

    let stamp = Local::now().format("%m/%d/%Y %H:%M:%S").to_string();
    let mut rows = Vec::with_capacity(all.len());
    for (r, symbol) in all.iter().enumerate() {
        let mut row = vec![(r + 1).to_string(), symbol.clone()];
        for symbols in &sorted {
            if r < symbols.len() {
                row.push((r + 1).to_string());
                row.push(symbols[r].clone());
            } else {
                row.push(String::new());
                row.push(String::new());
            }
        }
        row.push(if r == 0 { stamp.clone() } else { String::new() });
        rows.push(row);
    }

    Ok(MasterTable { headers, rows })
}

/// Extract the Symbol column of a canonical per-index CSV, in file order.
fn read_symbol_column(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    let symbol_idx = headers
        .iter()
        .position(|h| h == "Symbol")
        .ok_or_else(|| Error::format(path, "missing Symbol column"))?;

    let mut symbols = Vec::new();
    for record in rdr.records() {
        let record = record?;
        symbols.push(record.get(symbol_idx).unwrap_or("").to_string());
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ConstituentRow, ConstituentTable};
    use std::fs;
    use tempfile::tempdir;

    fn write_canonical(dir: &Path, id: &str, symbols: &[&str]) {
        let table = ConstituentTable {
            rows: symbols
                .iter()
                .map(|s| ConstituentRow {
                    company: format!("{s} Co"),
                    symbol: s.to_string(),
                    sector: "Industrials".into(),
                    weight: 1.0,
                    shares_held: 100.0,
                })
                .collect(),
            last_update: "20250404".into(),
        };
        table.write_csv(&dir.join(format!("{id}.csv"))).unwrap();
    }

    fn column<'a>(table: &'a MasterTable, name: &str) -> Vec<&'a str> {
        let idx = table.headers.iter().position(|h| h == name).unwrap();
        table.rows.iter().map(|r| r[idx].as_str()).collect()
    }

    #[test]
    fn union_is_sorted_and_deduplicated_across_indices() {
        let dir = tempdir().unwrap();
        write_canonical(dir.path(), "A", &["X", "Z", "Y"]);
        write_canonical(dir.path(), "B", &["W", "X"]);

        let table = build(dir.path(), &["A", "B"]).unwrap();
        assert_eq!(
            table.headers,
            ["All_Count", "All", "A_Count", "A", "B_Count", "B", "Last_Update"]
        );
        assert_eq!(column(&table, "All"), ["W", "X", "Y", "Z"]);
        assert_eq!(column(&table, "All_Count"), ["1", "2", "3", "4"]);
        // each index sorted on its own, blank-padded to the union length
        assert_eq!(column(&table, "A"), ["X", "Y", "Z", ""]);
        assert_eq!(column(&table, "B"), ["W", "X", "", ""]);
        let b_count = column(&table, "B_Count");
        assert_eq!(b_count.iter().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn timestamp_in_first_row_only() {
        let dir = tempdir().unwrap();
        write_canonical(dir.path(), "A", &["X", "Y"]);

        let table = build(dir.path(), &["A"]).unwrap();
        let stamps = column(&table, "Last_Update");
        assert_eq!(stamps.len(), 2);
        assert_eq!(stamps[0].len(), "04/04/2025 16:30:00".len());
        assert_eq!(stamps[1], "");
    }

    #[test]
    fn missing_index_file_is_a_not_found_error() {
        let dir = tempdir().unwrap();
        write_canonical(dir.path(), "A", &["X"]);

        let err = build(dir.path(), &["A", "B"]).unwrap_err();
        assert!(matches!(err, Error::MissingIndexFile { index, .. } if index == "B"));
    }

    #[test]
    fn empty_inputs_build_a_zero_row_table() {
        let dir = tempdir().unwrap();
        write_canonical(dir.path(), "A", &[]);
        write_canonical(dir.path(), "B", &[]);

        let table = build(dir.path(), &["A", "B"]).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(
            table.headers,
            ["All_Count", "All", "A_Count", "A", "B_Count", "B", "Last_Update"]
        );
    }

    #[test]
    fn master_csv_end_to_end() {
        let dir = tempdir().unwrap();
        write_canonical(dir.path(), "A", &["AAA", "CCC"]);
        write_canonical(dir.path(), "B", &["BBB"]);

        let table = build(dir.path(), &["A", "B"]).unwrap();
        let out = dir.path().join("master_constituents.csv");
        table.write_csv(&out).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "All_Count,All,A_Count,A,B_Count,B,Last_Update");
        assert!(lines[1].starts_with("1,AAA,1,AAA,1,BBB,"));
        assert_eq!(lines[2], "2,BBB,2,CCC,,,");
        assert_eq!(lines[3], "3,CCC,,,,,");
        assert_eq!(lines.len(), 4);
    }
}
