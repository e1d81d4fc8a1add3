use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Raw-file layout served by an index's vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    DelimitedText,
    Spreadsheet,
}

/// Stock indices with a supported constituents source. Each maps to the ETF
/// holdings file its vendor publishes (QQQ for NDX, SPY for SPX, DIA for IND).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSymbol {
    Spx,
    Ind,
    Ndx,
}

impl IndexSymbol {
    pub const ALL: [IndexSymbol; 3] = [IndexSymbol::Spx, IndexSymbol::Ind, IndexSymbol::Ndx];

    pub fn as_str(self) -> &'static str {
        match self {
            IndexSymbol::Spx => "SPX",
            IndexSymbol::Ind => "IND",
            IndexSymbol::Ndx => "NDX",
        }
    }

    /// Vendor URL for this index's holdings file.
    pub fn url(self) -> &'static str {
        match self {
            IndexSymbol::Ndx => {
                "https://www.invesco.com/us/financial-products/etfs/holdings/main/holdings/0?ticker=QQQ&action=download"
            }
            IndexSymbol::Spx => {
                "https://www.ssga.com/us/en/individual/etfs/library-content/products/fund-data/etfs/us/holdings-daily-us-en-spy.xlsx"
            }
            IndexSymbol::Ind => {
                "https://www.ssga.com/us/en/individual/etfs/library-content/products/fund-data/etfs/us/holdings-daily-us-en-dia.xlsx"
            }
        }
    }

    pub fn raw_format(self) -> RawFormat {
        match self {
            IndexSymbol::Ndx => RawFormat::DelimitedText,
            IndexSymbol::Spx | IndexSymbol::Ind => RawFormat::Spreadsheet,
        }
    }

    pub fn raw_extension(self) -> &'static str {
        match self.raw_format() {
            RawFormat::DelimitedText => "csv",
            RawFormat::Spreadsheet => "xlsx",
        }
    }
}

impl fmt::Display for IndexSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPX" => Ok(IndexSymbol::Spx),
            "IND" => Ok(IndexSymbol::Ind),
            "NDX" => Ok(IndexSymbol::Ndx),
            other => Err(Error::UnsupportedSymbol(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_symbols() {
        for symbol in IndexSymbol::ALL {
            assert_eq!(symbol.as_str().parse::<IndexSymbol>().unwrap(), symbol);
        }
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = "RUT".parse::<IndexSymbol>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedSymbol(s) if s == "RUT"));
    }

    #[test]
    fn format_matches_raw_extension() {
        assert_eq!(IndexSymbol::Ndx.raw_format(), RawFormat::DelimitedText);
        assert_eq!(IndexSymbol::Ndx.raw_extension(), "csv");
        assert_eq!(IndexSymbol::Spx.raw_format(), RawFormat::Spreadsheet);
        assert_eq!(IndexSymbol::Ind.raw_extension(), "xlsx");
    }
}
