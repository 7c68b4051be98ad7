//! Raw export parsing and header-row location.
//!
//! Spreadsheet exports often carry title or metadata rows above the real
//! table. The anchor column name marks where the table starts; everything
//! above it is discarded.
use crate::error::MenuError;
use anyhow::{Context, Result};

/// Column used to find the header row when no override is given.
pub const DEFAULT_ANCHOR: &str = "Bought Quantity";

/// One parsed export row with its 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}

/// The header row and the data rows that follow it.
#[derive(Debug, Clone)]
pub struct CleanTable {
    pub header: SheetRow,
    pub rows: Vec<SheetRow>,
}

/// Parse CSV text into rows; rows may have differing widths.
pub fn parse_rows(text: &str) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let record = record.with_context(|| format!("parse export row {}", idx + 1))?;
            Ok(SheetRow {
                number: idx + 1,
                cells: record.iter().map(ToString::to_string).collect(),
            })
        })
        .collect()
}

/// Keep the first row containing `anchor` as a cell and every row after it.
///
/// Matching is exact and may hit any column. Blank rows after the header
/// are spreadsheet padding and are dropped.
pub fn locate_header(rows: Vec<SheetRow>, anchor: &str) -> Result<CleanTable, MenuError> {
    let mut rows = rows.into_iter();
    let header = rows
        .by_ref()
        .find(|row| row.cells.iter().any(|cell| cell == anchor))
        .ok_or_else(|| MenuError::HeaderNotFound {
            anchor: anchor.to_string(),
        })?;
    let rows = rows.filter(|row| !row.is_blank()).collect();
    Ok(CleanTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Wine cellar,,,
Updated weekly,,,
Country,Region,Bought Quantity,Stock
France,Bordeaux,6,3
,,,
Italy,\"Piemonte, Langhe\",2,0
";

    #[test]
    fn drops_rows_above_the_anchor() {
        let rows = parse_rows(EXPORT).expect("parse export");
        let table = locate_header(rows, DEFAULT_ANCHOR).expect("locate header");

        assert_eq!(table.header.number, 3);
        assert_eq!(table.header.cells[0], "Country");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells, vec!["France", "Bordeaux", "6", "3"]);
        assert_eq!(table.rows[1].number, 6);
        assert_eq!(table.rows[1].cells[1], "Piemonte, Langhe");
    }

    #[test]
    fn anchor_matches_in_any_column() {
        let rows = parse_rows("junk\nA,B,Bought Quantity\n1,2,3\n").expect("parse export");
        let table = locate_header(rows, DEFAULT_ANCHOR).expect("locate header");
        assert_eq!(table.header.cells, vec!["A", "B", "Bought Quantity"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn anchor_requires_exact_cell_match() {
        let rows = parse_rows("Total Bought Quantity,x\n1,2\n").expect("parse export");
        let err = locate_header(rows, DEFAULT_ANCHOR).expect_err("substring must not match");
        assert!(matches!(err, MenuError::HeaderNotFound { .. }));
    }

    #[test]
    fn missing_anchor_is_fatal() {
        let rows = parse_rows("Country,Region\nFrance,Loire\n").expect("parse export");
        let err = locate_header(rows, DEFAULT_ANCHOR).expect_err("anchor absent");
        assert_eq!(
            err.to_string(),
            "header 'Bought Quantity' not found in inventory export"
        );
    }

    #[test]
    fn empty_text_has_no_header() {
        let rows = parse_rows("").expect("parse export");
        assert!(locate_header(rows, DEFAULT_ANCHOR).is_err());
    }
}
