//! Typed schema for the inventory export.
//!
//! The descriptor is checked against the header row once; rows are then
//! coerced into `WineRecord`s. All problems are collected before failing so
//! a single run reports every missing column or bad cell.
use crate::error::{CellIssue, IssueKind, MenuError};
use crate::model::WineRecord;
use crate::sheet::CleanTable;

/// Logical record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Country,
    Region,
    Producer,
    Title,
    Vintage,
    PurchasePrice,
    MainGrape,
    Stock,
    Style,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: Field,
    pub header: &'static str,
    /// Reject blank cells.
    pub required: bool,
}

const fn column(field: Field, header: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        field,
        header,
        required,
    }
}

/// Column layout of the shared inventory sheet.
pub const INVENTORY_SCHEMA: &[FieldSpec] = &[
    column(Field::Country, "Country", true),
    column(Field::Region, "Region", true),
    column(Field::Producer, "Producer", true),
    column(Field::Title, "Title", false),
    column(Field::Vintage, "Vintage", false),
    column(Field::PurchasePrice, "Purchase price", false),
    column(Field::MainGrape, "Main grape", false),
    column(Field::Stock, "Stock", false),
    column(Field::Style, "Style", true),
];

/// Descriptor entries resolved to column positions.
struct BoundSchema<'a> {
    columns: Vec<(&'a FieldSpec, usize)>,
}

impl<'a> BoundSchema<'a> {
    fn bind(schema: &'a [FieldSpec], header: &[String]) -> Result<Self, MenuError> {
        let mut columns = Vec::with_capacity(schema.len());
        let mut missing = Vec::new();
        for spec in schema {
            // First occurrence wins when a header is duplicated.
            match header.iter().position(|name| name.trim() == spec.header) {
                Some(idx) => columns.push((spec, idx)),
                None => missing.push(spec.header.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(MenuError::SchemaMismatch { missing });
        }
        Ok(Self { columns })
    }
}

#[derive(Default)]
struct RecordBuilder {
    record: WineRecord,
}

impl RecordBuilder {
    /// Store a trimmed cell in its field. `Stock` is the only numeric
    /// field; a blank stock cell counts as zero.
    fn assign(&mut self, field: Field, value: &str) -> Result<(), IssueKind> {
        let slot = match field {
            Field::Country => &mut self.record.country,
            Field::Region => &mut self.record.region,
            Field::Producer => &mut self.record.producer,
            Field::Title => &mut self.record.title,
            Field::Vintage => &mut self.record.vintage,
            Field::PurchasePrice => &mut self.record.purchase_price,
            Field::MainGrape => &mut self.record.main_grape,
            Field::Style => &mut self.record.style,
            Field::Stock => {
                self.record.stock = parse_count(value)
                    .ok_or_else(|| IssueKind::NotANumber(value.to_string()))?;
                return Ok(());
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Validate the header row and coerce every data row into a record.
pub fn load_records(
    table: &CleanTable,
    schema: &[FieldSpec],
) -> Result<Vec<WineRecord>, MenuError> {
    let bound = BoundSchema::bind(schema, &table.header.cells)?;
    let mut records = Vec::with_capacity(table.rows.len());
    let mut issues = Vec::new();

    for row in &table.rows {
        let mut builder = RecordBuilder::default();
        for (spec, idx) in &bound.columns {
            let value = row.cells.get(*idx).map(|cell| cell.trim()).unwrap_or("");
            if spec.required && value.is_empty() {
                issues.push(CellIssue {
                    row: row.number,
                    column: spec.header.to_string(),
                    kind: IssueKind::Missing,
                });
                continue;
            }
            if let Err(kind) = builder.assign(spec.field, value) {
                issues.push(CellIssue {
                    row: row.number,
                    column: spec.header.to_string(),
                    kind,
                });
            }
        }
        records.push(builder.record);
    }

    if !issues.is_empty() {
        return Err(MenuError::InvalidRecords { issues });
    }
    Ok(records)
}

/// Parse a whole-number cell. Sheets sometimes export counts as `3.0`.
fn parse_count(value: &str) -> Option<i64> {
    if value.is_empty() {
        return Some(0);
    }
    if let Ok(count) = value.parse::<i64>() {
        return Some(count);
    }
    let (whole, fraction) = value.split_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    whole.parse::<i64>().ok()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
