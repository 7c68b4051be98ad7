//! Fatal pipeline failures.
//!
//! Every variant aborts the run; there is no warn-and-continue path.
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("fetch inventory from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("header '{anchor}' not found in inventory export")]
    HeaderNotFound { anchor: String },

    #[error("missing columns in inventory export: {}", quoted_list(.missing))]
    SchemaMismatch { missing: Vec<String> },

    #[error("{} invalid value(s) in inventory export: {}", .issues.len(), issue_list(.issues))]
    InvalidRecords { issues: Vec<CellIssue> },
}

/// One rejected cell, addressed by its row number in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    pub row: usize,
    pub column: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required cell is blank.
    Missing,
    /// Cell could not be coerced to a whole number.
    NotANumber(String),
}

impl fmt::Display for CellIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "row {} '{}' is blank", self.row, self.column),
            IssueKind::NotANumber(value) => write!(
                f,
                "row {} '{}' is not a whole number: '{}'",
                self.row, self.column, value
            ),
        }
    }
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn issue_list(issues: &[CellIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
