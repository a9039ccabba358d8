//! Sheet access trait consumed by the inspection engine

use garita_types::StoreError;

use crate::range::{CellRef, RangeSpec};

/// Result of appending a row to a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendResult {
    /// 1-based index of the inserted row.
    pub row: u32,
}

/// Read/append/update access to named ranges of a remote sheet-like store.
///
/// The store offers no transactions and no row-level locks; updates are
/// last-write-wins. Callers that need uniqueness (the consecutive number
/// generator) must re-read after writing and retry on conflict.
pub trait SheetsClient: Send + Sync {
    /// Fetch the cells of a range as a row-major matrix.
    ///
    /// Rows past the end of the data are omitted; cells missing within a row
    /// come back as empty strings, so every returned row has `range.width()`
    /// cells.
    fn get_rows(&self, range: &RangeSpec) -> Result<Vec<Vec<String>>, StoreError>;

    /// Append a row after the last non-empty row of a sheet.
    fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<AppendResult, StoreError>;

    /// Overwrite a single cell.
    fn update_cell(&self, cell: &CellRef, value: &str) -> Result<(), StoreError>;

    /// Overwrite a rectangular range with a row-major matrix.
    fn update_range(&self, range: &RangeSpec, values: Vec<Vec<String>>) -> Result<(), StoreError>;
}
