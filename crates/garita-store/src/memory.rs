//! JSON-file-persisted in-memory sheet store
//!
//! Stand-in for the remote spreadsheet service with the same loose
//! semantics: no transactions, last-write-wins cell updates, appends landing
//! after the last non-empty row.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::RwLock;

use garita_types::StoreError;

use crate::client::{AppendResult, SheetsClient};
use crate::range::{CellRef, RangeSpec};

type Sheets = HashMap<String, Vec<Vec<String>>>;

/// In-memory sheet store, optionally persisted to `sheets.json`.
pub struct MemorySheetsClient {
    store_path: Option<PathBuf>,
    sheets: RwLock<Sheets>,
}

impl MemorySheetsClient {
    /// Create or load a store persisted under `store_dir`.
    pub fn open(store_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("sheets.json");

        let sheets = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            Sheets::new()
        };

        Ok(Self {
            store_path: Some(store_path),
            sheets: RwLock::new(sheets),
        })
    }

    /// Volatile store for tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            store_path: None,
            sheets: RwLock::new(Sheets::new()),
        }
    }

    /// Replace a whole sheet, e.g. to seed headers or fixture rows.
    pub fn seed(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        {
            let mut sheets = self.write_lock()?;
            sheets.insert(sheet.to_string(), rows);
        }
        self.persist()
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Sheets>, StoreError> {
        self.sheets
            .write()
            .map_err(|_| StoreError::Unreachable("sheet store lock poisoned".to_string()))
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Sheets>, StoreError> {
        self.sheets
            .read()
            .map_err(|_| StoreError::Unreachable("sheet store lock poisoned".to_string()))
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        let sheets = self.read_lock()?;
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &*sheets)?;
        Ok(())
    }
}

/// 1-based index of the row after the last non-empty row.
fn next_free_row(rows: &[Vec<String>]) -> usize {
    let last_used = rows
        .iter()
        .rposition(|row| row.iter().any(|cell| !cell.is_empty()));
    match last_used {
        Some(index) => index + 2,
        None => 1,
    }
}

fn grow_to(rows: &mut Vec<Vec<String>>, row: usize, col: usize) {
    if rows.len() < row {
        rows.resize(row, Vec::new());
    }
    let cells = &mut rows[row - 1];
    if cells.len() <= col {
        cells.resize(col + 1, String::new());
    }
}

impl SheetsClient for MemorySheetsClient {
    fn get_rows(&self, range: &RangeSpec) -> Result<Vec<Vec<String>>, StoreError> {
        let sheets = self.read_lock()?;
        let Some(rows) = sheets.get(&range.sheet) else {
            return Ok(Vec::new());
        };

        let start = (range.start_row.saturating_sub(1)) as usize;
        let end = match range.end_row {
            Some(end_row) => (end_row as usize).min(rows.len()),
            None => rows.len(),
        };
        if start >= end {
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(end - start);
        for row in &rows[start..end] {
            let mut cells = Vec::with_capacity(range.width());
            for col in range.start_col..=range.end_col {
                cells.push(row.get(col).cloned().unwrap_or_default());
            }
            out.push(cells);
        }
        Ok(out)
    }

    fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<AppendResult, StoreError> {
        let inserted = {
            let mut sheets = self.write_lock()?;
            let rows = sheets.entry(sheet.to_string()).or_default();
            let target = next_free_row(rows);
            grow_to(rows, target, row.len().saturating_sub(1));
            rows[target - 1] = row;
            target as u32
        };
        self.persist()?;
        Ok(AppendResult { row: inserted })
    }

    fn update_cell(&self, cell: &CellRef, value: &str) -> Result<(), StoreError> {
        {
            let mut sheets = self.write_lock()?;
            let rows = sheets.entry(cell.sheet.clone()).or_default();
            grow_to(rows, cell.row as usize, cell.col);
            rows[cell.row as usize - 1][cell.col] = value.to_string();
        }
        self.persist()
    }

    fn update_range(&self, range: &RangeSpec, values: Vec<Vec<String>>) -> Result<(), StoreError> {
        {
            let mut sheets = self.write_lock()?;
            let rows = sheets.entry(range.sheet.clone()).or_default();
            for (i, value_row) in values.iter().enumerate() {
                let row = range.start_row as usize + i;
                if let Some(end_row) = range.end_row {
                    if row > end_row as usize {
                        return Err(StoreError::BadRange(format!(
                            "{} values overflow range {}",
                            values.len(),
                            range.to_a1()
                        )));
                    }
                }
                for (j, value) in value_row.iter().enumerate() {
                    let col = range.start_col + j;
                    if col > range.end_col {
                        return Err(StoreError::BadRange(format!(
                            "row of {} cells overflows range {}",
                            value_row.len(),
                            range.to_a1()
                        )));
                    }
                    grow_to(rows, row, col);
                    rows[row - 1][col] = value.clone();
                }
            }
        }
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_append_lands_after_last_non_empty_row() {
        let store = MemorySheetsClient::in_memory();
        assert_eq!(store.append_row("Hoja 1", row(&["a"])).unwrap().row, 1);
        assert_eq!(store.append_row("Hoja 1", row(&["b"])).unwrap().row, 2);

        // a hole left by an update does not capture later appends
        store
            .update_cell(&CellRef::new("Hoja 1", 0, 5), "far")
            .unwrap();
        assert_eq!(store.append_row("Hoja 1", row(&["c"])).unwrap().row, 6);
    }

    #[test]
    fn test_get_rows_pads_missing_cells() {
        let store = MemorySheetsClient::in_memory();
        store.append_row("Hoja 1", row(&["x"])).unwrap();

        let range = RangeSpec::row("Hoja 1", 1, 0, 3);
        let rows = store.get_rows(&range).unwrap();
        assert_eq!(rows, vec![row(&["x", "", "", ""])]);
    }

    #[test]
    fn test_get_rows_scan_skips_header() {
        let store = MemorySheetsClient::in_memory();
        store.append_row("Hoja 1", row(&["header"])).unwrap();
        store.append_row("Hoja 1", row(&["first"])).unwrap();
        store.append_row("Hoja 1", row(&["second"])).unwrap();

        let range = RangeSpec::scan("Hoja 1", 2, 0, 0);
        let rows = store.get_rows(&range).unwrap();
        assert_eq!(rows, vec![row(&["first"]), row(&["second"])]);
    }

    #[test]
    fn test_get_rows_missing_sheet_is_empty() {
        let store = MemorySheetsClient::in_memory();
        let range = RangeSpec::scan("Nada", 1, 0, 5);
        assert!(store.get_rows(&range).unwrap().is_empty());
    }

    #[test]
    fn test_update_range_rejects_overflow() {
        let store = MemorySheetsClient::in_memory();
        let range = RangeSpec::row("Hoja 1", 1, 0, 1);
        let result = store.update_range(&range, vec![row(&["a", "b", "c"])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_then_read_cell() {
        let store = MemorySheetsClient::in_memory();
        let cell = CellRef::new("Hoja 1", 6, 3);
        store.update_cell(&cell, "salida").unwrap();

        let rows = store.get_rows(&RangeSpec::row("Hoja 1", 3, 6, 6)).unwrap();
        assert_eq!(rows, vec![row(&["salida"])]);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = MemorySheetsClient::open(dir.path().to_path_buf()).unwrap();
            store.append_row("Hoja 1", row(&["kept"])).unwrap();
        }
        let reopened = MemorySheetsClient::open(dir.path().to_path_buf()).unwrap();
        let rows = reopened
            .get_rows(&RangeSpec::row("Hoja 1", 1, 0, 0))
            .unwrap();
        assert_eq!(rows, vec![row(&["kept"])]);
    }
}
