//! A1-style addressing for sheet ranges

use garita_types::StoreError;

/// Convert a 0-based column index to its letter form (0 -> "A", 26 -> "AA").
pub fn col_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut out = String::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    out
}

/// Convert column letters to a 0-based index ("A" -> 0, "GH" -> 189).
pub fn col_index(letters: &str) -> Result<usize, StoreError> {
    if letters.is_empty() {
        return Err(StoreError::BadRange("empty column letters".to_string()));
    }
    let mut n = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(StoreError::BadRange(format!("bad column letters: {letters}")));
        }
        n = n * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Ok(n - 1)
}

/// A single cell of a named sheet. Rows are 1-based, columns 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub sheet: String,
    pub col: usize,
    pub row: u32,
}

impl CellRef {
    pub fn new(sheet: impl Into<String>, col: usize, row: u32) -> CellRef {
        CellRef { sheet: sheet.into(), col, row }
    }

    pub fn to_a1(&self) -> String {
        format!("{}!{}{}", self.sheet, col_letters(self.col), self.row)
    }
}

/// A rectangular range of a named sheet.
///
/// `end_row: None` leaves the range open-ended downwards, the usual shape for
/// history scans ("Hoja 1!A2:GH").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    pub sheet: String,
    pub start_col: usize,
    pub end_col: usize,
    pub start_row: u32,
    pub end_row: Option<u32>,
}

impl RangeSpec {
    /// Open-ended scan from `start_row` down, spanning the given columns.
    pub fn scan(sheet: impl Into<String>, start_row: u32, start_col: usize, end_col: usize) -> RangeSpec {
        RangeSpec {
            sheet: sheet.into(),
            start_col,
            end_col,
            start_row,
            end_row: None,
        }
    }

    /// A single row slice.
    pub fn row(sheet: impl Into<String>, row: u32, start_col: usize, end_col: usize) -> RangeSpec {
        RangeSpec {
            sheet: sheet.into(),
            start_col,
            end_col,
            start_row: row,
            end_row: Some(row),
        }
    }

    /// A single-column scan from `start_row` down.
    pub fn column(sheet: impl Into<String>, col: usize, start_row: u32) -> RangeSpec {
        RangeSpec::scan(sheet, start_row, col, col)
    }

    /// Parse an A1 range such as "Hoja 1!A2:GH" or "Consecutivos!C4".
    pub fn parse(a1: &str) -> Result<RangeSpec, StoreError> {
        let (sheet, cells) = a1
            .rsplit_once('!')
            .ok_or_else(|| StoreError::BadRange(format!("missing sheet name: {a1}")))?;
        let (start, end) = match cells.split_once(':') {
            Some((s, e)) => (s, Some(e)),
            None => (cells, None),
        };

        let (start_col, start_row) = split_cell(start)?;
        let start_row =
            start_row.ok_or_else(|| StoreError::BadRange(format!("missing start row: {a1}")))?;

        let (end_col, end_row) = match end {
            Some(e) => {
                let (col, row) = split_cell(e)?;
                (col, row)
            }
            None => (start_col, Some(start_row)),
        };

        Ok(RangeSpec {
            sheet: sheet.to_string(),
            start_col,
            end_col,
            start_row,
            end_row,
        })
    }

    pub fn to_a1(&self) -> String {
        let start = format!("{}{}", col_letters(self.start_col), self.start_row);
        let end_col = col_letters(self.end_col);
        match self.end_row {
            Some(end_row) if end_row == self.start_row && self.end_col == self.start_col => {
                format!("{}!{}", self.sheet, start)
            }
            Some(end_row) => format!("{}!{}:{}{}", self.sheet, start, end_col, end_row),
            None => format!("{}!{}:{}", self.sheet, start, end_col),
        }
    }

    /// Number of columns the range spans.
    pub fn width(&self) -> usize {
        self.end_col.saturating_sub(self.start_col) + 1
    }
}

fn split_cell(cell: &str) -> Result<(usize, Option<u32>), StoreError> {
    let letters: String = cell.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let digits = &cell[letters.len()..];
    let col = col_index(&letters)?;
    if digits.is_empty() {
        return Ok((col, None));
    }
    let row: u32 = digits
        .parse()
        .map_err(|_| StoreError::BadRange(format!("bad row number: {cell}")))?;
    if row == 0 {
        return Err(StoreError::BadRange(format!("rows are 1-based: {cell}")));
    }
    Ok((col, Some(row)))
}
