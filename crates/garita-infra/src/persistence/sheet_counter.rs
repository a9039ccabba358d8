//! Branch-scoped consecutive numbers over a shared counter sheet
//!
//! The counter sheet has one column per branch, named in the header row;
//! every issued number is a new row with the value in the branch's column.
//! The store has no transactions, so issuance is optimistic: read the
//! column, append max+1, then re-read and keep the number only if our
//! append is the first row holding it. Losing the race costs a retry, never
//! a duplicate.

use std::sync::Arc;

use garita_domain::repository::ConsecutiveCounter;
use garita_store::{RangeSpec, SheetsClient};
use garita_types::{Error, Result, StoreError};

pub const DEFAULT_COUNTER_ATTEMPTS: u32 = 5;

/// Width of the header scan; branches beyond column Z are not provisioned.
const MAX_BRANCH_COLUMNS: usize = 26;

pub struct SheetConsecutiveCounter {
    client: Arc<dyn SheetsClient>,
    sheet: String,
    max_attempts: u32,
}

impl SheetConsecutiveCounter {
    pub fn new(client: Arc<dyn SheetsClient>, sheet: impl Into<String>) -> Self {
        Self {
            client,
            sheet: sheet.into(),
            max_attempts: DEFAULT_COUNTER_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    fn branch_column(&self, branch: &str) -> Result<(usize, usize)> {
        let header_range =
            RangeSpec::row(self.sheet.as_str(), 1, 0, MAX_BRANCH_COLUMNS - 1);
        let rows = self.client.get_rows(&header_range)?;
        let header = rows.into_iter().next().unwrap_or_default();

        let wanted = branch.trim().to_lowercase();
        let col = header
            .iter()
            .position(|cell| cell.trim().to_lowercase() == wanted)
            .ok_or_else(|| {
                StoreError::MalformedResponse(format!(
                    "branch {branch} not found in the counter header"
                ))
            })?;

        let width = header.iter().rposition(|cell| !cell.is_empty()).map_or(0, |i| i + 1);
        Ok((col, width))
    }

    fn column_numbers(&self, col: usize) -> Result<Vec<(u32, u32)>> {
        let range = RangeSpec::column(self.sheet.as_str(), col, 2);
        let rows = self.client.get_rows(&range)?;
        Ok(rows
            .iter()
            .enumerate()
            .filter_map(|(offset, cells)| {
                let value: u32 = cells.first()?.trim().parse().ok()?;
                Some((offset as u32 + 2, value))
            })
            .collect())
    }
}

impl ConsecutiveCounter for SheetConsecutiveCounter {
    fn next_number(&self, branch: &str) -> Result<u32> {
        for attempt in 1..=self.max_attempts {
            let (col, width) = self.branch_column(branch)?;

            // max + 1, not count + 1: other branches' appends leave holes in
            // this column
            let numbers = self.column_numbers(col)?;
            let next = numbers.iter().map(|(_, value)| *value).max().unwrap_or(0) + 1;

            let mut row = vec![String::new(); width];
            row[col] = next.to_string();
            let inserted = self.client.append_row(&self.sheet, row)?.row;

            // winner check: the first row carrying `next` must be ours; a
            // competing writer that read the same max lands above us
            let after = self.column_numbers(col)?;
            let first_holder = after
                .iter()
                .find(|(_, value)| *value == next)
                .map(|(row, _)| *row);
            if first_holder == Some(inserted) {
                tracing::info!(branch, number = next, "consecutive number issued");
                return Ok(next);
            }

            tracing::warn!(
                branch,
                attempt,
                number = next,
                "consecutive number lost to a concurrent writer, retrying"
            );
        }

        Err(Error::ConsecutiveNumberConflict {
            branch: branch.to_string(),
            attempts: self.max_attempts,
        })
    }
}
