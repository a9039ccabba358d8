//! Tabular store client for the inspection sheets
//!
//! The remote store is sheet-like: named sheets of rows and cells addressed
//! with A1 notation, read and written through four primitives with no
//! transactions and last-write-wins updates. The engine only ever talks to
//! the [`SheetsClient`] trait; [`MemorySheetsClient`] is the bundled
//! JSON-file-persisted implementation used by the CLI and the tests.

mod client;
mod memory;
mod range;

pub use client::{AppendResult, SheetsClient};
pub use memory::MemorySheetsClient;
pub use range::{col_index, col_letters, CellRef, RangeSpec};
