//! Sheet-backed repository implementations

mod sheet_counter;
mod sheet_inspection_repo;

pub use sheet_counter::{SheetConsecutiveCounter, DEFAULT_COUNTER_ATTEMPTS};
pub use sheet_inspection_repo::SheetInspectionRepository;
