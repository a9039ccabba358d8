//! Application services

mod inspection_service;

pub use inspection_service::{EntryReceipt, ExitReceipt, InspectionService};
