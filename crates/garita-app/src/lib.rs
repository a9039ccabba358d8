//! Application service layer
//!
//! Wires the domain services to the sheet-backed repositories and exposes
//! the two lifecycle operations: register an exit, complete an entry.

pub mod clock;
pub mod config;
pub mod service;
pub mod submission;

pub use config::Config;
pub use service::{EntryReceipt, ExitReceipt, InspectionService};
pub use submission::{EntrySubmission, ExitSubmission, InspectionSubmission};
